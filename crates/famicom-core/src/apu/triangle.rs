//! Triangle channel state and linear counter.

use super::{length_counter::LengthCounter, tables::TRIANGLE_SEQUENCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(super) struct Triangle {
    /// Halts the length counter and keeps the linear counter reloading.
    control_flag: bool,
    linear_reload_value: u8,
    linear_counter: u8,
    linear_reload: bool,
    length: LengthCounter,
    timer: u16,
    timer_period: u16,
    sequence_pos: u8,
    enabled: bool,
}

impl Triangle {
    pub(super) fn write_control(&mut self, value: u8) {
        self.control_flag = value & 0b1000_0000 != 0;
        self.linear_reload_value = value & 0b0111_1111;
    }

    pub(super) fn write_timer_low(&mut self, value: u8) {
        self.timer_period = (self.timer_period & 0xFF00) | value as u16;
    }

    pub(super) fn write_timer_high(&mut self, value: u8) {
        self.timer_period = (self.timer_period & 0x00FF) | (((value & 0b0000_0111) as u16) << 8);
        self.timer = self.timer_period;
        self.length.load(value);
        self.linear_reload = true;
    }

    pub(super) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length.clear();
        }
    }

    /// Quarter-frame clock.
    pub(super) fn clock_linear_counter(&mut self) {
        if self.linear_reload {
            self.linear_counter = self.linear_reload_value;
        } else if self.linear_counter > 0 {
            self.linear_counter -= 1;
        }

        if !self.control_flag {
            self.linear_reload = false;
        }
    }

    /// Runs on every CPU cycle.
    pub(super) fn clock_timer(&mut self) {
        if self.timer == 0 {
            self.timer = self.timer_period;
            if self.length.active() && self.linear_counter > 0 {
                self.sequence_pos = (self.sequence_pos + 1) & 0b1_1111;
            }
        } else {
            self.timer -= 1;
        }
    }

    pub(super) fn clock_length(&mut self) {
        self.length.clock(self.control_flag);
    }

    pub(super) fn output(&self) -> u8 {
        if !self.enabled || !self.length.active() || self.linear_counter == 0 {
            0
        } else {
            TRIANGLE_SEQUENCE[self.sequence_pos as usize]
        }
    }

    pub(super) fn length_active(&self) -> bool {
        self.length.active()
    }

    pub(super) fn length(&self) -> u8 {
        self.length.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> Triangle {
        let mut tri = Triangle::default();
        tri.set_enabled(true);
        tri.write_control(0x7F);
        tri.write_timer_low(0);
        tri.write_timer_high(0x08);
        tri.clock_linear_counter();
        tri
    }

    #[test]
    fn linear_counter_gates_the_sequencer() {
        let mut tri = running();
        let start = tri.output();
        tri.clock_timer();
        assert_ne!(tri.output(), start);

        tri.write_control(0x00);
        tri.write_timer_high(0x08);
        tri.clock_linear_counter();
        assert_eq!(tri.output(), 0);
    }

    #[test]
    fn control_flag_keeps_reload_pending() {
        let mut tri = Triangle::default();
        tri.set_enabled(true);
        tri.write_control(0x85);
        tri.write_timer_high(0x08);
        for _ in 0..10 {
            tri.clock_linear_counter();
        }
        assert_eq!(tri.linear_counter, 5);

        tri.write_control(0x05);
        tri.clock_linear_counter();
        tri.clock_linear_counter();
        assert_eq!(tri.linear_counter, 4);
    }

    #[test]
    fn disabling_clears_length() {
        let mut tri = running();
        assert!(tri.length_active());
        tri.set_enabled(false);
        assert!(!tri.length_active());
        assert_eq!(tri.output(), 0);
    }
}
