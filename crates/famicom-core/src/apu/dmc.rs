//! Delta Modulation Channel (DMC) state machine.

use super::tables::DMC_RATE_TABLE;

/// CPU cycles stolen by one sample fetch.
pub(super) const DMC_FETCH_STALL: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct Dmc {
    irq_enable: bool,
    irq_flag: bool,
    loop_flag: bool,
    enabled: bool,
    output_level: u8,
    sample_address: u16,
    sample_length: u16,
    current_address: u16,
    bytes_remaining: u16,
    shift_register: u8,
    bits_remaining: u8,
    timer: u16,
    timer_period: u16,
}

impl Default for Dmc {
    fn default() -> Self {
        Self {
            irq_enable: false,
            irq_flag: false,
            loop_flag: false,
            enabled: false,
            output_level: 0,
            sample_address: 0xC000,
            sample_length: 1,
            current_address: 0,
            bytes_remaining: 0,
            shift_register: 0,
            bits_remaining: 0,
            timer: 0,
            timer_period: DMC_RATE_TABLE[0],
        }
    }
}

impl Dmc {
    pub(super) fn write_control(&mut self, value: u8) {
        self.irq_enable = value & 0b1000_0000 != 0;
        if !self.irq_enable {
            self.irq_flag = false;
        }
        self.loop_flag = value & 0b0100_0000 != 0;
        self.timer_period = DMC_RATE_TABLE[(value & 0b0000_1111) as usize];
    }

    pub(super) fn write_direct_load(&mut self, value: u8) {
        self.output_level = value & 0b0111_1111;
    }

    pub(super) fn write_sample_address(&mut self, value: u8) {
        self.sample_address = 0xC000 | ((value as u16) << 6);
    }

    pub(super) fn write_sample_length(&mut self, value: u8) {
        self.sample_length = ((value as u16) << 4) | 1;
    }

    pub(super) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.irq_flag = false;
        if !enabled {
            self.bytes_remaining = 0;
        } else if self.bytes_remaining == 0 {
            self.restart_sample();
        }
    }

    fn restart_sample(&mut self) {
        self.current_address = self.sample_address;
        self.bytes_remaining = self.sample_length;
    }

    /// Runs on every other CPU cycle. Returns the CPU stall cycles caused by a
    /// sample fetch through `reader`.
    pub(super) fn clock(&mut self, reader: &mut impl FnMut(u16) -> u8) -> u32 {
        if !self.enabled {
            return 0;
        }

        let mut stall = 0;
        if self.bytes_remaining > 0 && self.bits_remaining == 0 {
            stall = DMC_FETCH_STALL;
            self.shift_register = reader(self.current_address);
            self.bits_remaining = 8;
            self.current_address = match self.current_address.wrapping_add(1) {
                0 => 0x8000,
                addr => addr,
            };
            self.bytes_remaining -= 1;
            if self.bytes_remaining == 0 {
                if self.loop_flag {
                    self.restart_sample();
                } else if self.irq_enable {
                    self.irq_flag = true;
                }
            }
        }

        if self.timer == 0 {
            self.timer = self.timer_period;
            if self.bits_remaining != 0 {
                if self.shift_register & 1 != 0 {
                    if self.output_level <= 125 {
                        self.output_level += 2;
                    }
                } else if self.output_level >= 2 {
                    self.output_level -= 2;
                }
                self.shift_register >>= 1;
                self.bits_remaining -= 1;
            }
        } else {
            self.timer -= 1;
        }

        stall
    }

    pub(super) fn output(&self) -> u8 {
        self.output_level
    }

    pub(super) fn active(&self) -> bool {
        self.bytes_remaining > 0
    }

    pub(super) fn irq_flag(&self) -> bool {
        self.irq_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(length: u8) -> Dmc {
        let mut dmc = Dmc::default();
        dmc.write_control(0x0F);
        dmc.write_sample_address(0xFF);
        dmc.write_sample_length(length);
        dmc.set_enabled(true);
        dmc
    }

    #[test]
    fn fetch_wraps_address_and_stalls() {
        let mut dmc = enabled(0);
        assert_eq!(dmc.current_address, 0xFFC0);
        let mut reads = Vec::new();
        let mut reader = |addr| {
            reads.push(addr);
            0xFF
        };
        assert_eq!(dmc.clock(&mut reader), DMC_FETCH_STALL);
        assert!(!dmc.active());
        assert_eq!(reads, [0xFFC0]);
    }

    #[test]
    fn shifts_level_up_and_clamps() {
        let mut dmc = enabled(0);
        dmc.write_direct_load(124);
        let mut reader = |_| 0xFF;
        for _ in 0..8 * (DMC_RATE_TABLE[15] as usize + 1) {
            dmc.clock(&mut reader);
        }
        assert_eq!(dmc.output(), 126);
    }

    #[test]
    fn loop_restarts_and_irq_fires_otherwise() {
        let mut looping = enabled(0);
        looping.write_control(0x4F);
        looping.clock(&mut |_| 0);
        assert!(looping.active());

        let mut once = enabled(0);
        once.write_control(0x8F);
        once.clock(&mut |_| 0);
        assert!(!once.active());
        assert!(once.irq_flag());
        once.set_enabled(false);
        assert!(!once.irq_flag());
    }
}
