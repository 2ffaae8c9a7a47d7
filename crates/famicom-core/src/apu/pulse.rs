//! Pulse channel state, including sweep and envelope units.

use super::{envelope::Envelope, length_counter::LengthCounter, tables::PULSE_DUTY_TABLE};

/// Which pulse unit this is. Pulse 1 negates with one's complement, so its
/// downward sweeps subtract one extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum PulseChannel {
    Pulse1,
    Pulse2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct Sweep {
    enabled: bool,
    negate: bool,
    shift: u8,
    /// Divider period, already incremented by one.
    period: u8,
    divider: u8,
    reload: bool,
    channel: PulseChannel,
}

impl Sweep {
    fn new(channel: PulseChannel) -> Self {
        Self {
            enabled: false,
            negate: false,
            shift: 0,
            period: 0,
            divider: 0,
            reload: false,
            channel,
        }
    }

    pub(super) fn write(&mut self, value: u8) {
        self.enabled = value & 0b1000_0000 != 0;
        self.period = ((value >> 4) & 0b0000_0111) + 1;
        self.negate = value & 0b0000_1000 != 0;
        self.shift = value & 0b0000_0111;
        self.reload = true;
    }

    fn apply(&self, timer_period: &mut u16) {
        let delta = *timer_period >> self.shift;
        if self.negate {
            *timer_period = timer_period.wrapping_sub(delta);
            if self.channel == PulseChannel::Pulse1 {
                *timer_period = timer_period.wrapping_sub(1);
            }
        } else {
            *timer_period = timer_period.wrapping_add(delta);
        }
    }

    /// Half-frame clock.
    pub(super) fn clock(&mut self, timer_period: &mut u16) {
        if self.reload {
            if self.enabled && self.divider == 0 {
                self.apply(timer_period);
            }
            self.divider = self.period;
            self.reload = false;
        } else if self.divider > 0 {
            self.divider -= 1;
        } else {
            if self.enabled {
                self.apply(timer_period);
            }
            self.divider = self.period;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct Pulse {
    duty: u8,
    duty_pos: u8,
    timer: u16,
    timer_period: u16,
    envelope: Envelope,
    length: LengthCounter,
    sweep: Sweep,
    enabled: bool,
}

impl Pulse {
    pub(super) fn new(channel: PulseChannel) -> Self {
        Self {
            duty: 0,
            duty_pos: 0,
            timer: 0,
            timer_period: 0,
            envelope: Envelope::default(),
            length: LengthCounter::default(),
            sweep: Sweep::new(channel),
            enabled: false,
        }
    }

    pub(super) fn write_control(&mut self, value: u8) {
        self.duty = (value >> 6) & 0b0000_0011;
        self.envelope.configure(value);
    }

    pub(super) fn write_sweep(&mut self, value: u8) {
        self.sweep.write(value);
    }

    pub(super) fn write_timer_low(&mut self, value: u8) {
        self.timer_period = (self.timer_period & 0xFF00) | value as u16;
    }

    pub(super) fn write_timer_high(&mut self, value: u8) {
        self.timer_period = (self.timer_period & 0x00FF) | (((value & 0b0000_0111) as u16) << 8);
        self.length.load(value);
        self.envelope.restart();
        self.duty_pos = 0;
    }

    pub(super) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length.clear();
        }
    }

    /// Runs on every other CPU cycle.
    pub(super) fn clock_timer(&mut self) {
        if self.timer == 0 {
            self.timer = self.timer_period;
            self.duty_pos = (self.duty_pos + 1) & 0b111;
        } else {
            self.timer -= 1;
        }
    }

    pub(super) fn clock_envelope(&mut self) {
        self.envelope.clock();
    }

    pub(super) fn clock_length(&mut self) {
        self.length.clock(self.envelope.halt_length());
    }

    pub(super) fn clock_sweep(&mut self) {
        self.sweep.clock(&mut self.timer_period);
    }

    /// Current DAC level (0..=15).
    pub(super) fn output(&self) -> u8 {
        if !self.enabled
            || !self.length.active()
            || PULSE_DUTY_TABLE[self.duty as usize][self.duty_pos as usize] == 0
            || !(8..=0x7FF).contains(&self.timer_period)
        {
            0
        } else {
            self.envelope.output()
        }
    }

    pub(super) fn length_active(&self) -> bool {
        self.length.active()
    }

    pub(super) fn length(&self) -> u8 {
        self.length.value()
    }

    #[cfg(test)]
    fn timer_period(&self) -> u16 {
        self.timer_period
    }
}
