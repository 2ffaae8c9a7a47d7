//! Envelope unit shared by pulse and noise channels.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct Envelope {
    loop_flag: bool,
    constant_volume: bool,
    /// Constant volume and divider period share the low nibble.
    volume: u8,
    start: bool,
    divider: u8,
    decay_level: u8,
}

impl Envelope {
    /// Applies the low six bits of a channel control write and restarts.
    pub(super) fn configure(&mut self, value: u8) {
        self.loop_flag = value & 0b0010_0000 != 0;
        self.constant_volume = value & 0b0001_0000 != 0;
        self.volume = value & 0b0000_1111;
        self.start = true;
    }

    pub(super) fn restart(&mut self) {
        self.start = true;
    }

    /// Quarter-frame clock.
    pub(super) fn clock(&mut self) {
        if self.start {
            self.start = false;
            self.decay_level = 15;
            self.divider = self.volume;
        } else if self.divider > 0 {
            self.divider -= 1;
        } else {
            if self.decay_level > 0 {
                self.decay_level -= 1;
            } else if self.loop_flag {
                self.decay_level = 15;
            }
            self.divider = self.volume;
        }
    }

    pub(super) fn output(&self) -> u8 {
        if self.constant_volume {
            self.volume
        } else {
            self.decay_level
        }
    }

    /// The loop flag doubles as the length counter halt.
    pub(super) fn halt_length(&self) -> bool {
        self.loop_flag
    }
}
