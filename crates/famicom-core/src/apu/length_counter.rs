//! Length counter shared by pulse, triangle, and noise channels.

use super::tables::LENGTH_TABLE;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct LengthCounter {
    value: u8,
}

impl LengthCounter {
    pub(super) fn clear(&mut self) {
        self.value = 0;
    }

    pub(super) fn active(&self) -> bool {
        self.value > 0
    }

    pub(super) fn value(&self) -> u8 {
        self.value
    }

    /// Loads from the length table using the top five bits of `register`.
    pub(super) fn load(&mut self, register: u8) {
        self.value = LENGTH_TABLE[(register >> 3) as usize];
    }

    /// Half-frame clock. Never goes below zero.
    pub(super) fn clock(&mut self, halt: bool) {
        if !halt && self.value > 0 {
            self.value -= 1;
        }
    }
}
