//! Frame sequencer responsible for clocking envelopes, length counters, and
//! sweep units at quarter- and half-frame intervals.

use crate::config::CPU_FREQUENCY;

/// CPU cycles between two sequencer steps (240 Hz).
const STEP_PERIOD: f64 = CPU_FREQUENCY / 240.0;

/// Frame sequencer timing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameCounterMode {
    #[default]
    FourStep,
    FiveStep,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct FrameCounter {
    mode: FrameCounterMode,
    irq_enabled: bool,
    step: u8,
    /// Index of the 240 Hz slot the last cycle fell into.
    slot: u64,
}

/// Which frame units should be clocked after a sequencer step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct FrameTick {
    /// Envelopes and the triangle linear counter.
    pub(super) quarter: bool,
    /// Length counters and sweeps.
    pub(super) half: bool,
    pub(super) frame_irq: bool,
}

impl FrameTick {
    const NONE: Self = Self {
        quarter: false,
        half: false,
        frame_irq: false,
    };
    const QUARTER: Self = Self {
        quarter: true,
        ..Self::NONE
    };
    const HALF: Self = Self {
        quarter: true,
        half: true,
        frame_irq: false,
    };
}

impl FrameCounter {
    pub(super) fn mode(&self) -> FrameCounterMode {
        self.mode
    }

    /// Applies a `$4017` write. Returns the units to clock right away, which
    /// is everything when switching to 5-step mode.
    pub(super) fn configure(&mut self, value: u8) -> FrameTick {
        self.mode = if value & 0b1000_0000 == 0 {
            FrameCounterMode::FourStep
        } else {
            FrameCounterMode::FiveStep
        };
        self.irq_enabled = value & 0b0100_0000 == 0;
        match self.mode {
            FrameCounterMode::FourStep => FrameTick::NONE,
            FrameCounterMode::FiveStep => FrameTick::HALF,
        }
    }

    /// Called with the APU cycle count after every increment. Steps the
    /// sequencer whenever the cycle enters a new 240 Hz slot.
    pub(super) fn clock(&mut self, cycle: u64) -> FrameTick {
        let slot = (cycle as f64 / STEP_PERIOD) as u64;
        if slot == self.slot {
            return FrameTick::NONE;
        }
        self.slot = slot;

        match self.mode {
            FrameCounterMode::FourStep => {
                self.step = (self.step + 1) & 0b11;
                match self.step {
                    0 | 2 => FrameTick::QUARTER,
                    1 => FrameTick::HALF,
                    _ => FrameTick {
                        frame_irq: self.irq_enabled,
                        ..FrameTick::HALF
                    },
                }
            }
            FrameCounterMode::FiveStep => {
                self.step = (self.step + 1) % 5;
                match self.step {
                    0 | 2 => FrameTick::HALF,
                    1 | 3 => FrameTick::QUARTER,
                    _ => FrameTick::NONE,
                }
            }
        }
    }
}
