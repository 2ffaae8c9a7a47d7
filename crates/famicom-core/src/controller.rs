//! Standard NES controller (joypad) model.
//!
//! Implements the 8-button pad readable through `$4016/$4017`.

/// Button ordering follows the NES shift register bit layout (A first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Serially-readable controller state with strobe behaviour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Controller {
    buttons: u8,
    index: u8,
    strobe: u8,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole button byte (bit 0 = A ... bit 7 = Right).
    pub fn set_buttons(&mut self, buttons: u8) {
        self.buttons = buttons;
    }

    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    /// Update a button's pressed state.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    /// Writes to the `$4016` strobe latch (shared by both ports).
    pub fn write_strobe(&mut self, data: u8) {
        self.strobe = data;
        if self.strobe & 1 == 1 {
            self.index = 0;
        }
    }

    /// Reads the next button bit.
    ///
    /// Returns 0 once all eight buttons have been shifted out. While the
    /// strobe is held high the index stays pinned to A.
    pub fn read(&mut self) -> u8 {
        let value = u8::from(self.index < 8 && (self.buttons >> self.index) & 1 == 1);
        self.index = self.index.saturating_add(1);
        if self.strobe & 1 == 1 {
            self.index = 0;
        }
        value
    }
}

/// Turbo phase for `frame`: on for three frames, off for the next three.
///
/// Frontends OR turbo buttons into the button byte while this is `true`.
pub fn turbo_phase(frame: u64) -> bool {
    frame % 6 < 3
}
