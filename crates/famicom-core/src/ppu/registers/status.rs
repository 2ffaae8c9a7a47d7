use bitflags::bitflags;

bitflags! {
    /// PPU status register (`$2002`).
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// V S O . . . . .
    /// ```
    /// The low five bits are not stored; reads fill them from the last
    /// value written to any PPU register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct Status: u8 {
        /// More than eight sprites matched a scanline.
        const SPRITE_OVERFLOW = 0b0010_0000;

        /// An opaque sprite-zero pixel overlapped an opaque background pixel.
        const SPRITE_ZERO_HIT = 0b0100_0000;

        /// Set at (241, 1), cleared at (261, 1) and by reading `$2002`.
        const VERTICAL_BLANK = 0b1000_0000;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::empty()
    }
}

impl Status {
    /// Byte returned by a `$2002` read given the last written register value.
    pub(crate) fn read_with_latch(self, last_write: u8) -> u8 {
        self.bits() | (last_write & 0x1F)
    }
}
