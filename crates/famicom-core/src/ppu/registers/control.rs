use bitflags::bitflags;

use crate::memory::ppu as ppu_mem;

bitflags! {
    /// PPU control register (`$2000`).
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N M S B s I n n
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct Control: u8 {
        /// Base nametable select, copied into `t` bits 10-11 on write.
        const NAMETABLE = 0b0000_0011;

        /// `$2007` advances `v` by 32 instead of 1.
        const INCREMENT_32 = 0b0000_0100;

        /// 8x8 sprites fetch from `$1000`.
        const SPRITE_TABLE = 0b0000_1000;

        /// Background fetches from `$1000`.
        const BACKGROUND_TABLE = 0b0001_0000;

        /// 8x16 sprites. The pattern table then comes from bit 0 of the tile.
        const SPRITE_SIZE_16 = 0b0010_0000;

        /// Unused on a stock console.
        const MASTER_SLAVE = 0b0100_0000;

        /// Generate NMI at the start of vblank.
        const GENERATE_NMI = 0b1000_0000;
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::empty()
    }
}

impl Control {
    pub(crate) fn nametable_index(self) -> u8 {
        self.bits() & 0b11
    }

    /// `v` step applied after each `$2007` access.
    pub(crate) fn vram_increment(self) -> u16 {
        if self.contains(Control::INCREMENT_32) {
            32
        } else {
            1
        }
    }

    pub(crate) fn sprite_pattern_table(self) -> u16 {
        if self.contains(Control::SPRITE_TABLE) {
            ppu_mem::PATTERN_TABLE_1
        } else {
            ppu_mem::PATTERN_TABLE_0
        }
    }

    pub(crate) fn background_pattern_table(self) -> u16 {
        if self.contains(Control::BACKGROUND_TABLE) {
            ppu_mem::PATTERN_TABLE_1
        } else {
            ppu_mem::PATTERN_TABLE_0
        }
    }

    /// Sprite height in scanlines.
    pub(crate) fn sprite_height(self) -> u16 {
        if self.contains(Control::SPRITE_SIZE_16) {
            16
        } else {
            8
        }
    }

    pub(crate) fn nmi_enabled(self) -> bool {
        self.contains(Control::GENERATE_NMI)
    }
}
