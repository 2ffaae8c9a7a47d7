//! The fixed 64-color NES master palette and palette RAM addressing.

use crate::memory::ppu as ppu_mem;

/// Master palette as packed `0xAABBGGRR` values.
#[rustfmt::skip]
pub static PALETTE: [u32; 64] = [
    0xff666666, 0xff882a00, 0xffa71214, 0xffa4003b, 0xff7e005c, 0xff40006e, 0xff00066c, 0xff001d56,
    0xff003533, 0xff00480b, 0xff005200, 0xff084f00, 0xff4d4000, 0xff000000, 0xff000000, 0xff000000,
    0xffadadad, 0xffd95f15, 0xffff4042, 0xfffe2775, 0xffcc1aa0, 0xff7b1eb7, 0xff2031b5, 0xff004e99,
    0xff006d6b, 0xff008738, 0xff00930c, 0xff328f00, 0xff8d7c00, 0xff000000, 0xff000000, 0xff000000,
    0xfffffeff, 0xffffb064, 0xffff9092, 0xffff76c6, 0xffff6af3, 0xffcc6efe, 0xff7081fe, 0xff229eea,
    0xff00bebc, 0xff00d888, 0xff30e45c, 0xff82e045, 0xffdecd48, 0xff4f4f4f, 0xff000000, 0xff000000,
    0xfffffeff, 0xffffdfc0, 0xffffd2d3, 0xffffc8e8, 0xffffc2fb, 0xffeac4fe, 0xffc5ccfe, 0xffa5d8f7,
    0xff94e5e4, 0xff96efcf, 0xffabf4bd, 0xffccf3b3, 0xfff2ebb5, 0xffb8b8b8, 0xff000000, 0xff000000,
];

/// Maps any address in `$3F00-$3FFF` (or a raw color index) to a palette
/// RAM slot. Sprite backdrop entries `$3F10/$14/$18/$1C` alias their
/// background counterparts.
pub fn palette_index(addr: u16) -> usize {
    let index = (addr as usize) % ppu_mem::PALETTE_RAM_SIZE;
    if index >= 16 && index % 4 == 0 {
        index - 16
    } else {
        index
    }
}

/// Color for a palette RAM entry. Only the low six bits select a color.
pub fn color(entry: u8) -> u32 {
    PALETTE[(entry & 0x3F) as usize]
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn sprite_backdrops_alias_background() {
        assert_eq!(palette_index(0x3F10), 0);
        assert_eq!(palette_index(0x3F14), 4);
        assert_eq!(palette_index(0x3F1C), 12);
        assert_eq!(palette_index(0x3F11), 17);
        assert_eq!(palette_index(0x3F20), 0);
    }

    #[test]
    fn color_ignores_upper_bits() {
        assert_eq!(color(0xC0), PALETTE[0]);
        assert_eq!(color(0x30), 0xfffffeff);
    }

    proptest! {
        #[test]
        fn index_is_periodic_and_in_range(addr in 0x3F00u16..=0x3FFF) {
            let index = palette_index(addr);
            prop_assert!(index < ppu_mem::PALETTE_RAM_SIZE);
            prop_assert_eq!(index, palette_index(0x3F00 | (addr & 0x1F)));
            prop_assert_eq!(palette_index(index as u16), index);
        }
    }
}
