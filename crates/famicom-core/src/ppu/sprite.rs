use bitflags::bitflags;

bitflags! {
    /// Attribute bits stored in sprite byte 2.
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// V H P . . . p p
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct SpriteAttributes: u8 {
        /// Sprite palette select (0..=3).
        const PALETTE = 0b0000_0011;

        /// Drawn behind opaque background pixels.
        const PRIORITY_BEHIND_BACKGROUND = 0b0010_0000;

        const FLIP_HORIZONTAL = 0b0100_0000;

        const FLIP_VERTICAL = 0b1000_0000;
    }
}

/// Most sprites a single scanline can show.
pub(crate) const MAX_SPRITES_PER_LINE: usize = 8;
pub(crate) const OAM_SPRITES: usize = 64;

/// One sprite selected for the current scanline.
///
/// `pattern` holds eight 4-bit pixels, leftmost in the high nibble. Each
/// nibble is `palette << 2 | color`, so flips are already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct SpriteSlot {
    pub(crate) pattern: u32,
    pub(crate) x: u8,
    pub(crate) behind_background: bool,
    /// Position in OAM; 0 is the sprite that can raise the zero hit.
    pub(crate) index: u8,
}

impl SpriteSlot {
    /// Pixel nibble at screen column `x`, or `None` outside the sprite.
    pub(crate) fn pixel_at(&self, x: u16) -> Option<u8> {
        let offset = x.checked_sub(self.x as u16)?;
        if offset > 7 {
            return None;
        }
        Some(((self.pattern >> ((7 - offset) * 4)) & 0x0F) as u8)
    }
}

/// Sprite row inside the pattern data and the tile/table to fetch it from.
///
/// `row` is the scanline minus the sprite's Y and must lie within the
/// sprite height. Returns the CHR address of the low plane.
pub(crate) fn pattern_addr(
    tile: u8,
    attributes: SpriteAttributes,
    row: u16,
    height: u16,
    table_8x8: u16,
) -> u16 {
    let flip = attributes.contains(SpriteAttributes::FLIP_VERTICAL);
    let mut row = if flip { height - 1 - row } else { row };
    if height == 8 {
        return table_8x8 + ((tile as u16) << 4) + row;
    }

    let table = ((tile & 1) as u16) << 12;
    let mut tile = tile & 0xFE;
    if row > 7 {
        tile += 1;
        row -= 8;
    }
    table + ((tile as u16) << 4) + row
}

/// Interleaves two pattern planes into eight nibbles carrying the palette.
pub(crate) fn pack_pattern(mut low: u8, mut high: u8, attributes: SpriteAttributes) -> u32 {
    let palette = (attributes & SpriteAttributes::PALETTE).bits() << 2;
    let mirrored = attributes.contains(SpriteAttributes::FLIP_HORIZONTAL);
    let mut pattern = 0u32;
    for _ in 0..8 {
        let (p1, p2) = if mirrored {
            let bits = (low & 1, (high & 1) << 1);
            low >>= 1;
            high >>= 1;
            bits
        } else {
            let bits = ((low & 0x80) >> 7, (high & 0x80) >> 6);
            low <<= 1;
            high <<= 1;
            bits
        };
        pattern = (pattern << 4) | (palette | p1 | p2) as u32;
    }
    pattern
}
