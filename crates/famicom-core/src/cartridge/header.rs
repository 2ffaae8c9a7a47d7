//! iNES header parsing.
//!
//! The first 16 bytes of every `.nes` image describe how much PRG/CHR data
//! follows, which mapper board the game expects and a few compatibility
//! flags. Only the iNES 1.0 fields are interpreted; NES 2.0 extensions are
//! read as their iNES 1.0 equivalents.
//!
//! | Byte | Meaning                                  |
//! |------|------------------------------------------|
//! | 0-3  | `NES\x1A`                                |
//! | 4    | PRG ROM size in 16 KiB units             |
//! | 5    | CHR ROM size in 8 KiB units (0 = CHR RAM)|
//! | 6    | flags 6: mirroring, battery, trainer, mapper low nibble |
//! | 7    | flags 7: mapper high nibble              |
//! | 8-15 | padding                                  |

use bitflags::bitflags;

use crate::error::Error;

const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;
/// PRG ROM bank unit declared by byte 4.
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// CHR ROM bank unit declared by byte 5.
pub const CHR_BANK_SIZE: usize = 8 * 1024;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        const MIRRORING        = 0b0000_0001;
        const BATTERY          = 0b0000_0010;
        const TRAINER          = 0b0000_0100;
        const FOUR_SCREEN      = 0b0000_1000;
        const MAPPER_LOW_MASK  = 0b1111_0000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags7: u8 {
        const MAPPER_HIGH_MASK = 0b1111_0000;
    }
}

/// Nametable layout selected by the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirroring {
    /// `$2000`/`$2400` share one page, `$2800`/`$2C00` the other.
    Horizontal,
    /// `$2000`/`$2800` share one page, `$2400`/`$2C00` the other.
    Vertical,
    /// Every nametable maps to the first CIRAM page.
    SingleScreen0,
    /// Every nametable maps to the second CIRAM page.
    SingleScreen1,
    /// Cartridge supplies its own four nametables.
    FourScreen,
}

impl Mirroring {
    /// Physical 1 KiB page backing logical nametable `table` (0..=3).
    pub const fn page(self, table: usize) -> usize {
        const HORIZONTAL: [usize; 4] = [0, 0, 1, 1];
        const VERTICAL: [usize; 4] = [0, 1, 0, 1];
        const FOUR_SCREEN: [usize; 4] = [0, 1, 2, 3];
        let table = table & 3;
        match self {
            Self::Horizontal => HORIZONTAL[table],
            Self::Vertical => VERTICAL[table],
            Self::SingleScreen0 => 0,
            Self::SingleScreen1 => 1,
            Self::FourScreen => FOUR_SCREEN[table],
        }
    }
}

/// Parsed iNES header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// Mapper ID (0 == NROM, 1 == MMC1, ...).
    pub mapper: u8,
    /// How the PPU nametables are mirrored at power-on.
    pub mirroring: Mirroring,
    /// Battery bit indicates the cartridge keeps RAM contents when powered off.
    pub battery_backed_ram: bool,
    /// Whether the optional 512 byte trainer block sits between the header and PRG data.
    pub trainer_present: bool,
    /// Number of 16 KiB PRG banks.
    pub prg_banks: usize,
    /// Number of 8 KiB CHR banks (0 means the board carries CHR RAM).
    pub chr_banks: usize,
}

impl Header {
    /// Parse an iNES header from the given byte slice.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < NES_HEADER_LEN {
            return Err(Error::TooShort {
                actual: bytes.len(),
            });
        }

        if &bytes[0..4] != NES_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let flags6 = Flags6::from_bits_truncate(bytes[6]);
        let flags7 = Flags7::from_bits_truncate(bytes[7]);

        Ok(Self {
            mapper: combine_mapper(flags6, flags7),
            mirroring: resolve_mirroring(flags6),
            battery_backed_ram: flags6.contains(Flags6::BATTERY),
            trainer_present: flags6.contains(Flags6::TRAINER),
            prg_banks: bytes[4] as usize,
            chr_banks: bytes[5] as usize,
        })
    }

    /// Amount of PRG ROM in bytes.
    pub fn prg_rom_size(&self) -> usize {
        self.prg_banks * PRG_BANK_SIZE
    }

    /// Amount of CHR ROM in bytes; zero when the board uses CHR RAM.
    pub fn chr_rom_size(&self) -> usize {
        self.chr_banks * CHR_BANK_SIZE
    }

    /// `true` when pattern data lives in writable RAM instead of ROM.
    pub fn uses_chr_ram(&self) -> bool {
        self.chr_banks == 0
    }
}

fn resolve_mirroring(flags6: Flags6) -> Mirroring {
    if flags6.contains(Flags6::FOUR_SCREEN) {
        Mirroring::FourScreen
    } else if flags6.contains(Flags6::MIRRORING) {
        Mirroring::Vertical
    } else {
        Mirroring::Horizontal
    }
}

fn combine_mapper(flags6: Flags6, flags7: Flags7) -> u8 {
    let lower = flags6.bits() >> 4;
    let upper = (flags7 & Flags7::MAPPER_HIGH_MASK).bits();
    lower | upper
}
