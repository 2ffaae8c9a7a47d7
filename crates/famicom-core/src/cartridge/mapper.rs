//! Cartridge boards.
//!
//! The set of supported boards is closed, so they are modelled as one enum
//! and dispatched with `match`:
//!
//! | iNES | Variant | Board          | Banking                                   |
//! |------|---------|----------------|-------------------------------------------|
//! | 0    | `Nrom`  | NROM           | none                                      |
//! | 1    | `Sxrom` | MMC1 / SxROM   | serial port, 16/32 KiB PRG, 4/8 KiB CHR   |
//! | 2    | `Uxrom` | UxROM          | 16 KiB PRG at `$8000`, last bank fixed    |
//! | 3    | `Cnrom` | CNROM          | 8 KiB CHR                                 |
//! | 4    | `Txrom` | MMC3 / TxROM   | 8 KiB PRG, 1/2 KiB CHR, scanline IRQ      |
//! | 7    | `Axrom` | AxROM          | 32 KiB PRG, single-screen mirroring       |
//!
//! Every board decodes `$6000-$7FFF` as 8 KiB of save RAM, so that window is
//! handled here rather than in each variant.

use tracing::trace;

use crate::{
    cartridge::Storage,
    error::Error,
    memory::{cpu as cpu_mem, ppu as ppu_mem},
};

pub mod mapper0;
pub mod mapper1;
pub mod mapper2;
pub mod mapper3;
pub mod mapper4;
pub mod mapper7;

pub use mapper0::Mapper0;
pub use mapper1::Mapper1;
pub use mapper2::Mapper2;
pub use mapper3::Mapper3;
pub use mapper4::Mapper4;
pub use mapper7::Mapper7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapper {
    Nrom(Mapper0),
    Sxrom(Mapper1),
    Uxrom(Mapper2),
    Cnrom(Mapper3),
    Txrom(Mapper4),
    Axrom(Mapper7),
}

impl Mapper {
    /// Instantiates the board for iNES mapper number `id`.
    pub fn new(id: u8, storage: &Storage) -> Result<Self, Error> {
        let mapper = match id {
            0 => Self::Nrom(Mapper0::new()),
            1 => Self::Sxrom(Mapper1::new(storage)),
            2 => Self::Uxrom(Mapper2::new(storage)),
            3 => Self::Cnrom(Mapper3::new(storage)),
            4 => Self::Txrom(Mapper4::new(storage)),
            7 => Self::Axrom(Mapper7::new()),
            other => return Err(Error::UnsupportedMapper(other)),
        };
        Ok(mapper)
    }

    /// iNES mapper number of this board.
    pub fn id(&self) -> u8 {
        match self {
            Self::Nrom(_) => 0,
            Self::Sxrom(_) => 1,
            Self::Uxrom(_) => 2,
            Self::Cnrom(_) => 3,
            Self::Txrom(_) => 4,
            Self::Axrom(_) => 7,
        }
    }

    pub fn cpu_read(&self, storage: &Storage, addr: u16) -> u8 {
        match addr {
            cpu_mem::PRG_ROM_START..=u16::MAX => storage.prg(self.prg_offset(storage, addr)),
            cpu_mem::PRG_RAM_START..=cpu_mem::PRG_RAM_END => storage.sram(addr),
            _ => {
                trace!("unmapped cartridge read at {addr:#06X}");
                0
            }
        }
    }

    pub fn cpu_write(&mut self, storage: &mut Storage, addr: u16, data: u8) {
        match addr {
            cpu_mem::PRG_ROM_START..=u16::MAX => match self {
                Self::Nrom(_) => trace!("write to NROM PRG at {addr:#06X} ignored"),
                Self::Sxrom(m) => m.write_register(storage, addr, data),
                Self::Uxrom(m) => m.write_register(data),
                Self::Cnrom(m) => m.write_register(data),
                Self::Txrom(m) => m.write_register(storage, addr, data),
                Self::Axrom(m) => m.write_register(storage, data),
            },
            cpu_mem::PRG_RAM_START..=cpu_mem::PRG_RAM_END => storage.set_sram(addr, data),
            _ => trace!("unmapped cartridge write at {addr:#06X} = {data:#04X}"),
        }
    }

    pub fn ppu_read(&self, storage: &Storage, addr: u16) -> u8 {
        storage.chr(self.chr_offset(addr & ppu_mem::PATTERN_TABLE_END))
    }

    /// Pattern writes land in CHR whether the board carries RAM or ROM.
    pub fn ppu_write(&mut self, storage: &mut Storage, addr: u16, data: u8) {
        let offset = self.chr_offset(addr & ppu_mem::PATTERN_TABLE_END);
        storage.set_chr(offset, data);
    }

    /// Clocks the scanline counter; returns `true` when an IRQ should be raised.
    pub fn update_counter(&mut self) -> bool {
        match self {
            Self::Txrom(m) => m.update_counter(),
            _ => false,
        }
    }

    fn prg_offset(&self, storage: &Storage, addr: u16) -> usize {
        match self {
            Self::Nrom(m) => m.prg_offset(storage, addr),
            Self::Sxrom(m) => m.prg_offset(addr),
            Self::Uxrom(m) => m.prg_offset(addr),
            Self::Cnrom(m) => m.prg_offset(addr),
            Self::Txrom(m) => m.prg_offset(addr),
            Self::Axrom(m) => m.prg_offset(addr),
        }
    }

    fn chr_offset(&self, addr: u16) -> usize {
        match self {
            Self::Sxrom(m) => m.chr_offset(addr),
            Self::Cnrom(m) => m.chr_offset(addr),
            Self::Txrom(m) => m.chr_offset(addr),
            Self::Nrom(_) | Self::Uxrom(_) | Self::Axrom(_) => addr as usize,
        }
    }
}

/// Physical offset of bank `index` in an array of `size` bytes split into
/// `1 << shift` byte banks.
///
/// Register values `>= 0x80` count from the end, so `-1` is the last bank
/// and `-2` the one before it. Indices wrap modulo the bank count.
pub(crate) fn bank_offset(size: usize, index: i32, shift: u32) -> usize {
    let banks = (size >> shift) as i32;
    if banks == 0 {
        return 0;
    }
    let index = if index >= 0x80 { index - 0x100 } else { index };
    let offset = (index % banks) << shift;
    if offset < 0 {
        (offset + size as i32) as usize
    } else {
        offset as usize
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::cartridge::{Storage, header::Mirroring};

    /// Storage whose every `bank_size` chunk of PRG (and CHR) is filled with
    /// its own bank index.
    pub(crate) fn banked_storage(
        prg_banks: usize,
        prg_bank_size: usize,
        chr_banks: usize,
        chr_bank_size: usize,
    ) -> Storage {
        let fill = |banks: usize, size: usize| -> Box<[u8]> {
            (0..banks * size).map(|i| (i / size) as u8).collect()
        };
        Storage::new(
            fill(prg_banks, prg_bank_size),
            fill(chr_banks, chr_bank_size),
            Mirroring::Horizontal,
        )
    }
}
