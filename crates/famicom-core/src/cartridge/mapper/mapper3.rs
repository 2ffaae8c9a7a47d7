use tracing::trace;

use crate::{cartridge::Storage, memory::cpu as cpu_mem};

// Mapper 3 – CNROM 8 KiB CHR banking.
//
// | Area | Address range | Behaviour                                  |
// |------|---------------|--------------------------------------------|
// | CPU  | `$6000-$7FFF` | 8 KiB save RAM                             |
// | CPU  | `$8000-$BFFF` | first 16 KiB PRG bank                      |
// | CPU  | `$C000-$FFFF` | last 16 KiB PRG bank                       |
// | CPU  | `$8000-$FFFF` | write: CHR bank select (`value & 3`)       |
// | PPU  | `$0000-$1FFF` | 8 KiB switchable CHR bank                  |

const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;
const CHR_BANK_MASK: u8 = 0b0000_0011;
const UPPER_WINDOW_START: u16 = 0xC000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper3 {
    chr_bank: usize,
    last_prg_bank: usize,
}

impl Mapper3 {
    pub fn new(storage: &Storage) -> Self {
        Self {
            chr_bank: 0,
            last_prg_bank: (storage.prg_len() / PRG_BANK_SIZE).saturating_sub(1),
        }
    }

    pub(super) fn write_register(&mut self, data: u8) {
        self.chr_bank = (data & CHR_BANK_MASK) as usize;
        trace!(bank = self.chr_bank, "CNROM CHR bank switch");
    }

    pub(super) fn prg_offset(&self, addr: u16) -> usize {
        if addr >= UPPER_WINDOW_START {
            self.last_prg_bank * PRG_BANK_SIZE + (addr - UPPER_WINDOW_START) as usize
        } else {
            (addr - cpu_mem::PRG_ROM_START) as usize
        }
    }

    pub(super) fn chr_offset(&self, addr: u16) -> usize {
        self.chr_bank * CHR_BANK_SIZE + addr as usize
    }
}
