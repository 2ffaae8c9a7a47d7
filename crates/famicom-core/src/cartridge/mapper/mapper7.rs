use tracing::trace;

use crate::{
    cartridge::{Storage, header::Mirroring},
    memory::cpu as cpu_mem,
};

// Mapper 7 – AxROM 32 KiB PRG banking with single-screen mirroring.
//
// | Area | Address range | Behaviour                                        |
// |------|---------------|--------------------------------------------------|
// | CPU  | `$6000-$7FFF` | 8 KiB save RAM                                   |
// | CPU  | `$8000-$FFFF` | 32 KiB switchable PRG bank                       |
// | CPU  | `$8000-$FFFF` | write: `xxxM xPPP` (M = nametable page, P = bank)|
// | PPU  | `$0000-$1FFF` | 8 KiB CHR RAM, unbanked                          |

const PRG_BANK_SIZE: usize = 32 * 1024;
const PRG_BANK_MASK: u8 = 0b0000_0111;
const NAMETABLE_SELECT: u8 = 0b0001_0000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapper7 {
    prg_bank: usize,
}

impl Mapper7 {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn write_register(&mut self, storage: &mut Storage, data: u8) {
        self.prg_bank = (data & PRG_BANK_MASK) as usize;
        let mirroring = if data & NAMETABLE_SELECT != 0 {
            Mirroring::SingleScreen1
        } else {
            Mirroring::SingleScreen0
        };
        storage.set_mirroring(mirroring);
        trace!(bank = self.prg_bank, ?mirroring, "AxROM bank switch");
    }

    pub(super) fn prg_offset(&self, addr: u16) -> usize {
        self.prg_bank * PRG_BANK_SIZE + (addr - cpu_mem::PRG_ROM_START) as usize
    }
}
