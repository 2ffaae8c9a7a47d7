use tracing::trace;

use crate::{cartridge::Storage, memory::cpu as cpu_mem};

// Mapper 2 – UxROM simple 16 KiB PRG banking.
//
// | Area | Address range | Behaviour                                  |
// |------|---------------|--------------------------------------------|
// | CPU  | `$6000-$7FFF` | 8 KiB save RAM                             |
// | CPU  | `$8000-$BFFF` | 16 KiB switchable PRG-ROM bank             |
// | CPU  | `$C000-$FFFF` | 16 KiB fixed PRG-ROM bank (last)           |
// | PPU  | `$0000-$1FFF` | CHR RAM, unbanked                          |

const PRG_BANK_SIZE: usize = 16 * 1024;

/// CPU `$C000`: start of the window fixed to the last PRG bank.
const UXROM_FIXED_WINDOW_START: u16 = 0xC000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper2 {
    bank_count: usize,
    selected_bank: usize,
    fixed_bank: usize,
}

impl Mapper2 {
    pub fn new(storage: &Storage) -> Self {
        let bank_count = storage.prg_len() / PRG_BANK_SIZE;
        Self {
            bank_count,
            selected_bank: 0,
            fixed_bank: bank_count.saturating_sub(1),
        }
    }

    pub(super) fn write_register(&mut self, data: u8) {
        if self.bank_count == 0 {
            return;
        }
        self.selected_bank = data as usize % self.bank_count;
        trace!(bank = self.selected_bank, "UxROM PRG bank switch");
    }

    pub(super) fn prg_offset(&self, addr: u16) -> usize {
        if addr >= UXROM_FIXED_WINDOW_START {
            self.fixed_bank * PRG_BANK_SIZE + (addr - UXROM_FIXED_WINDOW_START) as usize
        } else {
            self.selected_bank * PRG_BANK_SIZE + (addr - cpu_mem::PRG_ROM_START) as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cartridge::{Mapper, mapper::test_support::banked_storage};

    #[test]
    fn switches_low_window_and_keeps_last_bank_fixed() {
        let mut storage = banked_storage(4, 0x4000, 1, 0x2000);
        let mut mapper = Mapper::new(2, &storage).expect("uxrom");

        assert_eq!(mapper.cpu_read(&storage, 0x8000), 0);
        assert_eq!(mapper.cpu_read(&storage, 0xC000), 3);

        mapper.cpu_write(&mut storage, 0x8000, 2);
        assert_eq!(mapper.cpu_read(&storage, 0x8000), 2);
        assert_eq!(mapper.cpu_read(&storage, 0xBFFF), 2);
        assert_eq!(mapper.cpu_read(&storage, 0xFFFF), 3);
    }

    #[test]
    fn bank_select_wraps_modulo_bank_count() {
        let mut storage = banked_storage(4, 0x4000, 1, 0x2000);
        let mut mapper = Mapper::new(2, &storage).expect("uxrom");
        mapper.cpu_write(&mut storage, 0xFFFF, 5);
        assert_eq!(mapper.cpu_read(&storage, 0x8000), 1);
    }

    #[test]
    fn chr_ram_is_writable() {
        let mut storage = banked_storage(2, 0x4000, 1, 0x2000);
        let mut mapper = Mapper::new(2, &storage).expect("uxrom");
        mapper.ppu_write(&mut storage, 0x0800, 0x42);
        assert_eq!(mapper.ppu_read(&storage, 0x0800), 0x42);
    }
}
