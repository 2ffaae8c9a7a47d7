use crate::{cartridge::Storage, memory::cpu as cpu_mem};

// Mapper 0 – NROM.
//
// | Area | Address range | Behaviour                                   |
// |------|---------------|---------------------------------------------|
// | CPU  | `$6000-$7FFF` | 8 KiB save RAM                              |
// | CPU  | `$8000-$FFFF` | 16 or 32 KiB PRG ROM (16 KiB is mirrored)   |
// | PPU  | `$0000-$1FFF` | 8 KiB CHR ROM/RAM, unbanked                 |

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapper0;

impl Mapper0 {
    pub fn new() -> Self {
        Self
    }

    pub(super) fn prg_offset(&self, storage: &Storage, addr: u16) -> usize {
        let offset = (addr - cpu_mem::PRG_ROM_START) as usize;
        match storage.prg_len() {
            0 => 0,
            len => offset % len,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cartridge::{Mapper, mapper::test_support::banked_storage};

    #[test]
    fn sixteen_kib_prg_is_mirrored() {
        let storage = banked_storage(1, 0x4000, 1, 0x2000);
        let mapper = Mapper::new(0, &storage).expect("nrom");
        assert_eq!(mapper.cpu_read(&storage, 0x8000), 0);
        assert_eq!(mapper.cpu_read(&storage, 0xC000), 0);
    }

    #[test]
    fn thirty_two_kib_prg_is_linear_and_writes_are_ignored() {
        let mut storage = banked_storage(2, 0x4000, 1, 0x2000);
        let mut mapper = Mapper::new(0, &storage).expect("nrom");
        mapper.cpu_write(&mut storage, 0x8000, 1);
        assert_eq!(mapper.cpu_read(&storage, 0x8000), 0);
        assert_eq!(mapper.cpu_read(&storage, 0xFFFF), 1);
    }
}
