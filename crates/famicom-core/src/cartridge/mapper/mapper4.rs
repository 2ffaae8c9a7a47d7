use tracing::trace;

use crate::{
    cartridge::{Storage, header::Mirroring, mapper::bank_offset},
    memory::cpu as cpu_mem,
};

// Mapper 4 – MMC3 (TxROM) with scanline IRQ.
//
// | Area | Address range | Behaviour                                           |
// |------|---------------|-----------------------------------------------------|
// | CPU  | `$6000-$7FFF` | 8 KiB save RAM                                      |
// | CPU  | `$8000-$9FFF` | even: bank select, odd: bank data                   |
// | CPU  | `$A000-$BFFF` | even: mirroring, odd: PRG RAM protect (ignored)     |
// | CPU  | `$C000-$DFFF` | even: IRQ latch, odd: IRQ reload                    |
// | CPU  | `$E000-$FFFF` | even: IRQ disable, odd: IRQ enable                  |
// | CPU  | `$8000-$FFFF` | four 8 KiB PRG windows                              |
// | PPU  | `$0000-$1FFF` | eight 1 KiB CHR windows (2 KiB pairs from R0/R1)    |

const PRG_BANK_SHIFT: u32 = 13;
const CHR_BANK_SHIFT: u32 = 10;
const PRG_WINDOW_MASK: u16 = 0x1FFF;
const CHR_WINDOW_MASK: u16 = 0x03FF;

const BANK_REGISTERS_END: u16 = 0x9FFF;
const MIRRORING_END: u16 = 0xBFFF;
const IRQ_LATCH_END: u16 = 0xDFFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper4 {
    /// Bank register targeted by the next `$8001` write.
    target: usize,
    registers: [u8; 8],
    prg_mode: u8,
    chr_mode: u8,
    prg_offsets: [usize; 4],
    chr_offsets: [usize; 8],
    prg_len: usize,
    chr_len: usize,
    irq_reload: u8,
    irq_counter: u8,
    irq_enabled: bool,
}

impl Mapper4 {
    pub fn new(storage: &Storage) -> Self {
        let prg_len = storage.prg_len();
        let prg = |index: i32| bank_offset(prg_len, index, PRG_BANK_SHIFT);
        Self {
            target: 0,
            registers: [0; 8],
            prg_mode: 0,
            chr_mode: 0,
            prg_offsets: [prg(0), prg(1), prg(-2), prg(-1)],
            chr_offsets: [0; 8],
            prg_len,
            chr_len: storage.chr_len(),
            irq_reload: 0,
            irq_counter: 0,
            irq_enabled: false,
        }
    }

    pub(super) fn write_register(&mut self, storage: &mut Storage, addr: u16, data: u8) {
        let even = addr & 1 == 0;
        match addr {
            ..=BANK_REGISTERS_END if even => {
                self.prg_mode = (data >> 6) & 1;
                self.chr_mode = (data >> 7) & 1;
                self.target = (data & 7) as usize;
                self.update_offsets();
            }
            ..=BANK_REGISTERS_END => {
                self.registers[self.target] = data;
                self.update_offsets();
                trace!(register = self.target, value = data, "MMC3 bank data");
            }
            ..=MIRRORING_END if even => storage.set_mirroring(if data & 1 == 0 {
                Mirroring::Vertical
            } else {
                Mirroring::Horizontal
            }),
            ..=MIRRORING_END => {}
            ..=IRQ_LATCH_END if even => self.irq_reload = data,
            ..=IRQ_LATCH_END => self.irq_counter = 0,
            _ if even => self.irq_enabled = false,
            _ => self.irq_enabled = true,
        }
    }

    fn update_offsets(&mut self) {
        let prg = |index: i32| bank_offset(self.prg_len, index, PRG_BANK_SHIFT);
        let r = self.registers.map(i32::from);
        self.prg_offsets = match self.prg_mode {
            0 => [prg(r[6]), prg(r[7]), prg(-2), prg(-1)],
            _ => [prg(-2), prg(r[7]), prg(r[6]), prg(-1)],
        };

        let chr = |index: i32| bank_offset(self.chr_len, index, CHR_BANK_SHIFT);
        let pairs = [
            chr(r[0] & 0xFE),
            chr(r[0] | 0x01),
            chr(r[1] & 0xFE),
            chr(r[1] | 0x01),
        ];
        let singles = [chr(r[2]), chr(r[3]), chr(r[4]), chr(r[5])];
        let (low, high) = match self.chr_mode {
            0 => (pairs, singles),
            _ => (singles, pairs),
        };
        self.chr_offsets[..4].copy_from_slice(&low);
        self.chr_offsets[4..].copy_from_slice(&high);
    }

    /// Clocks the scanline counter once.
    pub(super) fn update_counter(&mut self) -> bool {
        if self.irq_counter == 0 {
            self.irq_counter = self.irq_reload;
            false
        } else {
            self.irq_counter -= 1;
            self.irq_counter == 0 && self.irq_enabled
        }
    }

    pub(super) fn prg_offset(&self, addr: u16) -> usize {
        let addr = addr - cpu_mem::PRG_ROM_START;
        self.prg_offsets[(addr >> PRG_BANK_SHIFT) as usize] + (addr & PRG_WINDOW_MASK) as usize
    }

    pub(super) fn chr_offset(&self, addr: u16) -> usize {
        self.chr_offsets[((addr >> CHR_BANK_SHIFT) & 7) as usize]
            + (addr & CHR_WINDOW_MASK) as usize
    }
}
