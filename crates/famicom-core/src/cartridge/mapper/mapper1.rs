use tracing::trace;

use crate::{
    cartridge::{Storage, header::Mirroring, mapper::bank_offset},
    memory::cpu as cpu_mem,
};

// Mapper 1 – MMC1 (SxROM) serial-port banking.
//
// | Area | Address range | Behaviour                                         |
// |------|---------------|---------------------------------------------------|
// | CPU  | `$6000-$7FFF` | 8 KiB save RAM                                    |
// | CPU  | `$8000-$9FFF` | serial write: control (mirroring, PRG/CHR modes)  |
// | CPU  | `$A000-$BFFF` | serial write: CHR bank 0                          |
// | CPU  | `$C000-$DFFF` | serial write: CHR bank 1                          |
// | CPU  | `$E000-$FFFF` | serial write: PRG bank                            |
// | CPU  | `$8000-$FFFF` | two 16 KiB PRG windows                            |
// | PPU  | `$0000-$1FFF` | two 4 KiB CHR windows                             |
//
// Writes shift bit 0 into a 5-bit register, LSB first; the fifth write
// commits it to the register selected by the address of that write. A write
// with bit 7 set resets the shift register and forces PRG mode 3.

const PRG_BANK_SHIFT: u32 = 14;
const CHR_BANK_SHIFT: u32 = 12;
const PRG_WINDOW_MASK: u16 = 0x3FFF;
const CHR_WINDOW_MASK: u16 = 0x0FFF;

/// Shift register value after reset; the marker bit reaching bit 0 means
/// the fifth write is in progress.
const SHIFT_RESET: u8 = 0x10;
const RESET_BIT: u8 = 0x80;

const CONTROL_END: u16 = 0x9FFF;
const CHR_BANK0_END: u16 = 0xBFFF;
const CHR_BANK1_END: u16 = 0xDFFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper1 {
    shift: u8,
    control: u8,
    prg_mode: u8,
    chr_mode: u8,
    prg_bank: u8,
    chr_bank0: u8,
    chr_bank1: u8,
    prg_offsets: [usize; 2],
    chr_offsets: [usize; 2],
    prg_len: usize,
    chr_len: usize,
}

impl Mapper1 {
    pub fn new(storage: &Storage) -> Self {
        let prg_len = storage.prg_len();
        Self {
            shift: SHIFT_RESET,
            control: 0,
            prg_mode: 0,
            chr_mode: 0,
            prg_bank: 0,
            chr_bank0: 0,
            chr_bank1: 0,
            prg_offsets: [0, bank_offset(prg_len, -1, PRG_BANK_SHIFT)],
            chr_offsets: [0, 0],
            prg_len,
            chr_len: storage.chr_len(),
        }
    }

    pub(super) fn write_register(&mut self, storage: &mut Storage, addr: u16, data: u8) {
        if data & RESET_BIT != 0 {
            self.shift = SHIFT_RESET;
            self.write_control(storage, self.control | 0x0C);
            self.update_offsets();
            return;
        }

        let complete = self.shift & 1 == 1;
        self.shift >>= 1;
        self.shift |= (data & 1) << 4;
        if !complete {
            return;
        }

        let value = self.shift;
        match addr {
            ..=CONTROL_END => self.write_control(storage, value),
            ..=CHR_BANK0_END => self.chr_bank0 = value,
            ..=CHR_BANK1_END => self.chr_bank1 = value,
            _ => self.prg_bank = value & 0x0F,
        }
        self.update_offsets();
        self.shift = SHIFT_RESET;
        trace!(
            addr = format_args!("{addr:#06X}"),
            value,
            prg = ?self.prg_offsets,
            chr = ?self.chr_offsets,
            "MMC1 register commit"
        );
    }

    fn write_control(&mut self, storage: &mut Storage, value: u8) {
        self.control = value;
        self.chr_mode = (value >> 4) & 1;
        self.prg_mode = (value >> 2) & 3;
        storage.set_mirroring(match value & 3 {
            0 => Mirroring::SingleScreen0,
            1 => Mirroring::SingleScreen1,
            2 => Mirroring::Vertical,
            _ => Mirroring::Horizontal,
        });
    }

    // PRG mode 0-1: 32 KiB at $8000, low bit of the bank ignored
    //          2  : first bank fixed at $8000, 16 KiB switchable at $C000
    //          3  : 16 KiB switchable at $8000, last bank fixed at $C000
    // CHR mode 0  : 8 KiB
    //          1  : two 4 KiB banks
    fn update_offsets(&mut self) {
        let prg = |index: i32| bank_offset(self.prg_len, index, PRG_BANK_SHIFT);
        let bank = self.prg_bank as i32;
        self.prg_offsets = match self.prg_mode {
            0 | 1 => [prg(bank & 0xFE), prg(bank | 0x01)],
            2 => [0, prg(bank)],
            _ => [prg(bank), prg(-1)],
        };

        let chr = |index: i32| bank_offset(self.chr_len, index, CHR_BANK_SHIFT);
        let (bank0, bank1) = (self.chr_bank0 as i32, self.chr_bank1 as i32);
        self.chr_offsets = match self.chr_mode {
            0 => [chr(bank0 & 0xFE), chr(bank0 | 0x01)],
            _ => [chr(bank0), chr(bank1)],
        };
    }

    pub(super) fn prg_offset(&self, addr: u16) -> usize {
        let addr = addr - cpu_mem::PRG_ROM_START;
        self.prg_offsets[(addr >> PRG_BANK_SHIFT) as usize] + (addr & PRG_WINDOW_MASK) as usize
    }

    pub(super) fn chr_offset(&self, addr: u16) -> usize {
        self.chr_offsets[((addr >> CHR_BANK_SHIFT) & 1) as usize]
            + (addr & CHR_WINDOW_MASK) as usize
    }
}
