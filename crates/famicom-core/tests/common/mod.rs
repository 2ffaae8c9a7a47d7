#![allow(dead_code)]

use anyhow::{Context, Result};
use famicom_core::{Config, Nes, cartridge::load_cartridge};

pub const PRG_BANK: usize = 0x4000;
pub const CHR_BANK: usize = 0x2000;
pub const TRAINER_LEN: usize = 512;

/// Where the builder places the reset code and the NMI/IRQ handlers.
pub const RESET_ADDR: u16 = 0xC000;
pub const NMI_ADDR: u16 = 0xD000;
pub const IRQ_ADDR: u16 = 0xD800;

/// Assembles iNES images in memory. Code lands in the last 16 KiB of PRG,
/// which every supported board maps at `$C000-$FFFF` after power-on.
#[derive(Debug, Clone)]
pub struct RomBuilder {
    mapper: u8,
    flags6: u8,
    prg: Vec<u8>,
    chr: Vec<u8>,
    trainer: bool,
}

impl RomBuilder {
    /// 16 KiB NROM with CHR RAM, filled with `NOP` and the vectors set.
    pub fn nrom() -> Self {
        let mut rom = Self {
            mapper: 0,
            flags6: 0,
            prg: vec![0xEA; PRG_BANK],
            chr: Vec::new(),
            trainer: false,
        };
        // Default handlers just return.
        rom = rom.code(NMI_ADDR, &[0x40]).code(IRQ_ADDR, &[0x40]);
        rom.set_vectors();
        rom
    }

    pub fn mapper(mut self, mapper: u8) -> Self {
        self.mapper = mapper;
        self
    }

    /// Resizes PRG, keeping the current last bank (code and vectors) last.
    pub fn prg_banks(mut self, banks: usize) -> Self {
        let last = self.last_bank().to_vec();
        self.prg = vec![0xEA; banks * PRG_BANK];
        let start = self.prg.len() - PRG_BANK;
        self.prg[start..].copy_from_slice(&last);
        self
    }

    pub fn chr_banks(mut self, banks: usize) -> Self {
        self.chr = vec![0; banks * CHR_BANK];
        self
    }

    pub fn vertical(mut self) -> Self {
        self.flags6 |= 0b0000_0001;
        self
    }

    pub fn battery(mut self) -> Self {
        self.flags6 |= 0b0000_0010;
        self
    }

    pub fn four_screen(mut self) -> Self {
        self.flags6 |= 0b0000_1000;
        self
    }

    pub fn trainer(mut self) -> Self {
        self.trainer = true;
        self
    }

    /// Writes `bytes` at CPU address `addr` in `$C000-$FFFF`.
    pub fn code(mut self, addr: u16, bytes: &[u8]) -> Self {
        let start = self.prg.len() - PRG_BANK + (addr as usize & (PRG_BANK - 1));
        self.prg[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Raw PRG byte at a physical offset.
    pub fn prg_byte(mut self, offset: usize, value: u8) -> Self {
        self.prg[offset] = value;
        self
    }

    fn last_bank(&self) -> &[u8] {
        &self.prg[self.prg.len() - PRG_BANK..]
    }

    fn set_vectors(&mut self) {
        let end = self.prg.len();
        let [nmi_lo, nmi_hi] = NMI_ADDR.to_le_bytes();
        let [reset_lo, reset_hi] = RESET_ADDR.to_le_bytes();
        let [irq_lo, irq_hi] = IRQ_ADDR.to_le_bytes();
        self.prg[end - 6..].copy_from_slice(&[nmi_lo, nmi_hi, reset_lo, reset_hi, irq_lo, irq_hi]);
    }

    pub fn build(&self) -> Vec<u8> {
        let trainer = if self.trainer { 0b0000_0100 } else { 0 };
        let flags6 = (self.mapper << 4) | self.flags6 | trainer;
        let mut bytes = vec![
            b'N',
            b'E',
            b'S',
            0x1A,
            (self.prg.len() / PRG_BANK) as u8,
            (self.chr.len() / CHR_BANK) as u8,
            flags6,
            self.mapper & 0xF0,
        ];
        bytes.resize(16, 0);
        if self.trainer {
            bytes.extend(std::iter::repeat_n(0xFF, TRAINER_LEN));
        }
        bytes.extend_from_slice(&self.prg);
        bytes.extend_from_slice(&self.chr);
        bytes
    }

    pub fn console(&self) -> Result<Nes> {
        self.console_with(Config::default())
    }

    pub fn console_with(&self, config: Config) -> Result<Nes> {
        let cartridge = load_cartridge(&self.build()).context("building test cartridge")?;
        Ok(Nes::with_config(cartridge, config))
    }
}

/// Runs whole frames until `done` holds or `frames` are exhausted.
pub fn run_until<F>(nes: &mut Nes, frames: usize, mut done: F) -> bool
where
    F: FnMut(&Nes) -> bool,
{
    for _ in 0..frames {
        if done(nes) {
            return true;
        }
        nes.run_frame();
    }
    done(nes)
}
