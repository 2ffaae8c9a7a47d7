//! CPU-visible PPU register state and the internal `v/t/x/w` latches.

mod control;
mod mask;
mod status;
mod vram_addr;
mod vram_registers;

pub(crate) use control::Control;
pub(crate) use mask::Mask;
pub(crate) use status::Status;
pub use vram_addr::VramAddr;
pub(crate) use vram_registers::VramRegisters;

use crate::ram::ppu::OamRam;

/// Aggregates the state behind `$2000-$2007`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub(crate) struct Registers {
    pub(crate) control: Control,
    pub(crate) mask: Mask,
    pub(crate) status: Status,
    /// OAM pointer driven by `$2003`/`$2004`.
    pub(crate) oam_addr: u8,
    pub(crate) oam: OamRam,
    pub(crate) vram: VramRegisters,
    /// Delayed `$2007` read buffer.
    pub(crate) vram_buffer: u8,
    /// Last value written to any PPU register.
    pub(crate) last_write: u8,
}

impl Registers {
    /// Updates control and copies the nametable select bits into `t`.
    pub(crate) fn write_control(&mut self, value: u8) {
        self.control = Control::from_bits_retain(value);
        self.vram.t.set_nametable(self.control.nametable_index());
    }
}
