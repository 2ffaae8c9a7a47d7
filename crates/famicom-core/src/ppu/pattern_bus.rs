use crate::cartridge::{Cartridge, header::Mirroring};

/// Short-lived view that lets the PPU reach cartridge CHR and the current
/// nametable layout without owning the cartridge.
///
/// The console builds one per PPU call, so the borrow stays explicit.
#[derive(Debug)]
pub struct PpuBus<'a> {
    cartridge: &'a mut Cartridge,
}

impl<'a> PpuBus<'a> {
    pub fn new(cartridge: &'a mut Cartridge) -> Self {
        Self { cartridge }
    }

    pub fn chr_read(&self, addr: u16) -> u8 {
        self.cartridge.ppu_read(addr)
    }

    pub fn chr_write(&mut self, addr: u16, value: u8) {
        self.cartridge.ppu_write(addr, value);
    }

    pub fn mirroring(&self) -> Mirroring {
        self.cartridge.mirroring()
    }
}
