use core::ops::{Deref, DerefMut};

/// Fixed-size zero-initialised memory block.
///
/// Dereferences to `[u8]` so devices can index it directly while the size
/// stays part of the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ram<const N: usize>(Box<[u8; N]>);

pub mod cpu {
    use crate::memory::cpu as cpu_mem;

    pub type Ram = super::Ram<{ cpu_mem::INTERNAL_RAM_SIZE }>;
    pub type PrgRam =
        super::Ram<{ (cpu_mem::PRG_RAM_END - cpu_mem::PRG_RAM_START + 1) as usize }>;
}

pub mod ppu {
    use crate::memory::ppu as ppu_mem;

    pub type Ciram = super::Ram<{ ppu_mem::CIRAM_SIZE }>;
    pub type PaletteRam = super::Ram<{ ppu_mem::PALETTE_RAM_SIZE }>;
    pub type OamRam = super::Ram<{ ppu_mem::OAM_RAM_SIZE }>;
}

impl<const N: usize> Ram<N> {
    pub fn new() -> Self {
        Self(Box::new([0; N]))
    }

    pub fn fill(&mut self, value: u8) {
        self.0.fill(value);
    }
}

impl<const N: usize> Default for Ram<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for Ram<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl<const N: usize> DerefMut for Ram<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut_slice()
    }
}
