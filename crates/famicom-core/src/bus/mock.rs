use crate::{
    bus::Bus,
    memory::cpu::{OAM_DMA, RESET_VECTOR},
};

/// Flat 64 KiB RAM used by CPU unit tests.
///
/// A write to `$4014` is stored like any other byte and also latched as an
/// OAM DMA request so stall accounting can be observed.
#[derive(Debug)]
pub(crate) struct MockBus {
    mem: Box<[u8; 0x10000]>,
    oam_dma: Option<u8>,
}

impl MockBus {
    /// Places `program` at `pc` and points the reset vector at it.
    pub(crate) fn with_program(pc: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        for (offset, byte) in program.iter().enumerate() {
            bus.poke(pc.wrapping_add(offset as u16), *byte);
        }
        bus.set_vector(RESET_VECTOR, pc);
        bus
    }

    pub(crate) fn poke(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }

    pub(crate) fn peek(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    pub(crate) fn set_vector(&mut self, vector: u16, target: u16) {
        self.poke(vector, target as u8);
        self.poke(vector.wrapping_add(1), (target >> 8) as u8);
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self {
            mem: Box::new([0; 0x10000]),
            oam_dma: None,
        }
    }
}

impl Bus for MockBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.mem[addr as usize] = data;
        if addr == OAM_DMA {
            self.oam_dma = Some(data);
        }
    }

    fn take_oam_dma_request(&mut self) -> Option<u8> {
        self.oam_dma.take()
    }
}
