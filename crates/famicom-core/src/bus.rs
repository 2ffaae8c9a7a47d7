use std::fmt::Debug;

pub mod cpu;
#[cfg(test)]
pub mod mock;

/// CPU-visible address space.
///
/// `read` and `write` are total over `u16`: unmapped addresses read as 0 and
/// swallow writes, so the CPU never has to handle a bus fault.
pub trait Bus: Debug {
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, data: u8);

    /// Returns the page written to `$4014` since the last call, if any.
    ///
    /// The copy itself has already happened by the time this is called; the
    /// CPU only uses the request to charge the DMA stall.
    fn take_oam_dma_request(&mut self) -> Option<u8> {
        None
    }
}
