use crate::cpu::Cpu;

impl Cpu {
    /// TAX/TAY/TSX/TXA/TYA: copy with N/Z. TXS skips this helper because it
    /// leaves the flags alone.
    pub(super) fn transfer(&mut self, value: u8) -> u8 {
        self.p.update_zn(value);
        value
    }
}
