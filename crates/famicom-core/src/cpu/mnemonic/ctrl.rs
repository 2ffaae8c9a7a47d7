use crate::{
    bus::Bus,
    cpu::{Cpu, status::Status},
    memory::cpu as cpu_mem,
};

impl Cpu {
    // ================================================================
    //  BRK - Software interrupt
    // ================================================================
    /// Pushes PC (already past the opcode) and P with B set, masks IRQ and
    /// jumps through `$FFFE`.
    pub(super) fn brk(&mut self, bus: &mut impl Bus) {
        self.push16(bus, self.pc);
        self.php(bus);
        self.p.insert(Status::INTERRUPT);
        self.pc = self.read16(bus, cpu_mem::IRQ_VECTOR);
    }

    /// Pushes the address of the last operand byte.
    pub(super) fn jsr(&mut self, bus: &mut impl Bus, target: u16) {
        self.push16(bus, self.pc.wrapping_sub(1));
        self.pc = target;
    }

    pub(super) fn rts(&mut self, bus: &mut impl Bus) {
        self.pc = self.pop16(bus).wrapping_add(1);
    }

    pub(super) fn rti(&mut self, bus: &mut impl Bus) {
        let value = self.pop(bus);
        self.p = Status::pulled(value);
        self.pc = self.pop16(bus);
    }
}
