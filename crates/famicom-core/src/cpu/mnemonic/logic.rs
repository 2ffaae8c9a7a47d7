use crate::{
    bus::Bus,
    cpu::{Cpu, status::Status},
};

impl Cpu {
    pub(super) fn and(&mut self, bus: &mut impl Bus, addr: u16) {
        self.a &= bus.read(addr);
        self.p.update_zn(self.a);
    }

    pub(super) fn eor(&mut self, bus: &mut impl Bus, addr: u16) {
        self.a ^= bus.read(addr);
        self.p.update_zn(self.a);
    }

    pub(super) fn ora(&mut self, bus: &mut impl Bus, addr: u16) {
        self.a |= bus.read(addr);
        self.p.update_zn(self.a);
    }

    // ================================================================
    //  BIT - Test bits in memory with A
    // ================================================================
    /// Z ← (A & M) == 0, N ← M7, V ← M6. A is unchanged.
    pub(super) fn bit(&mut self, bus: &mut impl Bus, addr: u16) {
        let value = bus.read(addr);
        self.p.set(Status::OVERFLOW, value & 0x40 != 0);
        self.p.update_zero(value & self.a);
        self.p.update_negative(value);
    }
}
