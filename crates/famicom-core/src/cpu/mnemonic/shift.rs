use crate::{
    bus::Bus,
    cpu::{Cpu, addressing::Addressing, status::Status},
};

impl Cpu {
    /// Read-modify-write on A (accumulator mode) or memory.
    ///
    /// `op` receives the old value and the incoming carry and returns the new
    /// value plus the outgoing carry. N/Z follow the result.
    fn shift(
        &mut self,
        bus: &mut impl Bus,
        addr: u16,
        mode: Addressing,
        op: impl FnOnce(u8, bool) -> (u8, bool),
    ) {
        let carry_in = self.p.contains(Status::CARRY);
        let result = if mode == Addressing::Accumulator {
            let (result, carry) = op(self.a, carry_in);
            self.a = result;
            self.p.set(Status::CARRY, carry);
            result
        } else {
            let (result, carry) = op(bus.read(addr), carry_in);
            bus.write(addr, result);
            self.p.set(Status::CARRY, carry);
            result
        };
        self.p.update_zn(result);
    }

    pub(super) fn asl(&mut self, bus: &mut impl Bus, addr: u16, mode: Addressing) {
        self.shift(bus, addr, mode, |v, _| (v << 1, v & 0x80 != 0));
    }

    pub(super) fn lsr(&mut self, bus: &mut impl Bus, addr: u16, mode: Addressing) {
        self.shift(bus, addr, mode, |v, _| (v >> 1, v & 1 != 0));
    }

    pub(super) fn rol(&mut self, bus: &mut impl Bus, addr: u16, mode: Addressing) {
        self.shift(bus, addr, mode, |v, c| ((v << 1) | c as u8, v & 0x80 != 0));
    }

    pub(super) fn ror(&mut self, bus: &mut impl Bus, addr: u16, mode: Addressing) {
        self.shift(bus, addr, mode, |v, c| ((v >> 1) | ((c as u8) << 7), v & 1 != 0));
    }
}
