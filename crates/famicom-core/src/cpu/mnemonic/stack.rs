use crate::{
    bus::Bus,
    cpu::{Cpu, status::Status},
};

impl Cpu {
    pub(super) fn pha(&mut self, bus: &mut impl Bus) {
        self.push(bus, self.a);
    }

    /// PHP always pushes with B and bit 5 set.
    pub(super) fn php(&mut self, bus: &mut impl Bus) {
        self.push(bus, self.p.pushed_by_instruction());
    }

    pub(super) fn pla(&mut self, bus: &mut impl Bus) {
        self.a = self.pop(bus);
        self.p.update_zn(self.a);
    }

    pub(super) fn plp(&mut self, bus: &mut impl Bus) {
        let value = self.pop(bus);
        self.p = Status::pulled(value);
    }
}
