use crate::{
    bus::Bus,
    cpu::{Cpu, status::Status},
};

impl Cpu {
    // ================================================================
    //  ADC - Add with Carry
    // ================================================================
    /// A ← A + M + C
    ///
    /// C is the unsigned carry out of bit 7. V is set when both inputs share
    /// a sign and the result does not.
    pub(super) fn adc(&mut self, bus: &mut impl Bus, addr: u16) {
        let a = self.a;
        let m = bus.read(addr);
        let c = self.carry() as u16;
        let sum = a as u16 + m as u16 + c;
        let result = sum as u8;
        self.a = result;
        self.p.update_zn(result);
        self.p.set(Status::CARRY, sum > 0xFF);
        self.p
            .set(Status::OVERFLOW, (a ^ m) & 0x80 == 0 && (a ^ result) & 0x80 != 0);
    }

    // ================================================================
    //  SBC - Subtract with Borrow
    // ================================================================
    /// A ← A - M - (1 - C)
    ///
    /// C is "no borrow". V is set when the inputs differ in sign and the
    /// result's sign differs from A.
    pub(super) fn sbc(&mut self, bus: &mut impl Bus, addr: u16) {
        let a = self.a;
        let m = bus.read(addr);
        let borrow = 1 - self.carry() as i16;
        let diff = a as i16 - m as i16 - borrow;
        let result = diff as u8;
        self.a = result;
        self.p.update_zn(result);
        self.p.set(Status::CARRY, diff >= 0);
        self.p
            .set(Status::OVERFLOW, (a ^ m) & 0x80 != 0 && (a ^ result) & 0x80 != 0);
    }

    /// CMP/CPX/CPY.
    pub(super) fn compare(&mut self, bus: &mut impl Bus, register: u8, addr: u16) {
        let value = bus.read(addr);
        self.p.update_zn(register.wrapping_sub(value));
        self.p.set(Status::CARRY, register >= value);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bus::mock::MockBus,
        cpu::{Cpu, status::Status},
    };

    #[test]
    fn cmp_sets_carry_when_register_is_not_smaller() {
        // CMP #$40 ; CPX #$41 ; CPY #$10
        let mut bus = MockBus::with_program(0x8000, &[0xC9, 0x40, 0xE0, 0x41, 0xC0, 0x10]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.a = 0x40;
        cpu.x = 0x40;
        cpu.y = 0x20;

        cpu.step(&mut bus);
        assert!(cpu.p.contains(Status::CARRY | Status::ZERO));

        cpu.step(&mut bus);
        assert!(!cpu.p.contains(Status::CARRY));
        assert!(cpu.p.contains(Status::NEGATIVE));

        cpu.step(&mut bus);
        assert!(cpu.p.contains(Status::CARRY));
        assert!(!cpu.p.contains(Status::ZERO));
    }

    #[test]
    fn adc_indirect_y_page_cross_costs_one_more() {
        // ADC ($20),Y with pointer $00FF + Y = 1 -> $0100.
        let mut bus = MockBus::with_program(0x8000, &[0x71, 0x20]);
        bus.poke(0x20, 0xFF);
        bus.poke(0x21, 0x00);
        bus.poke(0x0100, 0x01);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.y = 1;
        cpu.a = 1;

        assert_eq!(cpu.step(&mut bus), 6);
        assert_eq!(cpu.a, 2);
    }
}
