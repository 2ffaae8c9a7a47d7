use crate::{bus::Bus, cpu::Cpu};

impl Cpu {
    // ================================================================
    //  LDA / LDX / LDY - Load register from memory
    // ================================================================
    /// Reads the operand and updates N/Z; the caller stores it in the
    /// target register.
    pub(super) fn load(&mut self, bus: &mut impl Bus, addr: u16) -> u8 {
        let value = bus.read(addr);
        self.p.update_zn(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        bus::mock::MockBus,
        cpu::{Cpu, status::Status},
    };

    #[test]
    fn lda_absolute_x_charges_page_cross() {
        // LDA $80F0,X with X = 0x20 reaches $8110.
        let mut bus = MockBus::with_program(0x8000, &[0xBD, 0xF0, 0x80]);
        bus.poke(0x8110, 0x80);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.x = 0x20;

        assert_eq!(cpu.step(&mut bus), 5);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.p.contains(Status::NEGATIVE));
    }

    #[test]
    fn lda_absolute_x_within_page() {
        let mut bus = MockBus::with_program(0x8000, &[0xBD, 0x00, 0x02]);
        bus.poke(0x0210, 0x00);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.x = 0x10;

        assert_eq!(cpu.step(&mut bus), 4);
        assert!(cpu.p.contains(Status::ZERO));
    }

    #[test]
    fn sta_indirect_y_always_pays_full_cost() {
        // STA ($10),Y with pointer $02F0 and Y = 0x20 crosses into $0310.
        let mut bus = MockBus::with_program(0x8000, &[0x91, 0x10]);
        bus.poke(0x10, 0xF0);
        bus.poke(0x11, 0x02);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.a = 0x5A;
        cpu.y = 0x20;

        assert_eq!(cpu.step(&mut bus), 6);
        assert_eq!(bus.peek(0x0310), 0x5A);
    }

    #[test]
    fn ldx_zero_page_y_wraps() {
        let mut bus = MockBus::with_program(0x8000, &[0xB6, 0xF0]);
        bus.poke(0x0010, 0x42);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.y = 0x20;

        assert_eq!(cpu.step(&mut bus), 4);
        assert_eq!(cpu.x, 0x42);
    }
}
