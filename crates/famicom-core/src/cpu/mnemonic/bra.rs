use crate::cpu::{Cpu, pages_differ};

impl Cpu {
    /// Conditional branch to the precomputed relative `target`.
    ///
    /// Taking the branch costs one cycle, plus one more when the target sits
    /// on a different page from the following instruction.
    pub(super) fn branch(&mut self, taken: bool, target: u16) {
        if !taken {
            return;
        }
        let next = self.pc;
        self.pc = target;
        self.cycles += 1;
        if pages_differ(next, target) {
            self.cycles += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{bus::mock::MockBus, cpu::Cpu};

    fn run_bne(pc: u16, offset: u8, zero: bool) -> (u32, u16) {
        let mut bus = MockBus::with_program(pc, &[0xD0, offset]);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        if zero {
            cpu.p.insert(crate::cpu::status::Status::ZERO);
        }
        let cycles = cpu.step(&mut bus);
        (cycles, cpu.pc)
    }

    #[test]
    fn not_taken_costs_two() {
        assert_eq!(run_bne(0x8000, 0x10, true), (2, 0x8002));
    }

    #[test]
    fn taken_same_page_costs_three() {
        assert_eq!(run_bne(0x8000, 0x10, false), (3, 0x8012));
    }

    #[test]
    fn taken_backwards_across_page_costs_four() {
        // 0x8002 - 4 = 0x7FFE
        assert_eq!(run_bne(0x8000, 0xFC, false), (4, 0x7FFE));
    }

    #[test]
    fn page_check_uses_next_instruction_address() {
        // Branch at $80FE: next PC is $8100, target $8100 + 1 stays on its page.
        assert_eq!(run_bne(0x80FE, 0x01, false), (3, 0x8101));
    }
}
