use std::fmt::Display;

use tracing::{debug, warn};

use crate::bus::Bus;
use crate::cpu::addressing::Addressing;
use crate::cpu::instruction::Instruction;
use crate::cpu::lookup::LOOKUP_TABLE;
use crate::memory::cpu as cpu_mem;

pub use crate::cpu::status::Status;

mod status;

pub mod addressing;
pub mod instruction;
mod lookup;
pub mod mnemonic;

/// Cycles charged for servicing NMI or IRQ.
const INTERRUPT_CYCLES: u64 = 7;
/// OAM DMA stall on an even CPU cycle; odd cycles add one alignment cycle.
const OAM_DMA_CYCLES: u32 = 513;

/// Interrupt latched for the next instruction boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    #[default]
    None,
    Nmi,
    Irq,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpu {
    // Registers
    a: u8,     //Accumulator
    x: u8,     //X Index Register
    y: u8,     //Y Index Register
    s: u8,     //Stack Pointer
    p: Status, //Processor Status
    pc: u16,   //Program Counter

    cycles: u64,
    stall: u32,
    interrupt: Interrupt,
    /// One bit per opcode, set once the undocumented opcode has been logged.
    reported: [u64; 4],
}

impl Cpu {
    /// Create a new CPU instance with power-on register values.
    /// Does not fetch the reset vector; call `reset()` for that.
    pub fn new() -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            s: 0xFD,
            p: Status::RESET,
            pc: 0x0000,
            cycles: 0,
            stall: 0,
            interrupt: Interrupt::None,
            reported: [0; 4],
        }
    }

    /// Loads PC from the reset vector at `$FFFC/$FFFD` and restores SP and P.
    ///
    /// The cycle counter keeps running; pending stalls and interrupts are
    /// dropped.
    pub fn reset(&mut self, bus: &mut impl Bus) {
        self.pc = self.read16(bus, cpu_mem::RESET_VECTOR);
        self.s = 0xFD;
        self.p = Status::RESET;
        self.stall = 0;
        self.interrupt = Interrupt::None;
        debug!(pc = format_args!("{:#06X}", self.pc), "cpu reset");
    }

    /// Advances the CPU by one unit of work and returns the cycles it took.
    ///
    /// An outstanding DMA stall consumes exactly one cycle. Otherwise any
    /// latched interrupt is serviced and one instruction executes; the
    /// result covers both. A `$4014` write during the instruction adds the
    /// OAM DMA stall for the following steps.
    pub fn step(&mut self, bus: &mut impl Bus) -> u32 {
        if self.stall > 0 {
            self.stall -= 1;
            return 1;
        }

        let start = self.cycles;
        self.dispatch_interrupt(bus);

        let opcode = bus.read(self.pc);
        let instr = &LOOKUP_TABLE[opcode as usize];
        let (addr, crossed) = self.effective_address(bus, instr.addressing);

        self.pc = self.pc.wrapping_add(instr.size as u16);
        self.cycles += instr.cycles as u64;
        if crossed {
            self.cycles += instr.page_cycles as u64;
        }

        if instr.official {
            self.execute(bus, instr, addr);
        } else {
            self.report_undocumented(opcode, instr);
        }

        if bus.take_oam_dma_request().is_some() {
            self.stall += OAM_DMA_CYCLES + (self.cycles & 1) as u32;
        }

        (self.cycles - start) as u32
    }

    /// Services the latched interrupt, if any. NMI wins over IRQ.
    ///
    /// Pushes PC and P (B clear, bit 5 set), masks IRQ, loads the vector and
    /// charges 7 cycles. The latch is always cleared.
    pub fn dispatch_interrupt(&mut self, bus: &mut impl Bus) {
        let vector = match self.interrupt {
            Interrupt::None => return,
            Interrupt::Nmi => cpu_mem::NMI_VECTOR,
            Interrupt::Irq => cpu_mem::IRQ_VECTOR,
        };
        self.push16(bus, self.pc);
        self.push(bus, self.p.pushed_by_interrupt());
        self.pc = self.read16(bus, vector);
        self.p.insert(Status::INTERRUPT);
        self.cycles += INTERRUPT_CYCLES;
        self.interrupt = Interrupt::None;
    }

    pub fn trigger_nmi(&mut self) {
        self.interrupt = Interrupt::Nmi;
    }

    /// Latches an IRQ unless the I flag masks it.
    pub fn trigger_irq(&mut self) {
        if !self.p.contains(Status::INTERRUPT) {
            self.interrupt = Interrupt::Irq;
        }
    }

    /// Adds `cycles` of DMA stall to be consumed by subsequent steps.
    pub fn stall(&mut self, cycles: u32) {
        self.stall += cycles;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn s(&self) -> u8 {
        self.s
    }

    pub fn p(&self) -> Status {
        self.p
    }

    /// Total cycles charged by instructions and interrupts. Stall cycles are
    /// not included.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn pending_stall(&self) -> u32 {
        self.stall
    }

    pub fn pending_interrupt(&self) -> Interrupt {
        self.interrupt
    }

    /// Resolves the operand address for `mode`, reading operand bytes at
    /// `pc + 1..`. Returns whether indexing crossed a page.
    fn effective_address(&mut self, bus: &mut impl Bus, mode: Addressing) -> (u16, bool) {
        let operand = self.pc.wrapping_add(1);
        match mode {
            Addressing::Implied | Addressing::Accumulator => (0, false),
            Addressing::Immediate => (operand, false),
            Addressing::Absolute => (self.read16(bus, operand), false),
            Addressing::AbsoluteX => Self::indexed(self.read16(bus, operand), self.x),
            Addressing::AbsoluteY => Self::indexed(self.read16(bus, operand), self.y),
            Addressing::Indirect => {
                let pointer = self.read16(bus, operand);
                (self.read16_wrapped(bus, pointer), false)
            }
            Addressing::ZeroPage => (bus.read(operand) as u16, false),
            Addressing::ZeroPageX => (bus.read(operand).wrapping_add(self.x) as u16, false),
            Addressing::ZeroPageY => (bus.read(operand).wrapping_add(self.y) as u16, false),
            Addressing::IndirectX => {
                let pointer = bus.read(operand).wrapping_add(self.x) as u16;
                (self.read16_wrapped(bus, pointer), false)
            }
            Addressing::IndirectY => {
                let pointer = bus.read(operand) as u16;
                let base = self.read16_wrapped(bus, pointer);
                Self::indexed(base, self.y)
            }
            Addressing::Relative => {
                let offset = bus.read(operand) as i8;
                let next = self.pc.wrapping_add(2);
                (next.wrapping_add_signed(offset as i16), false)
            }
        }
    }

    fn indexed(base: u16, index: u8) -> (u16, bool) {
        let addr = base.wrapping_add(index as u16);
        (addr, pages_differ(base, addr))
    }

    fn report_undocumented(&mut self, opcode: u8, instr: &Instruction) {
        let (word, bit) = ((opcode >> 6) as usize, opcode & 0x3F);
        if self.reported[word] & (1 << bit) == 0 {
            self.reported[word] |= 1 << bit;
            warn!(
                opcode = format_args!("{opcode:#04X}"),
                pc = format_args!("{:#06X}", self.pc),
                "undocumented opcode {instr} executed as nop"
            );
        }
    }

    pub(crate) fn read16(&self, bus: &mut impl Bus, addr: u16) -> u16 {
        let lo = bus.read(addr) as u16;
        let hi = bus.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// 16-bit read whose high byte comes from the same page as `addr`.
    fn read16_wrapped(&self, bus: &mut impl Bus, addr: u16) -> u16 {
        let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let lo = bus.read(addr) as u16;
        let hi = bus.read(hi_addr) as u16;
        (hi << 8) | lo
    }

    fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(cpu_mem::STACK_PAGE_START | self.s as u16, value);
        self.s = self.s.wrapping_sub(1);
    }

    fn pop(&mut self, bus: &mut impl Bus) -> u8 {
        self.s = self.s.wrapping_add(1);
        bus.read(cpu_mem::STACK_PAGE_START | self.s as u16)
    }

    fn push16(&mut self, bus: &mut impl Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    fn pop16(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        (hi << 8) | lo
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[a:0x{:02x},x:0x{:02x},y:0x{:02x},s:0x{:02x},p:0x{:02x},pc:0x{:04x}]",
            self.a,
            self.x,
            self.y,
            self.s,
            self.p.bits(),
            self.pc
        )
    }
}

fn pages_differ(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::MockBus;

    fn boot(program: &[u8]) -> (Cpu, MockBus) {
        let mut bus = MockBus::with_program(0x8000, program);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    #[test]
    fn reset_loads_vector_and_registers() {
        let (cpu, _) = boot(&[0xEA]);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.s(), 0xFD);
        assert_eq!(cpu.p().bits(), 0x24);
    }

    #[test]
    fn nmi_is_serviced_before_the_next_instruction() {
        let (mut cpu, mut bus) = boot(&[0xEA]);
        bus.set_vector(cpu_mem::NMI_VECTOR, 0x9000);
        bus.poke(0x9000, 0xEA);
        cpu.trigger_nmi();

        // 7 for the interrupt + 2 for the NOP at the handler.
        assert_eq!(cpu.step(&mut bus), 9);
        assert_eq!(cpu.pc(), 0x9001);
        assert_eq!(bus.peek(0x01FD), 0x80);
        assert_eq!(bus.peek(0x01FC), 0x00);
        assert_eq!(bus.peek(0x01FB), 0x24);
        assert!(cpu.p().contains(Status::INTERRUPT));
        assert_eq!(cpu.pending_interrupt(), Interrupt::None);
    }

    #[test]
    fn irq_respects_interrupt_mask() {
        let (mut cpu, mut bus) = boot(&[0x58, 0xEA]);
        bus.set_vector(cpu_mem::IRQ_VECTOR, 0x9000);
        bus.poke(0x9000, 0xEA);

        cpu.trigger_irq();
        assert_eq!(cpu.pending_interrupt(), Interrupt::None);

        // CLI, then the IRQ is accepted.
        cpu.step(&mut bus);
        cpu.trigger_irq();
        assert_eq!(cpu.pending_interrupt(), Interrupt::Irq);
        cpu.step(&mut bus);
        assert_eq!(bus.peek(0x01FB), 0x20);
        assert_eq!(cpu.pc(), 0x9001);
    }

    #[test]
    fn nmi_wins_over_irq() {
        let (mut cpu, mut bus) = boot(&[0x58, 0xEA]);
        bus.set_vector(cpu_mem::NMI_VECTOR, 0xA000);
        bus.set_vector(cpu_mem::IRQ_VECTOR, 0x9000);
        bus.poke(0xA000, 0xEA);
        cpu.step(&mut bus);
        cpu.trigger_irq();
        cpu.trigger_nmi();
        cpu.step(&mut bus);
        assert_eq!(cpu.pc(), 0xA001);
    }

    #[test]
    fn stall_cycles_are_consumed_one_at_a_time() {
        let (mut cpu, mut bus) = boot(&[0xEA]);
        cpu.stall(3);
        for _ in 0..3 {
            assert_eq!(cpu.step(&mut bus), 1);
        }
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.cycles(), 2);
    }

    #[test]
    fn undocumented_opcodes_charge_table_cost() {
        // *NOP zp (2 bytes, 3 cycles), then *JAM which never advances.
        let (mut cpu, mut bus) = boot(&[0x04, 0x10, 0x02]);
        assert_eq!(cpu.step(&mut bus), 3);
        assert_eq!(cpu.pc(), 0x8002);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.step(&mut bus), 2);
        assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn eb_subtracts_like_sbc_immediate() {
        // SEC ; LDA #$10 ; SBC #$01, once through $E9 and once through $EB.
        for opcode in [0xE9, 0xEB] {
            let (mut cpu, mut bus) = boot(&[0x38, 0xA9, 0x10, opcode, 0x01, 0xEA]);
            cpu.step(&mut bus);
            cpu.step(&mut bus);
            assert_eq!(cpu.step(&mut bus), 2, "opcode {opcode:#04X}");
            assert_eq!(cpu.a(), 0x0F, "opcode {opcode:#04X}");
            assert_eq!(cpu.pc(), 0x8005, "opcode {opcode:#04X}");
            assert!(cpu.p().contains(Status::CARRY));
            assert!(!cpu.p().contains(Status::ZERO));
        }
    }

    #[test]
    fn oam_dma_stall_depends_on_cycle_parity() {
        // LDA #$02 ; STA $4014 -> 6 cycles, even.
        let (mut cpu, mut bus) = boot(&[0xA9, 0x02, 0x8D, 0x14, 0x40]);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.pending_stall(), 513);

        // LDA $00 ; STA $4014 -> 7 cycles, odd.
        let (mut cpu, mut bus) = boot(&[0xA5, 0x00, 0x8D, 0x14, 0x40]);
        cpu.step(&mut bus);
        cpu.step(&mut bus);
        assert_eq!(cpu.pending_stall(), 514);
    }
}
