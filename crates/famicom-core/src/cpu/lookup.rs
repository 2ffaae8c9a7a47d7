use crate::cpu::addressing::Addressing as A;
use crate::cpu::instruction::Instruction as I;
use crate::cpu::mnemonic::Mnemonic as M;

// Short aliases for addressing modes (to keep the 16x16 table readable)
const IMP: A = A::Implied;
const ACC: A = A::Accumulator;
const IMM: A = A::Immediate;
const REL: A = A::Relative;
const ZP: A = A::ZeroPage;
const ZPX: A = A::ZeroPageX;
const ZPY: A = A::ZeroPageY;
const ABS: A = A::Absolute;
const ABX: A = A::AbsoluteX;
const ABY: A = A::AbsoluteY;
const IND: A = A::Indirect;
const INX: A = A::IndirectX;
const INY: A = A::IndirectY;

// op!(mnemonic, mode, size, cycles, page-cross cycles)
macro_rules! op {
    ($ins:ident, $addr:ident, $size:literal, $cycles:literal, $page:literal) => {
        I::new(M::$ins, $addr, $size, $cycles, $page, true)
    };
}

// Undocumented opcodes: decoded for size/timing, executed as NOP.
// $EB is the exception and runs through op! as an SBC #imm alias.
macro_rules! ill {
    ($ins:ident, $addr:ident, $size:literal, $cycles:literal, $page:literal) => {
        I::new(M::$ins, $addr, $size, $cycles, $page, false)
    };
}

#[rustfmt::skip]
pub(crate) static LOOKUP_TABLE: [I; 256] = [
    // 0x00
    op!(BRK, IMP, 1, 7, 0),   op!(ORA, INX, 2, 6, 0),   ill!(JAM, IMP, 0, 2, 0),  ill!(SLO, INX, 0, 8, 0),  ill!(NOP, ZP, 2, 3, 0),   op!(ORA, ZP, 2, 3, 0),    op!(ASL, ZP, 2, 5, 0),    ill!(SLO, ZP, 0, 5, 0),
    op!(PHP, IMP, 1, 3, 0),   op!(ORA, IMM, 2, 2, 0),   op!(ASL, ACC, 1, 2, 0),   ill!(ANC, IMM, 0, 2, 0),  ill!(NOP, ABS, 3, 4, 0),  op!(ORA, ABS, 3, 4, 0),   op!(ASL, ABS, 3, 6, 0),   ill!(SLO, ABS, 0, 6, 0),

    // 0x10
    op!(BPL, REL, 2, 2, 1),   op!(ORA, INY, 2, 5, 1),   ill!(JAM, IMP, 0, 2, 0),  ill!(SLO, INY, 0, 8, 0),  ill!(NOP, ZPX, 2, 4, 0),  op!(ORA, ZPX, 2, 4, 0),   op!(ASL, ZPX, 2, 6, 0),   ill!(SLO, ZPX, 0, 6, 0),
    op!(CLC, IMP, 1, 2, 0),   op!(ORA, ABY, 3, 4, 1),   ill!(NOP, IMP, 1, 2, 0),  ill!(SLO, ABY, 0, 7, 0),  ill!(NOP, ABX, 3, 4, 1),  op!(ORA, ABX, 3, 4, 1),   op!(ASL, ABX, 3, 7, 0),   ill!(SLO, ABX, 0, 7, 0),

    // 0x20
    op!(JSR, ABS, 3, 6, 0),   op!(AND, INX, 2, 6, 0),   ill!(JAM, IMP, 0, 2, 0),  ill!(RLA, INX, 0, 8, 0),  op!(BIT, ZP, 2, 3, 0),    op!(AND, ZP, 2, 3, 0),    op!(ROL, ZP, 2, 5, 0),    ill!(RLA, ZP, 0, 5, 0),
    op!(PLP, IMP, 1, 4, 0),   op!(AND, IMM, 2, 2, 0),   op!(ROL, ACC, 1, 2, 0),   ill!(ANC, IMM, 0, 2, 0),  op!(BIT, ABS, 3, 4, 0),   op!(AND, ABS, 3, 4, 0),   op!(ROL, ABS, 3, 6, 0),   ill!(RLA, ABS, 0, 6, 0),

    // 0x30
    op!(BMI, REL, 2, 2, 1),   op!(AND, INY, 2, 5, 1),   ill!(JAM, IMP, 0, 2, 0),  ill!(RLA, INY, 0, 8, 0),  ill!(NOP, ZPX, 2, 4, 0),  op!(AND, ZPX, 2, 4, 0),   op!(ROL, ZPX, 2, 6, 0),   ill!(RLA, ZPX, 0, 6, 0),
    op!(SEC, IMP, 1, 2, 0),   op!(AND, ABY, 3, 4, 1),   ill!(NOP, IMP, 1, 2, 0),  ill!(RLA, ABY, 0, 7, 0),  ill!(NOP, ABX, 3, 4, 1),  op!(AND, ABX, 3, 4, 1),   op!(ROL, ABX, 3, 7, 0),   ill!(RLA, ABX, 0, 7, 0),

    // 0x40
    op!(RTI, IMP, 1, 6, 0),   op!(EOR, INX, 2, 6, 0),   ill!(JAM, IMP, 0, 2, 0),  ill!(SRE, INX, 0, 8, 0),  ill!(NOP, ZP, 2, 3, 0),   op!(EOR, ZP, 2, 3, 0),    op!(LSR, ZP, 2, 5, 0),    ill!(SRE, ZP, 0, 5, 0),
    op!(PHA, IMP, 1, 3, 0),   op!(EOR, IMM, 2, 2, 0),   op!(LSR, ACC, 1, 2, 0),   ill!(ASR, IMM, 0, 2, 0),  op!(JMP, ABS, 3, 3, 0),   op!(EOR, ABS, 3, 4, 0),   op!(LSR, ABS, 3, 6, 0),   ill!(SRE, ABS, 0, 6, 0),

    // 0x50
    op!(BVC, REL, 2, 2, 1),   op!(EOR, INY, 2, 5, 1),   ill!(JAM, IMP, 0, 2, 0),  ill!(SRE, INY, 0, 8, 0),  ill!(NOP, ZPX, 2, 4, 0),  op!(EOR, ZPX, 2, 4, 0),   op!(LSR, ZPX, 2, 6, 0),   ill!(SRE, ZPX, 0, 6, 0),
    op!(CLI, IMP, 1, 2, 0),   op!(EOR, ABY, 3, 4, 1),   ill!(NOP, IMP, 1, 2, 0),  ill!(SRE, ABY, 0, 7, 0),  ill!(NOP, ABX, 3, 4, 1),  op!(EOR, ABX, 3, 4, 1),   op!(LSR, ABX, 3, 7, 0),   ill!(SRE, ABX, 0, 7, 0),

    // 0x60
    op!(RTS, IMP, 1, 6, 0),   op!(ADC, INX, 2, 6, 0),   ill!(JAM, IMP, 0, 2, 0),  ill!(RRA, INX, 0, 8, 0),  ill!(NOP, ZP, 2, 3, 0),   op!(ADC, ZP, 2, 3, 0),    op!(ROR, ZP, 2, 5, 0),    ill!(RRA, ZP, 0, 5, 0),
    op!(PLA, IMP, 1, 4, 0),   op!(ADC, IMM, 2, 2, 0),   op!(ROR, ACC, 1, 2, 0),   ill!(ARR, IMM, 0, 2, 0),  op!(JMP, IND, 3, 5, 0),   op!(ADC, ABS, 3, 4, 0),   op!(ROR, ABS, 3, 6, 0),   ill!(RRA, ABS, 0, 6, 0),

    // 0x70
    op!(BVS, REL, 2, 2, 1),   op!(ADC, INY, 2, 5, 1),   ill!(JAM, IMP, 0, 2, 0),  ill!(RRA, INY, 0, 8, 0),  ill!(NOP, ZPX, 2, 4, 0),  op!(ADC, ZPX, 2, 4, 0),   op!(ROR, ZPX, 2, 6, 0),   ill!(RRA, ZPX, 0, 6, 0),
    op!(SEI, IMP, 1, 2, 0),   op!(ADC, ABY, 3, 4, 1),   ill!(NOP, IMP, 1, 2, 0),  ill!(RRA, ABY, 0, 7, 0),  ill!(NOP, ABX, 3, 4, 1),  op!(ADC, ABX, 3, 4, 1),   op!(ROR, ABX, 3, 7, 0),   ill!(RRA, ABX, 0, 7, 0),

    // 0x80
    ill!(NOP, IMM, 2, 2, 0),  op!(STA, INX, 2, 6, 0),   ill!(NOP, IMM, 0, 2, 0),  ill!(SAX, INX, 0, 6, 0),  op!(STY, ZP, 2, 3, 0),    op!(STA, ZP, 2, 3, 0),    op!(STX, ZP, 2, 3, 0),    ill!(SAX, ZP, 0, 3, 0),
    op!(DEY, IMP, 1, 2, 0),   ill!(NOP, IMM, 0, 2, 0),  op!(TXA, IMP, 1, 2, 0),   ill!(XAA, IMM, 0, 2, 0),  op!(STY, ABS, 3, 4, 0),   op!(STA, ABS, 3, 4, 0),   op!(STX, ABS, 3, 4, 0),   ill!(SAX, ABS, 0, 4, 0),

    // 0x90
    op!(BCC, REL, 2, 2, 1),   op!(STA, INY, 2, 6, 0),   ill!(JAM, IMP, 0, 2, 0),  ill!(SHA, INY, 0, 6, 0),  op!(STY, ZPX, 2, 4, 0),   op!(STA, ZPX, 2, 4, 0),   op!(STX, ZPY, 2, 4, 0),   ill!(SAX, ZPY, 0, 4, 0),
    op!(TYA, IMP, 1, 2, 0),   op!(STA, ABY, 3, 5, 0),   op!(TXS, IMP, 1, 2, 0),   ill!(SHS, ABY, 0, 5, 0),  ill!(SHY, ABX, 0, 5, 0),  op!(STA, ABX, 3, 5, 0),   ill!(SHX, ABY, 0, 5, 0),  ill!(SHA, ABY, 0, 5, 0),

    // 0xA0
    op!(LDY, IMM, 2, 2, 0),   op!(LDA, INX, 2, 6, 0),   op!(LDX, IMM, 2, 2, 0),   ill!(LAX, INX, 0, 6, 0),  op!(LDY, ZP, 2, 3, 0),    op!(LDA, ZP, 2, 3, 0),    op!(LDX, ZP, 2, 3, 0),    ill!(LAX, ZP, 0, 3, 0),
    op!(TAY, IMP, 1, 2, 0),   op!(LDA, IMM, 2, 2, 0),   op!(TAX, IMP, 1, 2, 0),   ill!(LAX, IMM, 0, 2, 0),  op!(LDY, ABS, 3, 4, 0),   op!(LDA, ABS, 3, 4, 0),   op!(LDX, ABS, 3, 4, 0),   ill!(LAX, ABS, 0, 4, 0),

    // 0xB0
    op!(BCS, REL, 2, 2, 1),   op!(LDA, INY, 2, 5, 1),   ill!(JAM, IMP, 0, 2, 0),  ill!(LAX, INY, 0, 5, 1),  op!(LDY, ZPX, 2, 4, 0),   op!(LDA, ZPX, 2, 4, 0),   op!(LDX, ZPY, 2, 4, 0),   ill!(LAX, ZPY, 0, 4, 0),
    op!(CLV, IMP, 1, 2, 0),   op!(LDA, ABY, 3, 4, 1),   op!(TSX, IMP, 1, 2, 0),   ill!(LAS, ABY, 0, 4, 1),  op!(LDY, ABX, 3, 4, 1),   op!(LDA, ABX, 3, 4, 1),   op!(LDX, ABY, 3, 4, 1),   ill!(LAX, ABY, 0, 4, 1),

    // 0xC0
    op!(CPY, IMM, 2, 2, 0),   op!(CMP, INX, 2, 6, 0),   ill!(NOP, IMM, 0, 2, 0),  ill!(DCP, INX, 0, 8, 0),  op!(CPY, ZP, 2, 3, 0),    op!(CMP, ZP, 2, 3, 0),    op!(DEC, ZP, 2, 5, 0),    ill!(DCP, ZP, 0, 5, 0),
    op!(INY, IMP, 1, 2, 0),   op!(CMP, IMM, 2, 2, 0),   op!(DEX, IMP, 1, 2, 0),   ill!(SBX, IMM, 0, 2, 0),  op!(CPY, ABS, 3, 4, 0),   op!(CMP, ABS, 3, 4, 0),   op!(DEC, ABS, 3, 6, 0),   ill!(DCP, ABS, 0, 6, 0),

    // 0xD0
    op!(BNE, REL, 2, 2, 1),   op!(CMP, INY, 2, 5, 1),   ill!(JAM, IMP, 0, 2, 0),  ill!(DCP, INY, 0, 8, 0),  ill!(NOP, ZPX, 2, 4, 0),  op!(CMP, ZPX, 2, 4, 0),   op!(DEC, ZPX, 2, 6, 0),   ill!(DCP, ZPX, 0, 6, 0),
    op!(CLD, IMP, 1, 2, 0),   op!(CMP, ABY, 3, 4, 1),   ill!(NOP, IMP, 1, 2, 0),  ill!(DCP, ABY, 0, 7, 0),  ill!(NOP, ABX, 3, 4, 1),  op!(CMP, ABX, 3, 4, 1),   op!(DEC, ABX, 3, 7, 0),   ill!(DCP, ABX, 0, 7, 0),

    // 0xE0
    op!(CPX, IMM, 2, 2, 0),   op!(SBC, INX, 2, 6, 0),   ill!(NOP, IMM, 0, 2, 0),  ill!(ISC, INX, 0, 8, 0),  op!(CPX, ZP, 2, 3, 0),    op!(SBC, ZP, 2, 3, 0),    op!(INC, ZP, 2, 5, 0),    ill!(ISC, ZP, 0, 5, 0),
    op!(INX, IMP, 1, 2, 0),   op!(SBC, IMM, 2, 2, 0),   op!(NOP, IMP, 1, 2, 0),   op!(SBC, IMM, 2, 2, 0),   op!(CPX, ABS, 3, 4, 0),   op!(SBC, ABS, 3, 4, 0),   op!(INC, ABS, 3, 6, 0),   ill!(ISC, ABS, 0, 6, 0),

    // 0xF0
    op!(BEQ, REL, 2, 2, 1),   op!(SBC, INY, 2, 5, 1),   ill!(JAM, IMP, 0, 2, 0),  ill!(ISC, INY, 0, 8, 0),  ill!(NOP, ZPX, 2, 4, 0),  op!(SBC, ZPX, 2, 4, 0),   op!(INC, ZPX, 2, 6, 0),   ill!(ISC, ZPX, 0, 6, 0),
    op!(SED, IMP, 1, 2, 0),   op!(SBC, ABY, 3, 4, 1),   ill!(NOP, IMP, 1, 2, 0),  ill!(ISC, ABY, 0, 7, 0),  ill!(NOP, ABX, 3, 4, 1),  op!(SBC, ABX, 3, 4, 1),   op!(INC, ABX, 3, 7, 0),   ill!(ISC, ABX, 0, 7, 0),
];
