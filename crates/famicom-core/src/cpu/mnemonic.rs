use std::fmt::Display;

use crate::{
    bus::Bus,
    cpu::{Cpu, instruction::Instruction},
};

mod arith;
mod bra;
mod ctrl;
mod flags;
mod inc;
mod load;
mod logic;
mod shift;
mod stack;
mod trans;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    //Load/Store
    LAS,
    LAX,
    LDA,
    LDX,
    LDY,
    SAX,
    SHA,
    SHX,
    SHY,
    STA,
    STX,
    STY,
    //Transfer
    SHS,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    //Stack
    PHA,
    PHP,
    PLA,
    PLP,
    //Shift
    ASL,
    LSR,
    ROL,
    ROR,
    //Logic
    AND,
    BIT,
    EOR,
    ORA,
    //Arithmetic
    ADC,
    ANC,
    ARR,
    ASR,
    CMP,
    CPX,
    CPY,
    DCP,
    ISC,
    RLA,
    RRA,
    SBC,
    SBX,
    SLO,
    SRE,
    XAA,
    //Arithmetic: Inc/Dec
    DEC,
    DEX,
    DEY,
    INC,
    INX,
    INY,
    //Control Flow
    BRK,
    JMP,
    JSR,
    RTI,
    RTS,
    //Control Flow: Branch
    BCC,
    BCS,
    BEQ,
    BMI,
    BNE,
    BPL,
    BVC,
    BVS,
    //Flags
    CLC,
    CLD,
    CLI,
    CLV,
    SEC,
    SED,
    SEI,
    //KIL
    JAM,
    //NOP
    NOP,
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{:?}", self).to_lowercase())
    }
}

impl Cpu {
    /// Runs the handler for an official opcode.
    ///
    /// `addr` is the effective address resolved for `instr.addressing`
    /// (unused by implied and accumulator forms). Undocumented mnemonics are
    /// filtered out by the caller and fall through here as no-ops.
    pub(super) fn execute(&mut self, bus: &mut impl Bus, instr: &Instruction, addr: u16) {
        let mode = instr.addressing;
        match instr.mnemonic {
            Mnemonic::LDA => self.a = self.load(bus, addr),
            Mnemonic::LDX => self.x = self.load(bus, addr),
            Mnemonic::LDY => self.y = self.load(bus, addr),
            Mnemonic::STA => bus.write(addr, self.a),
            Mnemonic::STX => bus.write(addr, self.x),
            Mnemonic::STY => bus.write(addr, self.y),

            Mnemonic::TAX => self.x = self.transfer(self.a),
            Mnemonic::TAY => self.y = self.transfer(self.a),
            Mnemonic::TSX => self.x = self.transfer(self.s),
            Mnemonic::TXA => self.a = self.transfer(self.x),
            Mnemonic::TYA => self.a = self.transfer(self.y),
            Mnemonic::TXS => self.s = self.x,

            Mnemonic::PHA => self.pha(bus),
            Mnemonic::PHP => self.php(bus),
            Mnemonic::PLA => self.pla(bus),
            Mnemonic::PLP => self.plp(bus),

            Mnemonic::ASL => self.asl(bus, addr, mode),
            Mnemonic::LSR => self.lsr(bus, addr, mode),
            Mnemonic::ROL => self.rol(bus, addr, mode),
            Mnemonic::ROR => self.ror(bus, addr, mode),

            Mnemonic::AND => self.and(bus, addr),
            Mnemonic::BIT => self.bit(bus, addr),
            Mnemonic::EOR => self.eor(bus, addr),
            Mnemonic::ORA => self.ora(bus, addr),

            Mnemonic::ADC => self.adc(bus, addr),
            Mnemonic::SBC => self.sbc(bus, addr),
            Mnemonic::CMP => self.compare(bus, self.a, addr),
            Mnemonic::CPX => self.compare(bus, self.x, addr),
            Mnemonic::CPY => self.compare(bus, self.y, addr),

            Mnemonic::DEC => self.step_memory(bus, addr, u8::wrapping_sub),
            Mnemonic::INC => self.step_memory(bus, addr, u8::wrapping_add),
            Mnemonic::DEX => self.x = self.step_register(self.x, u8::wrapping_sub),
            Mnemonic::DEY => self.y = self.step_register(self.y, u8::wrapping_sub),
            Mnemonic::INX => self.x = self.step_register(self.x, u8::wrapping_add),
            Mnemonic::INY => self.y = self.step_register(self.y, u8::wrapping_add),

            Mnemonic::BRK => self.brk(bus),
            Mnemonic::JMP => self.pc = addr,
            Mnemonic::JSR => self.jsr(bus, addr),
            Mnemonic::RTI => self.rti(bus),
            Mnemonic::RTS => self.rts(bus),

            Mnemonic::BCC => self.branch(!self.carry(), addr),
            Mnemonic::BCS => self.branch(self.carry(), addr),
            Mnemonic::BEQ => self.branch(self.zero(), addr),
            Mnemonic::BNE => self.branch(!self.zero(), addr),
            Mnemonic::BMI => self.branch(self.negative(), addr),
            Mnemonic::BPL => self.branch(!self.negative(), addr),
            Mnemonic::BVS => self.branch(self.overflow(), addr),
            Mnemonic::BVC => self.branch(!self.overflow(), addr),

            Mnemonic::CLC => self.clc(),
            Mnemonic::CLD => self.cld(),
            Mnemonic::CLI => self.cli(),
            Mnemonic::CLV => self.clv(),
            Mnemonic::SEC => self.sec(),
            Mnemonic::SED => self.sed(),
            Mnemonic::SEI => self.sei(),

            Mnemonic::NOP
            | Mnemonic::JAM
            | Mnemonic::LAS
            | Mnemonic::LAX
            | Mnemonic::SAX
            | Mnemonic::SHA
            | Mnemonic::SHX
            | Mnemonic::SHY
            | Mnemonic::SHS
            | Mnemonic::ANC
            | Mnemonic::ARR
            | Mnemonic::ASR
            | Mnemonic::DCP
            | Mnemonic::ISC
            | Mnemonic::RLA
            | Mnemonic::RRA
            | Mnemonic::SBX
            | Mnemonic::SLO
            | Mnemonic::SRE
            | Mnemonic::XAA => {}
        }
    }
}
