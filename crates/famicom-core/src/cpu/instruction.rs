use std::fmt::Display;

use crate::cpu::{addressing::Addressing, mnemonic::Mnemonic};

/// One decoded opcode slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub addressing: Addressing,
    /// Bytes consumed, opcode included. Several undocumented opcodes are
    /// recorded with size 0 and therefore never move PC.
    pub size: u8,
    /// Base cycle cost.
    pub cycles: u8,
    /// Extra cycles charged when indexing crosses a page.
    pub page_cycles: u8,
    /// `false` for undocumented opcodes, which execute as NOP. The `$EB`
    /// alias of SBC is executed and therefore `true`.
    pub official: bool,
}

impl Instruction {
    pub(crate) const fn new(
        mnemonic: Mnemonic,
        addressing: Addressing,
        size: u8,
        cycles: u8,
        page_cycles: u8,
        official: bool,
    ) -> Self {
        Self {
            mnemonic,
            addressing,
            size,
            cycles,
            page_cycles,
            official,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.official {
            f.write_str("*")?;
        }
        match self.addressing {
            Addressing::Implied => write!(f, "{}", self.mnemonic),
            mode => write!(f, "{} {}", self.mnemonic, mode),
        }
    }
}
