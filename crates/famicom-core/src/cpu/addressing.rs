use std::fmt::Display;

/// Represents the addressing modes supported by the 6502 CPU.
///
/// Addressing modes define how the CPU interprets the operand bytes
/// of an instruction to determine the effective memory address or
/// immediate value for the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// No operand. `CLC`, `RTS`, `NOP`.
    Implied,

    /// Operates on A. `ASL A`, `ROR A`.
    Accumulator,

    /// The byte following the opcode is the operand. `LDA #$42`.
    Immediate,

    /// Full 16-bit address. `STA $1234`.
    Absolute,

    /// `address + X`. Charges the page-cross penalty when the sum leaves
    /// the base page.
    AbsoluteX,

    /// `address + Y`, with the same page-cross rule as [`Addressing::AbsoluteX`].
    AbsoluteY,

    /// JMP only. The pointer's high byte is fetched without carrying into
    /// the page, so `JMP ($10FF)` reads `$10FF` and `$1000`.
    Indirect,

    /// Single byte address in `$0000-$00FF`.
    ZeroPage,

    /// `(zp + X) & 0xFF`.
    ZeroPageX,

    /// `(zp + Y) & 0xFF`.
    ZeroPageY,

    /// `(zp,X)`: pointer at `(zp + X) & 0xFF`, wrapping in the zero page.
    IndirectX,

    /// `(zp),Y`: pointer at `zp`, then `+ Y` with the page-cross penalty.
    IndirectY,

    /// Signed 8-bit displacement from the next instruction.
    Relative,
}

impl Addressing {
    /// Modes whose effective address can cross a page after indexing.
    pub const fn may_cross_page(self) -> bool {
        matches!(
            self,
            Addressing::AbsoluteX | Addressing::AbsoluteY | Addressing::IndirectY
        )
    }
}

impl Display for Addressing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let notation = match self {
            Addressing::Implied => "",
            Addressing::Accumulator => "A",
            Addressing::Immediate => "#imm",
            Addressing::Absolute => "abs",
            Addressing::AbsoluteX => "abs,X",
            Addressing::AbsoluteY => "abs,Y",
            Addressing::Indirect => "(abs)",
            Addressing::ZeroPage => "zp",
            Addressing::ZeroPageX => "zp,X",
            Addressing::ZeroPageY => "zp,Y",
            Addressing::IndirectX => "(zp,X)",
            Addressing::IndirectY => "(zp),Y",
            Addressing::Relative => "rel",
        };
        f.write_str(notation)
    }
}
