use bitflags::bitflags;

bitflags! {
    /// Processor status register (P).
    ///
    /// Bit layout:
    /// 7 6 5 4 3 2 1 0
    /// N V _ B D I Z C
    ///
    /// `BREAK` and `UNUSED` have no storage in the real chip; they only
    /// exist in the byte pushed to the stack. The register keeps `UNUSED`
    /// set so pushed and pulled values line up with hardware.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry out of bit 7, or "no borrow" after a subtraction.
        const CARRY     = 0b0000_0001;

        /// Result was zero.
        const ZERO      = 0b0000_0010;

        /// Masks IRQ (NMI is unaffected).
        const INTERRUPT = 0b0000_0100;

        /// Stored and restored, but the 2A03 has no BCD unit.
        const DECIMAL   = 0b0000_1000;

        /// Set in the pushed byte for PHP/BRK, clear for NMI/IRQ.
        const BREAK     = 0b0001_0000;

        const UNUSED    = 0b0010_0000;

        /// Signed overflow.
        const OVERFLOW  = 0b0100_0000;

        /// Bit 7 of the result.
        const NEGATIVE  = 0b1000_0000;
    }
}

impl Status {
    /// Value after power-on and reset: interrupts masked, bit 5 set.
    pub const RESET: Status = Status::from_bits_truncate(0x24);

    /// Set or clear the Zero flag based on a value.
    pub fn update_zero(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
    }

    /// Set or clear the Negative flag based on bit 7 of a value.
    pub fn update_negative(&mut self, value: u8) {
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    pub fn update_zn(&mut self, value: u8) {
        self.update_zero(value);
        self.update_negative(value);
    }

    /// Byte pushed by PHP and BRK.
    pub fn pushed_by_instruction(self) -> u8 {
        (self | Status::BREAK | Status::UNUSED).bits()
    }

    /// Byte pushed when servicing NMI or IRQ.
    pub fn pushed_by_interrupt(self) -> u8 {
        ((self - Status::BREAK) | Status::UNUSED).bits()
    }

    /// Register value after PLP/RTI pulls `byte`.
    pub fn pulled(byte: u8) -> Self {
        (Status::from_bits_truncate(byte) - Status::BREAK) | Status::UNUSED
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::RESET
    }
}
