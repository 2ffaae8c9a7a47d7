use super::VramAddr;

/// Internal VRAM register block (`v/t/x/w`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) struct VramRegisters {
    /// Current VRAM address (`v`).
    pub(crate) v: VramAddr,
    /// Temporary VRAM address (`t`).
    pub(crate) t: VramAddr,
    /// Fine X scroll (`x`, 0..7).
    pub(crate) x: u8,
    /// Write toggle (`w`): false => first write, true => second write.
    pub(crate) w: bool,
}

impl VramRegisters {
    /// `$2005`: coarse/fine X on the first write, coarse/fine Y on the second.
    pub(crate) fn write_scroll(&mut self, value: u8) {
        if !self.w {
            self.t.set_coarse_x(value >> 3);
            self.x = value & 0b111;
        } else {
            self.t.set_coarse_y(value >> 3);
            self.t.set_fine_y(value & 0b111);
        }
        self.w = !self.w;
    }

    /// `$2006`: high six bits, then low byte. The second write copies `t`
    /// into `v`.
    pub(crate) fn write_addr(&mut self, value: u8) {
        if !self.w {
            let hi = u16::from(value & 0b0011_1111) << 8;
            let lo = self.t.raw() & 0x00FF;
            self.t.set_raw(hi | lo);
        } else {
            let hi = self.t.raw() & 0x7F00;
            self.t.set_raw(hi | u16::from(value));
            self.v = self.t;
        }
        self.w = !self.w;
    }

    pub(crate) fn reset_latch(&mut self) {
        self.w = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_writes_split_across_t_and_x() {
        let mut regs = VramRegisters::default();
        regs.write_scroll(0b1010_1101);
        assert_eq!((regs.t.coarse_x(), regs.x, regs.w), (0b10101, 0b101, true));
        regs.write_scroll(0b0110_0011);
        assert_eq!((regs.t.coarse_y(), regs.t.fine_y(), regs.w), (0b01100, 0b011, false));
    }

    #[test]
    fn second_addr_write_commits_v() {
        let mut regs = VramRegisters::default();
        regs.write_addr(0xFF);
        assert_eq!(regs.v.raw(), 0);
        regs.write_addr(0x34);
        assert_eq!(regs.v.raw(), 0x3F34);
    }
}
