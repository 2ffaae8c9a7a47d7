use crate::{bus::Bus, cpu::Cpu};

impl Cpu {
    /// INC/DEC on memory; `op` is `u8::wrapping_add` or `u8::wrapping_sub`.
    pub(super) fn step_memory(&mut self, bus: &mut impl Bus, addr: u16, op: fn(u8, u8) -> u8) {
        let value = op(bus.read(addr), 1);
        bus.write(addr, value);
        self.p.update_zn(value);
    }

    /// INX/INY/DEX/DEY.
    pub(super) fn step_register(&mut self, register: u8, op: fn(u8, u8) -> u8) -> u8 {
        let value = op(register, 1);
        self.p.update_zn(value);
        value
    }
}
