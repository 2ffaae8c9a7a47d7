use crate::cpu::{Cpu, status::Status};

impl Cpu {
    pub(super) fn clc(&mut self) {
        self.p.remove(Status::CARRY);
    }

    pub(super) fn cld(&mut self) {
        self.p.remove(Status::DECIMAL);
    }

    pub(super) fn cli(&mut self) {
        self.p.remove(Status::INTERRUPT);
    }

    pub(super) fn clv(&mut self) {
        self.p.remove(Status::OVERFLOW);
    }

    pub(super) fn sec(&mut self) {
        self.p.insert(Status::CARRY);
    }

    /// Only sets the bit; there is no decimal arithmetic.
    pub(super) fn sed(&mut self) {
        self.p.insert(Status::DECIMAL);
    }

    pub(super) fn sei(&mut self) {
        self.p.insert(Status::INTERRUPT);
    }

    pub(super) fn carry(&self) -> bool {
        self.p.contains(Status::CARRY)
    }

    pub(super) fn zero(&self) -> bool {
        self.p.contains(Status::ZERO)
    }

    pub(super) fn negative(&self) -> bool {
        self.p.contains(Status::NEGATIVE)
    }

    pub(super) fn overflow(&self) -> bool {
        self.p.contains(Status::OVERFLOW)
    }
}
