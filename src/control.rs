//! Mode-control opcodes (XCE/SEP/REP/XBA/WAI/STP), the register-transfer
//! family, and the simple flag-only/no-op opcodes (CLC/SEC/CLI/SEI/CLD/SED/
//! CLV/NOP).

use crate::{Cpu, Mem};

impl<M: Mem> Cpu<M> {
    /// Exchange Carry and Emulation. The one opcode that can flip `E`;
    /// entering emulation mode forces the 8-bit/page-1-stack rules (see
    /// `Cpu::set_emulation`), entering native mode does not touch anything
    /// else.
    pub(crate) fn xce(&mut self) {
        let carry = self.p.carry();
        self.p.set_carry(self.e);
        self.set_emulation(carry);
    }

    /// Set Processor status bits: ORs the immediate operand into P.
    pub(crate) fn sep(&mut self, value: u8) {
        let new = self.p.0 | value;
        self.set_p(new);
    }

    /// Reset Processor status bits: clears the immediate operand's set bits
    /// from P.
    pub(crate) fn rep(&mut self, value: u8) {
        let new = self.p.0 & !value;
        self.set_p(new);
    }

    /// Exchange the B and A (accumulator high/low) bytes. Always operates
    /// on the full 16-bit `a`, regardless of the M flag, and sets N/Z from
    /// the new low byte (the datasheet's one 8-bit-flavored exception among
    /// the transfer opcodes).
    pub(crate) fn xba(&mut self) {
        let (hi, lo) = ((self.a >> 8) as u8, self.a as u8);
        self.a = ((lo as u16) << 8) | hi as u16;
        self.p.set_nz_8(hi);
    }

    /// Wait for Interrupt: halts dispatch (see `Cpu::step`) until an IRQ or
    /// NMI is delivered.
    pub(crate) fn wai(&mut self) {
        self.waiting = true;
    }

    /// Stop the Clock: halts dispatch until a hardware reset. Modeled by
    /// setting `stopped`, which `Cpu::step` checks before doing any work;
    /// `Cpu::reset` is the only thing that clears it, matching real
    /// hardware's "STP can only be exited by RESET" behavior.
    pub(crate) fn stp(&mut self) {
        self.stopped = true;
    }

    pub(crate) fn tax(&mut self) {
        if self.p.small_index() {
            let val = self.p.set_nz_8(self.a as u8);
            self.x = val as u16;
        } else {
            self.x = self.p.set_nz(self.a);
        }
    }

    pub(crate) fn tay(&mut self) {
        if self.p.small_index() {
            let val = self.p.set_nz_8(self.a as u8);
            self.y = val as u16;
        } else {
            self.y = self.p.set_nz(self.a);
        }
    }

    pub(crate) fn txa(&mut self) {
        if self.p.small_acc() {
            let val = self.p.set_nz_8(self.x as u8);
            self.a = (self.a & 0xff00) | val as u16;
        } else {
            self.a = self.p.set_nz(self.x);
        }
    }

    /// Transfer X to Stack pointer. Unlike the other transfers, never
    /// affects N/Z, and (in emulation mode) pins S's high byte to `0x01`.
    pub(crate) fn txs(&mut self) {
        self.s = if self.e { 0x0100 | (self.x & 0xff) } else { self.x };
    }

    pub(crate) fn txy(&mut self) {
        if self.p.small_index() {
            let val = self.p.set_nz_8(self.x as u8);
            self.y = val as u16;
        } else {
            self.y = self.p.set_nz(self.x);
        }
    }

    pub(crate) fn tya(&mut self) {
        if self.p.small_acc() {
            let val = self.p.set_nz_8(self.y as u8);
            self.a = (self.a & 0xff00) | val as u16;
        } else {
            self.a = self.p.set_nz(self.y);
        }
    }

    pub(crate) fn tyx(&mut self) {
        if self.p.small_index() {
            let val = self.p.set_nz_8(self.y as u8);
            self.x = val as u16;
        } else {
            self.x = self.p.set_nz(self.y);
        }
    }

    /// Transfer A to Direct page register. Always full-width, regardless of
    /// M - D has no 8-bit mode.
    pub(crate) fn tcd(&mut self) {
        self.d = self.p.set_nz(self.a);
    }

    /// Transfer Direct page register to A. Always full-width.
    pub(crate) fn tdc(&mut self) {
        self.a = self.p.set_nz(self.d);
    }

    /// Transfer A to Stack pointer. Never affects N/Z; pins S's high byte
    /// in emulation mode like `txs`.
    pub(crate) fn tcs(&mut self) {
        self.s = if self.e { 0x0100 | (self.a & 0xff) } else { self.a };
    }

    /// Transfer Stack pointer to A. Always full-width.
    pub(crate) fn tsc(&mut self) {
        self.a = self.p.set_nz(self.s);
    }

    pub(crate) fn tsx(&mut self) {
        if self.p.small_index() {
            let val = self.p.set_nz_8(self.s as u8);
            self.x = val as u16;
        } else {
            self.x = self.p.set_nz(self.s);
        }
    }

    pub(crate) fn clc(&mut self) {
        self.p.set_carry(false);
    }

    pub(crate) fn sec(&mut self) {
        self.p.set_carry(true);
    }

    pub(crate) fn cli(&mut self) {
        self.p.set_irq_disable(false);
    }

    pub(crate) fn sei(&mut self) {
        self.p.set_irq_disable(true);
    }

    pub(crate) fn cld(&mut self) {
        self.p.set_decimal(false);
    }

    pub(crate) fn sed(&mut self) {
        self.p.set_decimal(true);
    }

    pub(crate) fn clv(&mut self) {
        self.p.set_overflow(false);
    }

    pub(crate) fn nop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use crate::{mem::FlatMemory, Cpu};

    #[test]
    fn xce_enters_native_mode_and_moves_carry_into_emulation_flag() {
        let mut mem = FlatMemory::new(0x10000);
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        assert!(cpu.e);
        cpu.xce();
        assert!(!cpu.e);
        assert!(cpu.p().carry());
    }

    #[test]
    fn xba_swaps_bytes_and_sets_flags_from_new_low_byte() {
        let mut mem = FlatMemory::new(0x10000);
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        cpu.a = 0x1280;
        cpu.xba();
        assert_eq!(cpu.a, 0x8012);
        assert!(cpu.p().negative());
    }

    #[test]
    fn stp_halts_step_until_reset() {
        let mut mem = FlatMemory::new(0x10000);
        mem.write_bytes(0, &[0xEA]); // NOP, never reached
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        cpu.stp();
        assert_eq!(cpu.step(), 0);
        assert_eq!(cpu.pc, 0x0000);
        cpu.reset();
        assert!(!cpu.stopped);
    }
}
