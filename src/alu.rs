//! Arithmetic and logic opcodes: AND/ORA/EOR, ADC/SBC, the shift/rotate
//! family, BIT/TSB/TRB, CMP/CPX/CPY, INC/DEC, the block-move pair MVN/MVP,
//! and the LDA/STA/LDX/STX/LDY/STY/STZ load/store family.

use crate::{addressing::AddressingMode, Cpu, Mem};

impl<M: Mem> Cpu<M> {
    /// AND Accumulator with Memory.
    pub(crate) fn and(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let val = am.loadb(self);
            let res = self.a as u8 & val;
            self.p.set_nz_8(res);
            self.a = (self.a & 0xff00) | res as u16;
        } else {
            let val = am.loadw(self);
            let res = self.a & val;
            self.a = self.p.set_nz(res);
            self.cy += 1;
        }
    }

    /// OR Accumulator with Memory.
    pub(crate) fn ora(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let val = am.loadb(self);
            let res = self.a as u8 | val;
            self.p.set_nz_8(res);
            self.a = (self.a & 0xff00) | res as u16;
        } else {
            let val = am.loadw(self);
            let res = self.a | val;
            self.a = self.p.set_nz(res);
            self.cy += 1;
        }
    }

    /// Exclusive-Or Accumulator with Memory.
    pub(crate) fn eor(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let val = am.loadb(self);
            let res = self.a as u8 ^ val;
            self.p.set_nz_8(res);
            self.a = (self.a & 0xff00) | res as u16;
        } else {
            let val = am.loadw(self);
            let res = self.a ^ val;
            self.a = self.p.set_nz(res);
            self.cy += 1;
        }
    }

    /// Add With Carry. Sets N, V, C, Z; BCD-adjusts when the Decimal flag is
    /// set, using the nibble-wise half-carry algorithm from the datasheet.
    pub(crate) fn adc(&mut self, am: AddressingMode) {
        let c: u16 = if self.p.carry() { 1 } else { 0 };

        if self.p.small_acc() {
            let a = self.a & 0xff;
            let val = am.loadb(self) as u16;
            let mut res = if self.p.decimal() {
                let mut low = (a & 0xf) + (val & 0xf) + c;
                if low > 9 {
                    low += 6;
                }
                (a & 0xf0) + (val & 0xf0) + (low & 0x0f) + if low > 0x0f { 0x10 } else { 0 }
            } else {
                a + val + c
            };
            self.p
                .set_overflow((a as u8 ^ val as u8) & 0x80 == 0 && (a as u8 ^ res as u8) & 0x80 == 0x80);
            if self.p.decimal() && res > 0x9f {
                res += 0x60;
            }
            self.p.set_carry(res > 255);

            self.a = (self.a & 0xff00) | self.p.set_nz_8(res as u8) as u16;
        } else {
            let val = am.loadw(self);
            let mut res: u32 = if self.p.decimal() {
                let mut res0 = (self.a & 0x000f) + (val & 0x000f) + c;
                if res0 > 0x0009 {
                    res0 += 0x0006;
                }

                let mut res1 = (self.a & 0x00f0) + (val & 0x00f0) + (res0 & 0x000f)
                    + if res0 > 0x000f { 0x0010 } else { 0x0000 };
                if res1 > 0x009f {
                    res1 += 0x0060;
                }

                let mut res2 = (self.a & 0x0f00) + (val & 0x0f00) + (res1 & 0x00ff)
                    + if res1 > 0x00ff { 0x0100 } else { 0x0000 };
                if res2 > 0x09ff {
                    res2 += 0x0600;
                }

                (self.a as u32 & 0xf000) + (val as u32 & 0xf000) + (res2 as u32 & 0x0fff)
                    + if res2 > 0x0fff { 0x1000 } else { 0x0000 }
            } else {
                self.a as u32 + val as u32 + c as u32
            };
            self.p
                .set_overflow((self.a ^ val) & 0x8000 == 0 && (self.a ^ res as u16) & 0x8000 == 0x8000);
            if self.p.decimal() && res > 0x9fff {
                res += 0x6000;
            }
            self.p.set_carry(res > 65535);

            self.a = self.p.set_nz(res as u16);
            self.cy += 1;
        }
    }

    /// Subtract with Borrow from Accumulator. Same BCD treatment as `adc`,
    /// operating on the one's complement of the operand.
    pub(crate) fn sbc(&mut self, am: AddressingMode) {
        let c: i16 = if self.p.carry() { 1 } else { 0 };

        if self.p.small_acc() {
            let a = self.a as i16 & 0xff;
            let v = am.loadb(self) as i16 ^ 0xff;
            let mut res: i16 = if self.p.decimal() {
                let mut low: i16 = (a & 0x0f) + (v & 0x0f) + c;
                if low < 0x10 {
                    low -= 6;
                }
                (a & 0xf0) + (v & 0xf0) + (low & 0x0f) + if low > 0x0f { 0x10 } else { 0x00 }
            } else {
                a + v + c
            };
            self.p
                .set_overflow((a & 0x80) == (v & 0x80) && (a & 0x80) != (res & 0x80));
            if self.p.decimal() && res < 0x100 {
                res -= 0x60;
            }
            self.p.set_carry(res > 255);

            self.a = (self.a & 0xff00) | self.p.set_nz_8(res as u8) as u16;
        } else {
            let a = self.a as i32;
            let v = am.loadw(self) as i32 ^ 0xffff;
            let mut res: i32 = if self.p.decimal() {
                let mut res0 = (a & 0x000f) + (v & 0x000f) + c as i32;
                if res0 < 0x0010 {
                    res0 -= 0x0006;
                }

                let mut res1 = (a & 0x00f0) + (v & 0x00f0) + (res0 & 0x000f)
                    + if res0 > 0x000f { 0x10 } else { 0x00 };
                if res1 < 0x0100 {
                    res1 -= 0x0060;
                }

                let mut res2 = (a & 0x0f00) + (v & 0x0f00) + (res1 & 0x00ff)
                    + if res1 > 0x00ff { 0x100 } else { 0x000 };
                if res2 < 0x1000 {
                    res2 -= 0x0600;
                }

                (a & 0xf000) + (v & 0xf000) + (res2 & 0x0fff) + if res2 > 0x0fff { 0x1000 } else { 0x0000 }
            } else {
                a + v + c as i32
            };
            self.p
                .set_overflow((self.a ^ res as u16) & 0x8000 != 0 && (self.a ^ v as u16) & 0x8000 == 0);
            if self.p.decimal() && res < 0x10000 {
                res -= 0x6000;
            }
            self.p.set_carry(res > 65535);

            self.a = self.p.set_nz(res as u16);
            self.cy += 1;
        }
    }

    pub(crate) fn asl_a(&mut self) {
        if self.p.small_acc() {
            let a = self.a as u8;
            self.p.set_carry(self.a & 0x80 != 0);
            self.a = (self.a & 0xff00) | self.p.set_nz_8(a << 1) as u16;
        } else {
            self.p.set_carry(self.a & 0x8000 != 0);
            self.a = self.p.set_nz(self.a << 1);
        }
    }

    pub(crate) fn asl(&mut self, am: AddressingMode) {
        let (bank, addr) = am.address(self);
        if self.p.small_acc() {
            let val = self.load_byte(bank, addr);
            self.p.set_carry(val & 0x80 != 0);
            let res = self.p.set_nz_8(val << 1);
            self.store_byte(bank, addr, res);
        } else {
            let val = self.load_word(bank, addr);
            self.p.set_carry(val & 0x8000 != 0);
            let res = self.p.set_nz(val << 1);
            self.store_word(bank, addr, res);
            self.cy += 2;
        }
    }

    pub(crate) fn rol_a(&mut self) {
        let c: u8 = if self.p.carry() { 1 } else { 0 };
        if self.p.small_acc() {
            let a = self.a as u8;
            self.p.set_carry(self.a & 0x80 != 0);
            let res = (a << 1) | c;
            self.a = (self.a & 0xff00) | self.p.set_nz_8(res) as u16;
        } else {
            self.p.set_carry(self.a & 0x8000 != 0);
            let res = (self.a << 1) | c as u16;
            self.a = self.p.set_nz(res);
            self.cy += 1;
        }
    }

    pub(crate) fn rol(&mut self, am: AddressingMode) {
        let c: u8 = if self.p.carry() { 1 } else { 0 };
        let (bank, addr) = am.address(self);
        if self.p.small_acc() {
            let val = self.load_byte(bank, addr);
            self.p.set_carry(val & 0x80 != 0);
            let res = self.p.set_nz_8((val << 1) | c);
            self.store_byte(bank, addr, res);
        } else {
            let val = self.load_word(bank, addr);
            self.p.set_carry(val & 0x8000 != 0);
            let res = self.p.set_nz((val << 1) | c as u16);
            self.store_word(bank, addr, res);
            self.cy += 2;
        }
    }

    pub(crate) fn lsr_a(&mut self) {
        if self.p.small_acc() {
            let a = self.a as u8;
            self.p.set_carry(self.a & 0x01 != 0);
            self.a = (self.a & 0xff00) | self.p.set_nz_8(a >> 1) as u16;
        } else {
            self.p.set_carry(self.a & 0x0001 != 0);
            self.a = self.p.set_nz(self.a >> 1);
        }
    }

    pub(crate) fn lsr(&mut self, am: AddressingMode) {
        let (bank, addr) = am.address(self);
        if self.p.small_acc() {
            let val = self.load_byte(bank, addr);
            self.p.set_carry(val & 0x01 != 0);
            let res = self.p.set_nz_8(val >> 1);
            self.store_byte(bank, addr, res);
        } else {
            let val = self.load_word(bank, addr);
            self.p.set_carry(val & 0x0001 != 0);
            let res = self.p.set_nz(val >> 1);
            self.store_word(bank, addr, res);
            self.cy += 2;
        }
    }

    pub(crate) fn ror_a(&mut self) {
        let c: u8 = if self.p.carry() { 1 } else { 0 };
        if self.p.small_acc() {
            let val = self.a as u8;
            self.p.set_carry(val & 0x01 != 0);
            let res = self.p.set_nz_8((val >> 1) | (c << 7));
            self.a = (self.a & 0xff00) | res as u16;
        } else {
            let val = self.a;
            self.p.set_carry(val & 0x0001 != 0);
            self.a = self.p.set_nz((val >> 1) | ((c as u16) << 15));
        }
    }

    pub(crate) fn ror(&mut self, am: AddressingMode) {
        let c: u8 = if self.p.carry() { 1 } else { 0 };
        let (bank, addr) = am.address(self);
        if self.p.small_acc() {
            let val = self.load_byte(bank, addr);
            self.p.set_carry(val & 0x01 != 0);
            let res = self.p.set_nz_8((val >> 1) | (c << 7));
            self.store_byte(bank, addr, res);
        } else {
            let val = self.load_word(bank, addr);
            self.p.set_carry(val & 0x0001 != 0);
            let res = self.p.set_nz((val >> 1) | ((c as u16) << 15));
            self.store_word(bank, addr, res);
            self.cy += 2;
        }
    }

    /// Test memory bits against the accumulator. Immediate addressing only
    /// sets Z; any other mode also copies bits 7/6 of the operand into N/V.
    pub(crate) fn bit(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let val = am.clone().loadb(self);
            self.p.set_zero(val & self.a as u8 == 0);
            match am {
                AddressingMode::Immediate(_) | AddressingMode::Immediate8(_) => {}
                _ => {
                    self.p.set_negative(val & 0x80 != 0);
                    self.p.set_overflow(val & 0x40 != 0);
                }
            }
        } else {
            let val = am.clone().loadw(self);
            self.p.set_zero(val & self.a == 0);
            match am {
                AddressingMode::Immediate(_) | AddressingMode::Immediate8(_) => {}
                _ => {
                    self.p.set_negative(val & 0x8000 != 0);
                    self.p.set_overflow(val & 0x4000 != 0);
                }
            }
            self.cy += 1;
        }
    }

    /// Test and Set memory Bits: ORs the accumulator into memory, setting Z
    /// from the pre-OR AND.
    pub(crate) fn tsb(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let val = am.clone().loadb(self);
            self.p.set_zero(val & self.a as u8 == 0);
            let res = val | self.a as u8;
            am.storeb(self, res);
        } else {
            let val = am.clone().loadw(self);
            self.p.set_zero(val & self.a == 0);
            let res = val | self.a;
            am.storew(self, res);
            self.cy += 2;
        }
    }

    /// Test and Reset memory Bits: clears the accumulator's set bits in
    /// memory, setting Z from the pre-clear AND.
    pub(crate) fn trb(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let val = am.clone().loadb(self);
            self.p.set_zero(val & self.a as u8 == 0);
            let res = val & !(self.a as u8);
            am.storeb(self, res);
        } else {
            let val = am.clone().loadw(self);
            self.p.set_zero(val & self.a == 0);
            let res = val & !self.a;
            am.storew(self, res);
            self.cy += 2;
        }
    }

    pub(crate) fn cmp(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let a = self.a as u8;
            let b = am.loadb(self);
            self.compare8(a, b);
        } else {
            let a = self.a;
            let b = am.loadw(self);
            self.compare(a, b);
            self.cy += 1;
        }
    }

    pub(crate) fn cpx(&mut self, am: AddressingMode) {
        if self.p.small_index() {
            let val = am.loadb(self);
            let x = self.x as u8;
            self.compare8(x, val);
        } else {
            let val = am.loadw(self);
            let x = self.x;
            self.compare(x, val);
            self.cy += 1;
        }
    }

    pub(crate) fn cpy(&mut self, am: AddressingMode) {
        if self.p.small_index() {
            let val = am.loadb(self);
            let y = self.y as u8;
            self.compare8(y, val);
        } else {
            let val = am.loadw(self);
            let y = self.y;
            self.compare(y, val);
            self.cy += 1;
        }
    }

    pub(crate) fn inc(&mut self, am: AddressingMode) {
        let (bank, addr) = am.address(self);
        if self.p.small_acc() {
            let res = self.load_byte(bank, addr).wrapping_add(1);
            self.p.set_nz_8(res);
            self.store_byte(bank, addr, res);
        } else {
            let res = self.load_word(bank, addr).wrapping_add(1);
            self.p.set_nz(res);
            self.store_word(bank, addr, res);
            self.cy += 2;
        }
    }

    pub(crate) fn ina(&mut self) {
        if self.p.small_acc() {
            let res = self.p.set_nz_8((self.a as u8).wrapping_add(1));
            self.a = (self.a & 0xff00) | res as u16;
        } else {
            self.a = self.p.set_nz(self.a.wrapping_add(1));
        }
    }

    pub(crate) fn inx(&mut self) {
        if self.p.small_index() {
            let res = self.p.set_nz_8((self.x as u8).wrapping_add(1));
            self.x = (self.x & 0xff00) | res as u16;
        } else {
            self.x = self.p.set_nz(self.x.wrapping_add(1));
        }
    }

    pub(crate) fn iny(&mut self) {
        if self.p.small_index() {
            let res = self.p.set_nz_8((self.y as u8).wrapping_add(1));
            self.y = (self.y & 0xff00) | res as u16;
        } else {
            self.y = self.p.set_nz(self.y.wrapping_add(1));
        }
    }

    pub(crate) fn dea(&mut self) {
        if self.p.small_acc() {
            let res = self.p.set_nz_8((self.a as u8).wrapping_sub(1));
            self.a = (self.a & 0xff00) | res as u16;
        } else {
            self.a = self.p.set_nz(self.a.wrapping_sub(1));
        }
    }

    pub(crate) fn dec(&mut self, am: AddressingMode) {
        let (bank, addr) = am.address(self);
        if self.p.small_acc() {
            let res = self.load_byte(bank, addr).wrapping_sub(1);
            self.p.set_nz_8(res);
            self.store_byte(bank, addr, res);
        } else {
            let res = self.load_word(bank, addr).wrapping_sub(1);
            self.p.set_nz(res);
            self.store_word(bank, addr, res);
            self.cy += 2;
        }
    }

    pub(crate) fn dex(&mut self) {
        if self.p.small_index() {
            let res = self.p.set_nz_8((self.x as u8).wrapping_sub(1));
            self.x = (self.x & 0xff00) | res as u16;
        } else {
            self.x = self.p.set_nz(self.x.wrapping_sub(1));
        }
    }

    pub(crate) fn dey(&mut self) {
        if self.p.small_index() {
            let res = self.p.set_nz_8((self.y as u8).wrapping_sub(1));
            self.y = (self.y & 0xff00) | res as u16;
        } else {
            self.y = self.p.set_nz(self.y.wrapping_sub(1));
        }
    }

    /// Block Move Next (incrementing addresses). Transfers exactly one byte
    /// per call and only advances PC past the 3-byte instruction once the
    /// 16-bit counter in A reaches `0xFFFF` - this is what makes the move
    /// reentrant across `step()` calls, so a pending IRQ/NMI can be taken
    /// between any two bytes instead of stalling behind the whole transfer.
    /// DBR is updated to the destination bank on every call, matching
    /// hardware (which keeps DBR current throughout the move, not just once
    /// it completes).
    pub(crate) fn mvn(&mut self) {
        let start_pc = self.pc.wrapping_sub(1);
        let destbank = self.load_byte(self.pbr, start_pc.wrapping_add(1));
        let srcbank = self.load_byte(self.pbr, start_pc.wrapping_add(2));
        self.dbr = destbank;

        let (x, y) = (self.x, self.y);
        let val = self.load_byte(srcbank, x);
        self.store_byte(destbank, y, val);

        self.x = self.x.wrapping_add(1);
        self.y = self.y.wrapping_add(1);
        self.a = self.a.wrapping_sub(1);

        if self.a == 0xffff {
            self.pc = start_pc.wrapping_add(3);
        } else {
            self.pc = start_pc;
        }
    }

    /// Block Move Previous (decrementing addresses). Same reentrancy model
    /// as `mvn`.
    pub(crate) fn mvp(&mut self) {
        let start_pc = self.pc.wrapping_sub(1);
        let destbank = self.load_byte(self.pbr, start_pc.wrapping_add(1));
        let srcbank = self.load_byte(self.pbr, start_pc.wrapping_add(2));
        self.dbr = destbank;

        let (x, y) = (self.x, self.y);
        let val = self.load_byte(srcbank, x);
        self.store_byte(destbank, y, val);

        self.x = self.x.wrapping_sub(1);
        self.y = self.y.wrapping_sub(1);
        self.a = self.a.wrapping_sub(1);

        if self.a == 0xffff {
            self.pc = start_pc.wrapping_add(3);
        } else {
            self.pc = start_pc;
        }
    }

    pub(crate) fn lda(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            let val = am.loadb(self);
            self.p.set_nz_8(val);
            self.a = (self.a & 0xff00) | val as u16;
        } else {
            let val = am.loadw(self);
            self.a = self.p.set_nz(val);
            self.cy += 1;
        }
    }

    pub(crate) fn ldx(&mut self, am: AddressingMode) {
        if self.p.small_index() {
            let val = am.loadb(self);
            self.p.set_nz_8(val);
            self.x = val as u16;
        } else {
            let val = am.loadw(self);
            self.x = self.p.set_nz(val);
            self.cy += 1;
        }
    }

    pub(crate) fn ldy(&mut self, am: AddressingMode) {
        if self.p.small_index() {
            let val = am.loadb(self);
            self.p.set_nz_8(val);
            self.y = val as u16;
        } else {
            let val = am.loadw(self);
            self.y = self.p.set_nz(val);
            self.cy += 1;
        }
    }

    pub(crate) fn sta(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            am.storeb(self, self.a as u8);
        } else {
            am.storew(self, self.a);
            self.cy += 1;
        }
    }

    pub(crate) fn stx(&mut self, am: AddressingMode) {
        if self.p.small_index() {
            am.storeb(self, self.x as u8);
        } else {
            am.storew(self, self.x);
            self.cy += 1;
        }
    }

    pub(crate) fn sty(&mut self, am: AddressingMode) {
        if self.p.small_index() {
            am.storeb(self, self.y as u8);
        } else {
            am.storew(self, self.y);
            self.cy += 1;
        }
    }

    /// Store Zero. Acc-width only - index width plays no part in STZ.
    pub(crate) fn stz(&mut self, am: AddressingMode) {
        if self.p.small_acc() {
            am.storeb(self, 0);
        } else {
            am.storew(self, 0);
            self.cy += 1;
        }
    }
}
