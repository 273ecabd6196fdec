//! A cycle-counting instruction-set simulator for the WDC 65C816.
//!
//! The simulator executes one instruction per [`Cpu::step`] call against a
//! host-supplied [`Mem`] implementation, updating registers, flags and the
//! cycle counter to match real hardware. It does not model bus wait states,
//! memory-mapped devices or undocumented opcodes - see the module docs below
//! for what each piece is responsible for.

mod addressing;
mod alu;
mod config;
mod control;
mod dispatch;
mod error;
mod interrupt;
mod mem;
mod statusreg;
pub mod testutil;

pub use config::CpuOptions;
pub use error::FixtureError;
pub use mem::{FlatMemory, Mem};
pub use statusreg::StatusReg;

use addressing::AddressingMode;

// Emulation-mode (8-bit) vectors.
const RESET_VEC8: u16 = 0xFFFC;
const NMI_VEC8: u16 = 0xFFFA;
const ABORT_VEC8: u16 = 0xFFF8;
const COP_VEC8: u16 = 0xFFF4;
const IRQ_VEC8: u16 = 0xFFFE;
const BRK_VEC8: u16 = 0xFFFE;

// Native-mode (16-bit) vectors.
const NMI_VEC16: u16 = 0xFFEA;
const ABORT_VEC16: u16 = 0xFFE8;
const COP_VEC16: u16 = 0xFFE4;
const IRQ_VEC16: u16 = 0xFFEE;
const BRK_VEC16: u16 = 0xFFE6;

/// A WDC 65C816 core wired to a host-supplied [`Mem`] bus.
///
/// Every register named in the datasheet is a public field; the hidden `B`
/// accumulator is exposed as a derived accessor ([`Cpu::b`]) rather than a
/// second stored field, since it is always recoverable from `a`'s high byte
/// and storing it twice would just be one more place for the two copies to
/// drift apart.
#[derive(Clone)]
pub struct Cpu<M: Mem> {
    pub a: u16,
    pub x: u16,
    pub y: u16,
    /// Stack pointer.
    pub s: u16,
    /// Data bank register. Bank for most memory accesses.
    pub dbr: u8,
    /// Program bank register. Opcodes are fetched from this bank.
    pub pbr: u8,
    /// Direct (page) register. Offset base for direct-page addressing.
    pub d: u16,
    /// Program counter. PBR does not change on overflow, so straight-line
    /// code cannot span banks without `jml`/`jsr`/a long branch.
    pub pc: u16,
    p: StatusReg,
    /// Emulation flag. Not part of `p` - swapped only by `XCE`.
    pub e: bool,
    /// Set by `WAI`; cleared when an interrupt is taken. While set, `step`
    /// does no work and returns 0 cycles.
    pub waiting: bool,
    /// Set by `STP`. Cleared only by a host-driven `reset`.
    pub stopped: bool,

    /// Cycles spent across the lifetime of this CPU.
    cycles: u64,
    /// Cycles used by the instruction currently being dispatched.
    cy: u16,
    /// Whether the opcode currently dispatching is allowed to charge the
    /// index-width/page-cross addressing penalty - mirrors the per-opcode
    /// `extracycles`/`addcycles` flag in `examples/original_source/mpu65c816.py`,
    /// which gates the same charge at the instruction level rather than the
    /// addressing-mode level (e.g. `BIT $nnnn,X` and `STA $nnnn,X` use the
    /// same indexed-absolute mode as `LDA $nnnn,X` but never pay the extra
    /// cycle). Set from `OPCODE_INFO` at the top of `Cpu::step` before the
    /// handler runs.
    variable_cycle: bool,

    options: CpuOptions,

    pub mem: M,
}

impl<M: Mem> Cpu<M> {
    /// Creates a new CPU and executes a reset, fetching the RESET vector and
    /// entering emulation mode, with default [`CpuOptions`].
    pub fn new(mem: M) -> Cpu<M> {
        Cpu::with_options(mem, CpuOptions::default())
    }

    /// As [`Cpu::new`], with explicit cost-model configuration.
    pub fn with_options(mut mem: M, options: CpuOptions) -> Cpu<M> {
        let pc = Self::read_vector(&mut mem, RESET_VEC8);

        Cpu {
            // Undefined by the datasheet on reset.
            a: 0,
            x: 0,
            y: 0,
            // High byte pinned to 0x01, as required in emulation mode.
            s: 0x0100,
            dbr: 0,
            d: 0,
            pbr: 0,
            pc,
            // Acc/index start 8-bit, IRQs disabled, Break+Unused forced - the
            // emulation-mode reset state.
            p: StatusReg::new(),
            e: true,
            waiting: false,
            stopped: false,
            cycles: 0,
            cy: 0,
            variable_cycle: false,
            options,
            mem,
        }
    }

    /// Re-executes the RESET sequence: re-reads the RESET vector and puts the
    /// CPU back into its post-reset register state. Used both by a
    /// host-triggered reset and by `STP` (see `control::stp`).
    pub fn reset(&mut self) {
        let pc = Self::read_vector(&mut self.mem, RESET_VEC8);
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = 0x0100;
        self.dbr = 0;
        self.d = 0;
        self.pbr = 0;
        self.pc = pc;
        self.p = StatusReg::new();
        self.e = true;
        self.waiting = false;
        self.stopped = false;
        self.cy = 0;
    }

    fn read_vector(mem: &mut M, vector: u16) -> u16 {
        let lo = mem.load(vector as u32) as u16;
        let hi = mem.load(vector as u32 + 1) as u16;
        (hi << 8) | lo
    }

    /// Reads one of the bank-0 interrupt vectors while the CPU is running
    /// (as opposed to `read_vector`, used only at construction/reset time).
    fn fetch_vector(&mut self, vector: u16) -> u16 {
        let lo = self.load_byte(0, vector) as u16;
        let hi = self.load_byte(0, vector.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// The hidden high byte of the accumulator. Always equal to `a >> 8`;
    /// exposed as its own accessor since code dealing with 8-bit-accumulator
    /// mode (where `a`'s high byte is logically "B", not "A") reads more
    /// clearly that way.
    pub fn b(&self) -> u8 {
        (self.a >> 8) as u8
    }

    pub fn p(&self) -> &StatusReg {
        &self.p
    }

    /// The raw `P` register byte. Exposed for test harnesses that build or
    /// compare register snapshots (see `testutil::RegisterState`); core
    /// opcode handlers go through the named `StatusReg` accessors instead.
    pub fn status_byte(&self) -> u8 {
        self.p.0
    }

    /// Overwrites `P` directly, applying the emulation-mode bit-forcing rule
    /// but not the SEP/REP/PLP index-width side effect (callers setting up
    /// test state want the bits they asked for, not a reinterpretation of
    /// them).
    pub fn set_status_byte(&mut self, value: u8) {
        self.p.0 = value;
        if self.e {
            self.p.force_emulation_bits();
        }
    }

    /// Total number of cycles executed since this CPU was created.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn options(&self) -> &CpuOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut CpuOptions {
        &mut self.options
    }

    /// Loads a byte from `bank:addr`.
    fn load_byte(&mut self, bank: u8, addr: u16) -> u8 {
        self.mem.load((bank as u32) << 16 | addr as u32)
    }

    /// Loads a little-endian word from `bank:addr`/`bank:addr+1`. Does not
    /// wrap `addr` across the bank boundary - callers that need direct-page
    /// pointer-wrap semantics use `load_word_wrapped` instead.
    fn load_word(&mut self, bank: u8, addr: u16) -> u16 {
        let lo = self.load_byte(bank, addr) as u16;
        let hi = self.load_byte(bank, addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    fn store_byte(&mut self, bank: u8, addr: u16, value: u8) {
        self.mem.store((bank as u32) << 16 | addr as u32, value)
    }

    fn store_word(&mut self, bank: u8, addr: u16, value: u16) {
        self.store_byte(bank, addr, value as u8);
        if addr == 0xFFFF {
            self.store_byte(bank.wrapping_add(1), 0, (value >> 8) as u8);
        } else {
            self.store_byte(bank, addr + 1, (value >> 8) as u8);
        }
    }

    /// Loads a 16-bit pointer from bank 0, wrapping the high-byte read back
    /// to offset 0 (never into bank 1) if the low byte sits at `0xFFFF`.
    /// Used by the direct-page indirect addressing modes - see
    /// `addressing::AddressingMode::address`.
    fn load_word_wrapped(&mut self, addr: u16) -> u16 {
        let lo = self.load_byte(0, addr) as u16;
        let hi = self.load_byte(0, addr.wrapping_add(1) & 0xFFFF) as u16;
        (hi << 8) | lo
    }

    /// Loads a 24-bit (bank, addr) pointer from bank 0, with the same
    /// wrap-within-bank-0 rule as `load_word_wrapped` applied to each of the
    /// three bytes read.
    fn load_long_wrapped(&mut self, addr: u16) -> (u8, u16) {
        let lo = self.load_byte(0, addr) as u32;
        let mid = self.load_byte(0, addr.wrapping_add(1) & 0xFFFF) as u32;
        let bank = self.load_byte(0, addr.wrapping_add(2) & 0xFFFF);
        (bank, ((mid << 8) | lo) as u16)
    }

    /// Fetches the byte at PBR:PC and advances PC.
    fn fetch_byte(&mut self) -> u8 {
        let (pbr, pc) = (self.pbr, self.pc);
        let b = self.load_byte(pbr, pc);
        self.pc = self.pc.wrapping_add(1);
        b
    }

    /// Fetches a little-endian word at PBR:PC and advances PC by 2.
    fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Charges one extra cycle to the instruction currently dispatching.
    /// Used by addressing modes for index-width/page-cross penalties.
    fn bump_cycle(&mut self) {
        self.cy += 1;
    }

    /// Extra-cycle rule for indexed addressing (absolute,x/y and
    /// indirect-indexed-y): one cycle whenever the index registers are
    /// 16-bit, since hardware always reserves it at that width, or whenever
    /// they are 8-bit and indexing crosses a 256-byte page relative to
    /// `base`. The teacher's version only implemented the first half of this
    /// (see its own `// FIXME ... This causes bad timing, fix it!`).
    ///
    /// Gated on `variable_cycle`: per `mpu65c816.py`'s `addcycles` flag, this
    /// charge is opcode-specific, not mode-specific - `STA $nnnn,X` and
    /// `BIT $nnnn,X` resolve the same `AbsIndexedX` address as `LDA $nnnn,X`
    /// but never pay this cycle, since their base cost in `CYCLE_TABLE`
    /// already accounts for the worst case.
    fn charge_index_cycle(&mut self, bank: u8, base: u16, index: u16) {
        if !self.variable_cycle {
            return;
        }
        if !self.p.small_index() {
            self.bump_cycle();
        } else {
            let _ = bank;
            if base & 0xFF00 != base.wrapping_add(index) & 0xFF00 {
                self.bump_cycle();
            }
        }
    }

    /// Direct-page low-byte cost-model penalty: one extra cycle whenever
    /// `D & 0xFF != 0`, per the 65816 Programming Manual. Gated behind
    /// `CpuOptions::direct_page_cycle_savings` since some emulators choose to
    /// omit it (see `config.rs`).
    fn charge_direct_page_cycle(&mut self) {
        if self.options.direct_page_cycle_savings && self.d & 0xFF != 0 {
            self.bump_cycle();
        }
    }

    /// Compares `a` to `b` as 16-bit values by computing `a - b`: Z set if
    /// equal, C set if `a >= b`, N from the result's sign bit.
    fn compare(&mut self, a: u16, b: u16) {
        self.p.set_zero(a == b);
        self.p.set_carry(a >= b);
        self.p.set_negative(a.wrapping_sub(b) & 0x8000 != 0);
    }

    fn compare8(&mut self, a: u8, b: u8) {
        self.p.set_zero(a == b);
        self.p.set_carry(a >= b);
        self.p.set_negative(a.wrapping_sub(b) & 0x80 != 0);
    }

    /// Jumps to an absolute (bank, addr) target, overwriting PBR.
    fn branch(&mut self, target: (u8, u16)) {
        self.pbr = target.0;
        self.pc = target.1;
    }

    /// Installs a new P value, applying the "X=1 forces X/Y high bytes to
    /// zero" rule documented for SEP/REP/PLP when the index-width bit
    /// transitions from clear to set.
    fn set_p(&mut self, new: u8) {
        let was_small_index = self.p.small_index();
        self.p.0 = new;
        if self.e {
            self.p.force_emulation_bits();
        }
        if !was_small_index && self.p.small_index() {
            self.x &= 0xFF;
            self.y &= 0xFF;
        }
    }

    /// Enters/exits emulation mode (the `E` flag, swapped by `XCE`).
    fn set_emulation(&mut self, value: bool) {
        if !self.e && value {
            // Entering emulation mode: stack confined to page 1, A/X/Y
            // forced 8-bit, Break+Unused forced to 1.
            self.s = 0x0100 | (self.s & 0xFF);
            self.p.set_small_acc(true);
            self.p.set_small_index(true);
            self.x &= 0xFF;
            self.y &= 0xFF;
            self.p.force_emulation_bits();
        }
        self.e = value;
    }

    fn trace_op(&self, pc: u16, raw: u8, op: &str, am: Option<&AddressingMode>) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }

        let opstr = match am {
            Some(am) => format!("{} {}", op, am),
            None => op.to_string(),
        };
        log::trace!(
            "${:02X}:{:04X} {:02X}  {:14} a:{:04X} x:{:04X} y:{:04X} s:{:04X} d:{:04X} dbr:{:02X} e:{} {}",
            self.pbr, pc, raw, opstr, self.a, self.x, self.y, self.s, self.d, self.dbr,
            self.e as u8, self.p,
        );
    }
}
