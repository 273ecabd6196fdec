//! A simple CPU benchmark.
//!
//! Only ever runs in emulation mode with 8-bit accumulator and index
//! registers, so this is a bad benchmark for the 65C816 as a whole - but it
//! gives a rough estimate of "how fast is a naive interpreted CPU emulator":
//! throughput in MB/s roughly corresponds to the emulated CPU's clock speed.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use wdc65816::{Cpu, Mem};

struct DummyMem(&'static [u8]);

impl Mem for DummyMem {
    fn load(&mut self, addr: u32) -> u8 {
        // Places all vectors at $0000.
        *self.0.get(addr as usize).unwrap_or(&0)
    }

    fn store(&mut self, _addr: u32, _value: u8) {}
}

// Matches the reset-state startup snippet used to size SNES video hardware:
// clears A/X/Y, sets up the stack, then pokes a couple of PPU registers
// before looping back to the start.
static CODE: &[u8] = &[
    0xA9, 0x00, // lda #0
    0xA2, 0x00, // ldx #0
    0xA0, 0x00, // ldy #0
    0x9A, // txs
    0xA9, 0x0F, // lda #$0F
    0x8D, 0x00, 0x21, // sta $2100
    0xA9, 0x1F, // lda #$1F
    0x8D, 0x2C, 0x21, // sta $212C
    0x4C, 0x00, 0x00, // jmp $0000
];

fn run_once(cpu: &mut Cpu<DummyMem>) -> u64 {
    let mut cy = 0u64;
    loop {
        cy += cpu.step() as u64;
        if cpu.pc == 0 {
            break;
        }
    }
    cy
}

fn cpu_simple(c: &mut Criterion) {
    let mut cpu = Cpu::new(DummyMem(CODE));
    // Warm up once to learn the per-iteration cycle count for throughput
    // reporting.
    let cycles = run_once(&mut cpu);

    let mut group = c.benchmark_group("cpu");
    group.throughput(Throughput::Bytes(cycles));
    group.bench_function("cpu_simple", |b| {
        b.iter(|| {
            let mut cpu = Cpu::new(DummyMem(CODE));
            run_once(&mut cpu)
        });
    });
    group.finish();
}

criterion_group!(benches, cpu_simple);
criterion_main!(benches);
