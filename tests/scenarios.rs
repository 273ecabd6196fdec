//! End-to-end scenarios exercising the dispatcher, ALU and interrupt engine
//! together. The BCD-addition, 16-bit-overflow and push-width scenarios are
//! data-driven fixtures (`tests/fixtures/*.json`); the rest manipulate a
//! `Cpu<FlatMemory>` directly where a fixture's flat `program` array would
//! be impractical (e.g. a handler at a far-away vector target).

use std::path::Path;

use wdc65816::testutil::{cpu_from_fixture, load_fixture};
use wdc65816::{Cpu, FlatMemory, Mem};

fn run_fixture(name: &str) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let fixture = load_fixture(&path).expect("fixture should parse");
    let mut cpu = cpu_from_fixture(&fixture);

    for _ in 0..fixture.steps {
        cpu.step();
    }

    assert_eq!(cpu.a, fixture.expected.a, "a mismatch in {name}");
    assert_eq!(cpu.x, fixture.expected.x, "x mismatch in {name}");
    assert_eq!(cpu.y, fixture.expected.y, "y mismatch in {name}");
    assert_eq!(cpu.s, fixture.expected.s, "s mismatch in {name}");
    assert_eq!(cpu.d, fixture.expected.d, "d mismatch in {name}");
    assert_eq!(cpu.dbr, fixture.expected.dbr, "dbr mismatch in {name}");
    assert_eq!(cpu.pbr, fixture.expected.pbr, "pbr mismatch in {name}");
    assert_eq!(cpu.pc, fixture.expected.pc, "pc mismatch in {name}");
    assert_eq!(cpu.e, fixture.expected.e, "e mismatch in {name}");
    assert_eq!(
        cpu.status_byte(),
        fixture.expected.p,
        "p mismatch in {name}"
    );
    assert_eq!(
        cpu.cycles(),
        fixture.expected_cycles,
        "cycle count mismatch in {name}"
    );
}

#[test]
fn bcd_addition_adjusts_to_decimal_sum() {
    run_fixture("bcd_adc.json");
}

#[test]
fn sixteen_bit_add_sets_overflow_on_sign_change() {
    run_fixture("sixteen_bit_adc_overflow.json");
}

#[test]
fn xce_into_native_mode_widens_subsequent_push() {
    run_fixture("xce_native_push_width.json");
}

#[test]
fn brk_then_rti_round_trips_through_emulation_vector() {
    let mut mem = FlatMemory::new(0x10000);
    // BRK, signature byte; handler at $ABCD just executes RTI.
    mem.write_bytes(0xC000, &[0x00, 0x00]);
    mem.write_bytes(0xABCD, &[0x40]);
    mem.write_vector(0xFFFE, 0xABCD);
    mem.write_vector(0xFFFC, 0xC000);

    let mut cpu = Cpu::new(mem);
    cpu.step(); // BRK
    assert_eq!(cpu.pc, 0xABCD);
    assert!(cpu.p().irq_disable());
    assert!(!cpu.p().decimal());

    cpu.step(); // RTI
    assert_eq!(cpu.pc, 0xC002);
    assert!(cpu.p().break_flag());
    assert!(cpu.p().unused_flag());
}

#[test]
fn block_move_copies_full_region_and_advances_pc_once_done() {
    let mut mem = FlatMemory::new(0x30000);
    // MVN dest=$01 src=$02, native mode, 16-bit A/X/Y.
    mem.write_bytes(0, &[0x54, 0x01, 0x02]);
    mem.write_bytes(0x02_1000, &[0xDE, 0xAD, 0xBE, 0xEF]);
    mem.write_vector(0xFFFC, 0x0000);

    let mut cpu = Cpu::new(mem);
    cpu.e = false;
    cpu.set_status_byte(0); // 16-bit A and X/Y
    cpu.a = 0x0003; // 4 bytes to move
    cpu.x = 0x1000;
    cpu.y = 0x2000;

    for _ in 0..4 {
        assert_eq!(cpu.pc, 0x0000, "PC must not advance mid block-move");
        cpu.step();
    }

    assert_eq!(cpu.a, 0xFFFF);
    assert_eq!(cpu.dbr, 0x01);
    assert_eq!(cpu.pc, 0x0003);
    for i in 0..4u32 {
        assert_eq!(cpu.mem.load(0x01_2000 + i), cpu.mem.load(0x02_1000 + i));
    }
}

#[test]
fn indexed_absolute_load_charges_page_cross_penalty() {
    let mut mem = FlatMemory::new(0x10000);
    mem.write_bytes(0, &[0xBD, 0xFF, 0xC0]); // LDA $C0FF,X
    mem.write_vector(0xFFFC, 0x0000);

    let mut cpu = Cpu::new(mem);
    cpu.x = 1; // $C0FF + 1 crosses into $C100
    let cy = cpu.step();

    assert_eq!(cy, 5);
}

#[test]
fn jmp_absolute_indirect_does_not_have_the_nmos_page_wrap_bug() {
    let mut mem = FlatMemory::new(0x20000);
    mem.write_bytes(0, &[0x6C, 0xFF, 0x10]); // JMP ($10FF)
    mem.write_bytes(0x10FF, &[0x34]);
    mem.write_bytes(0x1100, &[0x12]);
    mem.write_vector(0xFFFC, 0x0000);

    let mut cpu = Cpu::new(mem);
    cpu.step();

    assert_eq!(cpu.pc, 0x1234);
}

#[test]
fn brl_reaches_the_far_end_of_its_signed_range() {
    let mut mem = FlatMemory::new(0x20000);
    mem.write_bytes(0, &[0x82, 0xFF, 0x7F]); // BRL +32767
    mem.write_vector(0xFFFC, 0x0000);

    let mut cpu = Cpu::new(mem);
    cpu.e = false;
    cpu.step();

    assert_eq!(cpu.pc, 0x8002);
}

#[test]
fn sep_then_rep_of_the_same_mask_is_the_identity() {
    let mut mem = FlatMemory::new(0x10000);
    mem.write_bytes(0, &[0xE2, 0x30, 0xC2, 0x30]); // SEP #$30; REP #$30
    mem.write_vector(0xFFFC, 0x0000);
    let mut cpu = Cpu::new(mem);
    cpu.e = false;
    let before = cpu.status_byte();

    cpu.step(); // SEP
    cpu.step(); // REP

    assert_eq!(cpu.status_byte(), before);
}

#[test]
fn stp_can_only_be_cleared_by_reset() {
    let mut mem = FlatMemory::new(0x10000);
    mem.write_bytes(0, &[0xDB, 0xEA]); // STP; NOP
    mem.write_vector(0xFFFC, 0x0000);

    let mut cpu = Cpu::new(mem);
    cpu.step(); // STP
    assert!(cpu.stopped);
    assert_eq!(cpu.step(), 0);
    assert_eq!(cpu.pc, 0x0001);

    cpu.reset();
    assert!(!cpu.stopped);
}
