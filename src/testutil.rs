//! Data-driven test fixtures: small JSON documents describing an initial CPU
//! state, a program, and the register/cycle state it should produce. Used by
//! the integration tests under `tests/`; not part of the architectural model.

use std::path::Path;

use serde::Deserialize;

use crate::{error::FixtureError, Cpu, FlatMemory};

fn default_true() -> bool {
    true
}

fn default_stack() -> u16 {
    0x01FF
}

/// A snapshot of the register file, as it appears in a fixture's `initial`
/// or `expected` block. Every field defaults to its RESET value so a fixture
/// only needs to spell out what it cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterState {
    #[serde(default)]
    pub a: u16,
    #[serde(default)]
    pub x: u16,
    #[serde(default)]
    pub y: u16,
    #[serde(default = "default_stack")]
    pub s: u16,
    #[serde(default)]
    pub d: u16,
    #[serde(default)]
    pub dbr: u8,
    #[serde(default)]
    pub pbr: u8,
    pub pc: u16,
    #[serde(default)]
    pub p: u8,
    #[serde(default = "default_true")]
    pub e: bool,
}

/// A fixture: a program placed at `load_addr` in bank 0, an initial register
/// state, how many `Cpu::step` calls to make, and the register/cycle state
/// that should result.
#[derive(Debug, Clone, Deserialize)]
pub struct TestFixture {
    pub load_addr: u16,
    pub program: Vec<u8>,
    pub initial: RegisterState,
    pub steps: u32,
    pub expected: RegisterState,
    pub expected_cycles: u64,
}

/// Parses a fixture from a JSON string.
pub fn parse_fixture(path: &str, json: &str) -> Result<TestFixture, FixtureError> {
    serde_json::from_str(json).map_err(|source| FixtureError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Reads and parses a fixture file from disk.
pub fn load_fixture(path: &Path) -> Result<TestFixture, FixtureError> {
    let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let fixture = parse_fixture(&path.display().to_string(), &json)?;
    if fixture.program.len() > 0x10000 {
        return Err(FixtureError::ProgramTooLong {
            path: path.display().to_string(),
        });
    }
    Ok(fixture)
}

/// Builds a `Cpu<FlatMemory>` from a fixture's program and initial state,
/// ready to be `step`-ped.
pub fn cpu_from_fixture(fixture: &TestFixture) -> Cpu<FlatMemory> {
    let mut mem = FlatMemory::new(0x20000);
    mem.write_bytes(fixture.load_addr as u32, &fixture.program);
    mem.write_vector(0xFFFC, fixture.load_addr);

    let mut cpu = Cpu::new(mem);
    apply_register_state(&mut cpu, &fixture.initial);
    cpu
}

/// Overwrites `cpu`'s register file with the values in `state`, including
/// entering native mode first if `state.e` is `false`.
pub fn apply_register_state<M: crate::Mem>(cpu: &mut Cpu<M>, state: &RegisterState) {
    if !state.e {
        cpu.e = false;
    }
    cpu.a = state.a;
    cpu.x = state.x;
    cpu.y = state.y;
    cpu.s = state.s;
    cpu.d = state.d;
    cpu.dbr = state.dbr;
    cpu.pbr = state.pbr;
    cpu.pc = state.pc;
    cpu.set_status_byte(state.p);
}
