//! Error types for the crate's ambient (non-architectural) I/O.
//!
//! The instruction core itself has no fallible operations - every opcode and
//! every address is defined, so `Cpu::step` never returns a `Result`. The one
//! place this crate does I/O that can fail is the data-driven test-fixture
//! loader in `testutil`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("fixture {path} has a program longer than a single bank (65536 bytes)")]
    ProgramTooLong { path: String },
}
