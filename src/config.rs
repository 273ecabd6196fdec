//! Simulator-level configuration, as opposed to architectural CPU state.

/// Cost-model choices that are not part of the 65C816's architectural state
/// but affect the cycle counts `Cpu::step` reports.
///
/// This generalizes the teacher's own `pub trace: bool` field on its `Cpu`
/// struct - a simulator knob hung off the same struct rather than a second
/// hardware register.
#[derive(Debug, Clone, Copy)]
pub struct CpuOptions {
    /// Whether direct-page addressing modes charge the extra cycle the
    /// 65816 Programming Manual documents for `D & 0xFF != 0`. Defaults to
    /// `true`, matching real hardware; some emulators omit this cycle as a
    /// simplification, so it is left switchable rather than baked in.
    pub direct_page_cycle_savings: bool,
}

impl Default for CpuOptions {
    fn default() -> CpuOptions {
        CpuOptions {
            direct_page_cycle_savings: true,
        }
    }
}
