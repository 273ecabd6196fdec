//! Opcode dispatch: the base cycle-cost table, the opcode `match` that
//! drives [`Cpu::step`], and the [`OPCODE_INFO`] table used by disassemblers
//! and test harnesses that want to describe an opcode without executing it.
//!
//! Also home to the opcode families that don't belong anywhere else:
//! PEA/PER/PEI (thin wrappers over `interrupt::push_effective`), the
//! conditional branches, JMP/JML/JSR/JSL, and WDM.

use crate::{addressing::AddressingMode, Cpu, Mem};

/// Base cycle cost for each opcode, indexed by the raw opcode byte. Handler
/// methods and `AddressingMode::address` add to this for 16-bit-operand and
/// page-crossing penalties - see `Cpu::charge_index_cycle` and
/// `Cpu::charge_direct_page_cycle`.
#[rustfmt::skip]
static CYCLE_TABLE: [u8; 256] = [
    7,6,7,4,5,3,5,6, 3,2,2,4,6,4,6,5,   // $00 - $0f
    2,5,5,7,5,4,6,6, 2,4,2,2,6,4,7,5,   // $10 - $1f
    6,6,8,4,3,3,5,6, 4,2,2,5,4,4,6,5,   // $20 - $2f
    2,5,5,7,4,4,6,6, 2,4,2,2,4,4,7,5,   // $30 - $3f
    7,6,2,4,7,3,5,6, 3,2,2,3,3,4,6,5,   // $40 - $4f
    2,5,5,7,7,4,6,6, 2,4,3,2,4,4,7,5,   // $50 - $5f
    7,6,6,4,3,3,5,6, 4,2,2,6,5,4,6,5,   // $60 - $6f
    2,5,5,7,4,4,6,6, 2,4,4,2,6,2,7,5,   // $70 - $7f
    2,6,3,4,3,3,3,2, 2,2,2,3,4,4,4,5,   // $80 - $8f
    2,6,5,7,4,4,4,6, 2,5,2,2,3,5,5,5,   // $90 - $9f
    2,6,2,4,3,3,3,6, 2,2,2,4,4,4,4,5,   // $a0 - $af
    2,5,5,7,4,4,4,6, 2,4,2,2,4,4,4,5,   // $b0 - $bf
    2,6,3,4,3,3,5,6, 2,2,2,3,4,4,6,5,   // $c0 - $cf
    2,5,5,7,6,4,6,6, 2,4,3,3,6,4,7,5,   // $d0 - $df
    2,6,3,4,3,3,5,6, 2,2,2,3,4,4,6,5,   // $e0 - $ef
    2,5,5,7,5,4,6,6, 2,4,4,2,6,4,7,5,   // $f0 - $ff
];

/// Addressing-mode tag used only by [`OPCODE_INFO`], for tools that want to
/// name an opcode's mode without resolving an address. Distinct from
/// [`AddressingMode`], which carries the fetched operand and does the
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrModeTag {
    Imm,
    Direct,
    DirectX,
    DirectY,
    DirectIndexedIndirect,
    DirectIndirect,
    DirectIndirectIndexed,
    DirectIndirectLong,
    DirectIndirectLongIdx,
    Absolute,
    AbsIndexedX,
    AbsIndexedY,
    AbsoluteLong,
    AbsLongIndexedX,
    AbsIndexedIndirect,
    AbsoluteIndirect,
    AbsoluteIndirectLong,
    StackRel,
    StackRelIndirectIndexed,
    Rel,
    RelLong,
}

/// Static diagnostics for one opcode: mnemonic, addressing-mode tag (`None`
/// for implied/accumulator/stack/block-move opcodes), base cycle cost, and
/// whether that cost can grow at runtime (page-cross, index width, 16-bit
/// accumulator).
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    pub mode: Option<AddrModeTag>,
    pub base_cycles: u8,
    pub variable_cycle: bool,
}

/// Parallel table to the opcode `match` in [`Cpu::step`]. Not consulted by
/// `step` itself - it exists for disassemblers, trace tooling and tests that
/// want to describe an opcode (e.g. "what mode does `$9D` use?") without
/// executing it.
#[rustfmt::skip]
pub static OPCODE_INFO: [OpcodeInfo; 256] = [
    OpcodeInfo { mnemonic: "BRK", mode: None, base_cycles: 7, variable_cycle: false }, // $00
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $01
    OpcodeInfo { mnemonic: "COP", mode: None, base_cycles: 7, variable_cycle: false }, // $02
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $03
    OpcodeInfo { mnemonic: "TSB", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $04
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $05
    OpcodeInfo { mnemonic: "ASL", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $06
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $07
    OpcodeInfo { mnemonic: "PHP", mode: None, base_cycles: 3, variable_cycle: false }, // $08
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $09
    OpcodeInfo { mnemonic: "ASL", mode: None, base_cycles: 2, variable_cycle: false }, // $0A
    OpcodeInfo { mnemonic: "PHD", mode: None, base_cycles: 4, variable_cycle: false }, // $0B
    OpcodeInfo { mnemonic: "TSB", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $0C
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $0D
    OpcodeInfo { mnemonic: "ASL", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $0E
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $0F
    OpcodeInfo { mnemonic: "BPL", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $10
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 5, variable_cycle: true }, // $11
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $12
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $13
    OpcodeInfo { mnemonic: "TRB", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $14
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $15
    OpcodeInfo { mnemonic: "ASL", mode: Some(AddrModeTag::DirectX), base_cycles: 6, variable_cycle: false }, // $16
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $17
    OpcodeInfo { mnemonic: "CLC", mode: None, base_cycles: 2, variable_cycle: false }, // $18
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $19
    OpcodeInfo { mnemonic: "INC", mode: None, base_cycles: 2, variable_cycle: false }, // $1A
    OpcodeInfo { mnemonic: "TCS", mode: None, base_cycles: 2, variable_cycle: false }, // $1B
    OpcodeInfo { mnemonic: "TRB", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $1C
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $1D
    OpcodeInfo { mnemonic: "ASL", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 7, variable_cycle: false }, // $1E
    OpcodeInfo { mnemonic: "ORA", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $1F
    OpcodeInfo { mnemonic: "JSR", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $20
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $21
    OpcodeInfo { mnemonic: "JSL", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 8, variable_cycle: false }, // $22
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $23
    OpcodeInfo { mnemonic: "BIT", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $24
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $25
    OpcodeInfo { mnemonic: "ROL", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $26
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $27
    OpcodeInfo { mnemonic: "PLP", mode: None, base_cycles: 4, variable_cycle: false }, // $28
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $29
    OpcodeInfo { mnemonic: "ROL", mode: None, base_cycles: 2, variable_cycle: false }, // $2A
    OpcodeInfo { mnemonic: "PLD", mode: None, base_cycles: 5, variable_cycle: false }, // $2B
    OpcodeInfo { mnemonic: "BIT", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $2C
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $2D
    OpcodeInfo { mnemonic: "ROL", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $2E
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $2F
    OpcodeInfo { mnemonic: "BMI", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $30
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 5, variable_cycle: true }, // $31
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $32
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $33
    OpcodeInfo { mnemonic: "BIT", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $34
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $35
    OpcodeInfo { mnemonic: "ROL", mode: Some(AddrModeTag::DirectX), base_cycles: 6, variable_cycle: false }, // $36
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $37
    OpcodeInfo { mnemonic: "SEC", mode: None, base_cycles: 2, variable_cycle: false }, // $38
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $39
    OpcodeInfo { mnemonic: "DEC", mode: None, base_cycles: 2, variable_cycle: false }, // $3A
    OpcodeInfo { mnemonic: "TSC", mode: None, base_cycles: 2, variable_cycle: false }, // $3B
    OpcodeInfo { mnemonic: "BIT", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: false }, // $3C
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $3D
    OpcodeInfo { mnemonic: "ROL", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 7, variable_cycle: false }, // $3E
    OpcodeInfo { mnemonic: "AND", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $3F
    OpcodeInfo { mnemonic: "RTI", mode: None, base_cycles: 7, variable_cycle: false }, // $40
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $41
    OpcodeInfo { mnemonic: "WDM", mode: None, base_cycles: 2, variable_cycle: false }, // $42
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $43
    OpcodeInfo { mnemonic: "MVP", mode: None, base_cycles: 7, variable_cycle: false }, // $44
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $45
    OpcodeInfo { mnemonic: "LSR", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $46
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $47
    OpcodeInfo { mnemonic: "PHA", mode: None, base_cycles: 3, variable_cycle: false }, // $48
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $49
    OpcodeInfo { mnemonic: "LSR", mode: None, base_cycles: 2, variable_cycle: false }, // $4A
    OpcodeInfo { mnemonic: "PHK", mode: None, base_cycles: 3, variable_cycle: false }, // $4B
    OpcodeInfo { mnemonic: "JMP", mode: Some(AddrModeTag::Absolute), base_cycles: 3, variable_cycle: false }, // $4C
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $4D
    OpcodeInfo { mnemonic: "LSR", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $4E
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $4F
    OpcodeInfo { mnemonic: "BVC", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $50
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 5, variable_cycle: true }, // $51
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $52
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $53
    OpcodeInfo { mnemonic: "MVN", mode: None, base_cycles: 7, variable_cycle: false }, // $54
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $55
    OpcodeInfo { mnemonic: "LSR", mode: Some(AddrModeTag::DirectX), base_cycles: 6, variable_cycle: false }, // $56
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $57
    OpcodeInfo { mnemonic: "CLI", mode: None, base_cycles: 2, variable_cycle: false }, // $58
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $59
    OpcodeInfo { mnemonic: "PHY", mode: None, base_cycles: 3, variable_cycle: false }, // $5A
    OpcodeInfo { mnemonic: "TCD", mode: None, base_cycles: 2, variable_cycle: false }, // $5B
    OpcodeInfo { mnemonic: "JML", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 4, variable_cycle: false }, // $5C
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $5D
    OpcodeInfo { mnemonic: "LSR", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 7, variable_cycle: false }, // $5E
    OpcodeInfo { mnemonic: "EOR", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $5F
    OpcodeInfo { mnemonic: "RTS", mode: None, base_cycles: 7, variable_cycle: false }, // $60
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $61
    OpcodeInfo { mnemonic: "PER", mode: Some(AddrModeTag::RelLong), base_cycles: 6, variable_cycle: false }, // $62
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $63
    OpcodeInfo { mnemonic: "STZ", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $64
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $65
    OpcodeInfo { mnemonic: "ROR", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $66
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $67
    OpcodeInfo { mnemonic: "PLA", mode: None, base_cycles: 4, variable_cycle: false }, // $68
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $69
    OpcodeInfo { mnemonic: "ROR", mode: None, base_cycles: 2, variable_cycle: false }, // $6A
    OpcodeInfo { mnemonic: "RTL", mode: None, base_cycles: 6, variable_cycle: false }, // $6B
    OpcodeInfo { mnemonic: "JMP", mode: Some(AddrModeTag::AbsoluteIndirect), base_cycles: 5, variable_cycle: false }, // $6C
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $6D
    OpcodeInfo { mnemonic: "ROR", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $6E
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $6F
    OpcodeInfo { mnemonic: "BVS", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $70
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 5, variable_cycle: true }, // $71
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $72
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $73
    OpcodeInfo { mnemonic: "STZ", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $74
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $75
    OpcodeInfo { mnemonic: "ROR", mode: Some(AddrModeTag::DirectX), base_cycles: 6, variable_cycle: false }, // $76
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $77
    OpcodeInfo { mnemonic: "SEI", mode: None, base_cycles: 2, variable_cycle: false }, // $78
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $79
    OpcodeInfo { mnemonic: "PLY", mode: None, base_cycles: 4, variable_cycle: false }, // $7A
    OpcodeInfo { mnemonic: "TDC", mode: None, base_cycles: 2, variable_cycle: false }, // $7B
    OpcodeInfo { mnemonic: "JMP", mode: Some(AddrModeTag::AbsIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $7C
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $7D
    OpcodeInfo { mnemonic: "ROR", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 7, variable_cycle: false }, // $7E
    OpcodeInfo { mnemonic: "ADC", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $7F
    OpcodeInfo { mnemonic: "BRA", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $80
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $81
    OpcodeInfo { mnemonic: "BRL", mode: Some(AddrModeTag::RelLong), base_cycles: 3, variable_cycle: false }, // $82
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $83
    OpcodeInfo { mnemonic: "STY", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $84
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $85
    OpcodeInfo { mnemonic: "STX", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $86
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $87
    OpcodeInfo { mnemonic: "DEY", mode: None, base_cycles: 2, variable_cycle: false }, // $88
    OpcodeInfo { mnemonic: "BIT", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $89
    OpcodeInfo { mnemonic: "TXA", mode: None, base_cycles: 2, variable_cycle: false }, // $8A
    OpcodeInfo { mnemonic: "PHB", mode: None, base_cycles: 3, variable_cycle: false }, // $8B
    OpcodeInfo { mnemonic: "STY", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $8C
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $8D
    OpcodeInfo { mnemonic: "STX", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $8E
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $8F
    OpcodeInfo { mnemonic: "BCC", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $90
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 6, variable_cycle: false }, // $91
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $92
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $93
    OpcodeInfo { mnemonic: "STY", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $94
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $95
    OpcodeInfo { mnemonic: "STX", mode: Some(AddrModeTag::DirectY), base_cycles: 4, variable_cycle: false }, // $96
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $97
    OpcodeInfo { mnemonic: "TYA", mode: None, base_cycles: 2, variable_cycle: false }, // $98
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 5, variable_cycle: false }, // $99
    OpcodeInfo { mnemonic: "TXS", mode: None, base_cycles: 2, variable_cycle: false }, // $9A
    OpcodeInfo { mnemonic: "TXY", mode: None, base_cycles: 2, variable_cycle: false }, // $9B
    OpcodeInfo { mnemonic: "STZ", mode: Some(AddrModeTag::Absolute), base_cycles: 3, variable_cycle: false }, // $9C
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 5, variable_cycle: false }, // $9D
    OpcodeInfo { mnemonic: "STZ", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 5, variable_cycle: false }, // $9E
    OpcodeInfo { mnemonic: "STA", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $9F
    OpcodeInfo { mnemonic: "LDY", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $A0
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $A1
    OpcodeInfo { mnemonic: "LDX", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $A2
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $A3
    OpcodeInfo { mnemonic: "LDY", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $A4
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $A5
    OpcodeInfo { mnemonic: "LDX", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $A6
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $A7
    OpcodeInfo { mnemonic: "TAY", mode: None, base_cycles: 2, variable_cycle: false }, // $A8
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $A9
    OpcodeInfo { mnemonic: "TAX", mode: None, base_cycles: 2, variable_cycle: false }, // $AA
    OpcodeInfo { mnemonic: "PLB", mode: None, base_cycles: 4, variable_cycle: false }, // $AB
    OpcodeInfo { mnemonic: "LDY", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $AC
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $AD
    OpcodeInfo { mnemonic: "LDX", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $AE
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $AF
    OpcodeInfo { mnemonic: "BCS", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $B0
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 5, variable_cycle: true }, // $B1
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $B2
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $B3
    OpcodeInfo { mnemonic: "LDY", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $B4
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $B5
    OpcodeInfo { mnemonic: "LDX", mode: Some(AddrModeTag::DirectY), base_cycles: 4, variable_cycle: false }, // $B6
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $B7
    OpcodeInfo { mnemonic: "CLV", mode: None, base_cycles: 2, variable_cycle: false }, // $B8
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $B9
    OpcodeInfo { mnemonic: "TSX", mode: None, base_cycles: 2, variable_cycle: false }, // $BA
    OpcodeInfo { mnemonic: "TYX", mode: None, base_cycles: 2, variable_cycle: false }, // $BB
    OpcodeInfo { mnemonic: "LDY", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $BC
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $BD
    OpcodeInfo { mnemonic: "LDX", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $BE
    OpcodeInfo { mnemonic: "LDA", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $BF
    OpcodeInfo { mnemonic: "CPY", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $C0
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $C1
    OpcodeInfo { mnemonic: "REP", mode: Some(AddrModeTag::Imm), base_cycles: 3, variable_cycle: false }, // $C2
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $C3
    OpcodeInfo { mnemonic: "CPY", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $C4
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $C5
    OpcodeInfo { mnemonic: "DEC", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $C6
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $C7
    OpcodeInfo { mnemonic: "INY", mode: None, base_cycles: 2, variable_cycle: false }, // $C8
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $C9
    OpcodeInfo { mnemonic: "DEX", mode: None, base_cycles: 2, variable_cycle: false }, // $CA
    OpcodeInfo { mnemonic: "WAI", mode: None, base_cycles: 3, variable_cycle: false }, // $CB
    OpcodeInfo { mnemonic: "CPY", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $CC
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $CD
    OpcodeInfo { mnemonic: "DEC", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $CE
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $CF
    OpcodeInfo { mnemonic: "BNE", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $D0
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 5, variable_cycle: true }, // $D1
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $D2
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $D3
    OpcodeInfo { mnemonic: "PEI", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 6, variable_cycle: false }, // $D4
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $D5
    OpcodeInfo { mnemonic: "DEC", mode: Some(AddrModeTag::DirectX), base_cycles: 6, variable_cycle: false }, // $D6
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $D7
    OpcodeInfo { mnemonic: "CLD", mode: None, base_cycles: 2, variable_cycle: false }, // $D8
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $D9
    OpcodeInfo { mnemonic: "PHX", mode: None, base_cycles: 3, variable_cycle: false }, // $DA
    OpcodeInfo { mnemonic: "STP", mode: None, base_cycles: 3, variable_cycle: false }, // $DB
    OpcodeInfo { mnemonic: "JML", mode: Some(AddrModeTag::AbsoluteIndirectLong), base_cycles: 6, variable_cycle: false }, // $DC
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $DD
    OpcodeInfo { mnemonic: "DEC", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 7, variable_cycle: false }, // $DE
    OpcodeInfo { mnemonic: "CMP", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $DF
    OpcodeInfo { mnemonic: "CPX", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $E0
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::DirectIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $E1
    OpcodeInfo { mnemonic: "SEP", mode: Some(AddrModeTag::Imm), base_cycles: 3, variable_cycle: false }, // $E2
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::StackRel), base_cycles: 4, variable_cycle: false }, // $E3
    OpcodeInfo { mnemonic: "CPX", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $E4
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::Direct), base_cycles: 3, variable_cycle: false }, // $E5
    OpcodeInfo { mnemonic: "INC", mode: Some(AddrModeTag::Direct), base_cycles: 5, variable_cycle: false }, // $E6
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::DirectIndirectLong), base_cycles: 6, variable_cycle: false }, // $E7
    OpcodeInfo { mnemonic: "INX", mode: None, base_cycles: 2, variable_cycle: false }, // $E8
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::Imm), base_cycles: 2, variable_cycle: false }, // $E9
    OpcodeInfo { mnemonic: "NOP", mode: None, base_cycles: 2, variable_cycle: false }, // $EA
    OpcodeInfo { mnemonic: "XBA", mode: None, base_cycles: 3, variable_cycle: false }, // $EB
    OpcodeInfo { mnemonic: "CPX", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $EC
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::Absolute), base_cycles: 4, variable_cycle: false }, // $ED
    OpcodeInfo { mnemonic: "INC", mode: Some(AddrModeTag::Absolute), base_cycles: 6, variable_cycle: false }, // $EE
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::AbsoluteLong), base_cycles: 5, variable_cycle: false }, // $EF
    OpcodeInfo { mnemonic: "BEQ", mode: Some(AddrModeTag::Rel), base_cycles: 2, variable_cycle: true }, // $F0
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::DirectIndirectIndexed), base_cycles: 5, variable_cycle: true }, // $F1
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::DirectIndirect), base_cycles: 5, variable_cycle: false }, // $F2
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::StackRelIndirectIndexed), base_cycles: 7, variable_cycle: false }, // $F3
    OpcodeInfo { mnemonic: "PEA", mode: Some(AddrModeTag::Absolute), base_cycles: 5, variable_cycle: false }, // $F4
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::DirectX), base_cycles: 4, variable_cycle: false }, // $F5
    OpcodeInfo { mnemonic: "INC", mode: Some(AddrModeTag::DirectX), base_cycles: 6, variable_cycle: false }, // $F6
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::DirectIndirectLongIdx), base_cycles: 6, variable_cycle: false }, // $F7
    OpcodeInfo { mnemonic: "SED", mode: None, base_cycles: 2, variable_cycle: false }, // $F8
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::AbsIndexedY), base_cycles: 4, variable_cycle: true }, // $F9
    OpcodeInfo { mnemonic: "PLX", mode: None, base_cycles: 4, variable_cycle: false }, // $FA
    OpcodeInfo { mnemonic: "XCE", mode: None, base_cycles: 2, variable_cycle: false }, // $FB
    OpcodeInfo { mnemonic: "JSR", mode: Some(AddrModeTag::AbsIndexedIndirect), base_cycles: 6, variable_cycle: false }, // $FC
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 4, variable_cycle: true }, // $FD
    OpcodeInfo { mnemonic: "INC", mode: Some(AddrModeTag::AbsIndexedX), base_cycles: 7, variable_cycle: false }, // $FE
    OpcodeInfo { mnemonic: "SBC", mode: Some(AddrModeTag::AbsLongIndexedX), base_cycles: 5, variable_cycle: false }, // $FF
];

impl<M: Mem> Cpu<M> {
    /// Executes one instruction and returns the number of cycles it took.
    ///
    /// If `stopped` (set by `STP`), does no work and returns 0 - only a
    /// host-driven `reset` clears it. If `waiting` (set by `WAI`), also does
    /// no work but still charges one cycle; cleared by the next
    /// `irq`/`nmi`/`abort`.
    pub fn step(&mut self) -> u16 {
        if self.stopped {
            return 0;
        }
        if self.waiting {
            self.cycles += 1;
            return 1;
        }

        let pc = self.pc;
        self.cy = 0;
        let op = self.fetch_byte();
        self.cy += CYCLE_TABLE[op as usize] as u16;
        self.variable_cycle = OPCODE_INFO[op as usize].variable_cycle;

        macro_rules! instr {
            ( $name:ident ) => {{
                self.trace_op(pc, op, stringify!($name), None);
                self.$name()
            }};
            ( $name:ident $am:ident ) => {{
                let am = self.$am();
                self.trace_op(pc, op, stringify!($name), Some(&am));
                self.$name(am)
            }};
        }

        match op {
            // Interrupts and coprocessor calls
            0x00 => instr!(brk),
            0x02 => instr!(cop),
            0x42 => instr!(wdm),

            // Stack operations
            0x4b => instr!(phk),
            0x0b => instr!(phd),
            0x2b => instr!(pld),
            0x8b => instr!(phb),
            0xab => instr!(plb),
            0x08 => instr!(php),
            0x28 => instr!(plp),
            0x48 => instr!(pha),
            0x68 => instr!(pla),
            0xda => instr!(phx),
            0xfa => instr!(plx),
            0x5a => instr!(phy),
            0x7a => instr!(ply),
            0xf4 => instr!(pea absolute),
            0x62 => instr!(per relative_long),
            0xd4 => instr!(pei direct_indirect),

            // Processor status
            0x18 => instr!(clc),
            0x38 => instr!(sec),
            0x58 => instr!(cli),
            0x78 => instr!(sei),
            0xcb => instr!(wai),
            0xd8 => instr!(cld),
            0xf8 => instr!(sed),
            0xb8 => instr!(clv),
            0xfb => instr!(xce),
            0xc2 => {
                let am = self.immediate8();
                self.trace_op(pc, op, "rep", Some(&am));
                let value = am.loadb(self);
                self.rep(value)
            }
            0xe2 => {
                let am = self.immediate8();
                self.trace_op(pc, op, "sep", Some(&am));
                let value = am.loadb(self);
                self.sep(value)
            }
            0xdb => instr!(stp),

            // Arithmetic
            0x0a => instr!(asl_a),
            0x06 => instr!(asl direct),
            0x16 => instr!(asl direct_indexed_x),
            0x0e => instr!(asl absolute),
            0x1e => instr!(asl absolute_indexed_x),
            0x2a => instr!(rol_a),
            0x26 => instr!(rol direct),
            0x2e => instr!(rol absolute),
            0x3e => instr!(rol absolute_indexed_x),
            0x36 => instr!(rol direct_indexed_x),
            0x4a => instr!(lsr_a),
            0x46 => instr!(lsr direct),
            0x4e => instr!(lsr absolute),
            0x56 => instr!(lsr direct_indexed_x),
            0x5e => instr!(lsr absolute_indexed_x),
            0x66 => instr!(ror direct),
            0x6a => instr!(ror_a),
            0x6e => instr!(ror absolute),
            0x76 => instr!(ror direct_indexed_x),
            0x7e => instr!(ror absolute_indexed_x),
            0x23 => instr!(and stack_rel),
            0x25 => instr!(and direct),
            0x27 => instr!(and direct_indirect_long),
            0x37 => instr!(and direct_indirect_long_idx),
            0x21 => instr!(and direct_indexed_indirect),
            0x29 => instr!(and immediate_acc),
            0x2d => instr!(and absolute),
            0x3d => instr!(and absolute_indexed_x),
            0x39 => instr!(and absolute_indexed_y),
            0x2f => instr!(and absolute_long),
            0x3f => instr!(and absolute_long_indexed_x),
            0x31 => instr!(and direct_indirect_indexed),
            0x32 => instr!(and direct_indirect),
            0x33 => instr!(and stack_rel_indirect_indexed),
            0x35 => instr!(and direct_indexed_x),
            0x03 => instr!(ora stack_rel),
            0x05 => instr!(ora direct),
            0x15 => instr!(ora direct_indexed_x),
            0x09 => instr!(ora immediate_acc),
            0x12 => instr!(ora direct_indirect),
            0x07 => instr!(ora direct_indirect_long),
            0x17 => instr!(ora direct_indirect_long_idx),
            0x0d => instr!(ora absolute),
            0x1d => instr!(ora absolute_indexed_x),
            0x19 => instr!(ora absolute_indexed_y),
            0x0f => instr!(ora absolute_long),
            0x1f => instr!(ora absolute_long_indexed_x),
            0x01 => instr!(ora direct_indexed_indirect),
            0x11 => instr!(ora direct_indirect_indexed),
            0x13 => instr!(ora stack_rel_indirect_indexed),
            0x45 => instr!(eor direct),
            0x55 => instr!(eor direct_indexed_x),
            0x49 => instr!(eor immediate_acc),
            0x4d => instr!(eor absolute),
            0x5d => instr!(eor absolute_indexed_x),
            0x59 => instr!(eor absolute_indexed_y),
            0x4f => instr!(eor absolute_long),
            0x5f => instr!(eor absolute_long_indexed_x),
            0x41 => instr!(eor direct_indexed_indirect),
            0x43 => instr!(eor stack_rel),
            0x47 => instr!(eor direct_indirect_long),
            0x51 => instr!(eor direct_indirect_indexed),
            0x52 => instr!(eor direct_indirect),
            0x53 => instr!(eor stack_rel_indirect_indexed),
            0x57 => instr!(eor direct_indirect_long_idx),
            0x65 => instr!(adc direct),
            0x75 => instr!(adc direct_indexed_x),
            0x72 => instr!(adc direct_indirect),
            0x71 => instr!(adc direct_indirect_indexed),
            0x77 => instr!(adc direct_indirect_long_idx),
            0x67 => instr!(adc direct_indirect_long),
            0x69 => instr!(adc immediate_acc),
            0x6d => instr!(adc absolute),
            0x7d => instr!(adc absolute_indexed_x),
            0x79 => instr!(adc absolute_indexed_y),
            0x6f => instr!(adc absolute_long),
            0x7f => instr!(adc absolute_long_indexed_x),
            0x61 => instr!(adc direct_indexed_indirect),
            0x63 => instr!(adc stack_rel),
            0x73 => instr!(adc stack_rel_indirect_indexed),
            0xe5 => instr!(sbc direct),
            0xf5 => instr!(sbc direct_indexed_x),
            0xe9 => instr!(sbc immediate_acc),
            0xed => instr!(sbc absolute),
            0xf9 => instr!(sbc absolute_indexed_y),
            0xfd => instr!(sbc absolute_indexed_x),
            0xef => instr!(sbc absolute_long),
            0xff => instr!(sbc absolute_long_indexed_x),
            0xe1 => instr!(sbc direct_indexed_indirect),
            0xe3 => instr!(sbc stack_rel),
            0xe7 => instr!(sbc direct_indirect_long),
            0xf1 => instr!(sbc direct_indirect_indexed),
            0xf2 => instr!(sbc direct_indirect),
            0xf3 => instr!(sbc stack_rel_indirect_indexed),
            0xf7 => instr!(sbc direct_indirect_long_idx),
            0xe6 => instr!(inc direct),
            0xf6 => instr!(inc direct_indexed_x),
            0xfe => instr!(inc absolute_indexed_x),
            0xee => instr!(inc absolute),
            0x1a => instr!(ina),
            0xe8 => instr!(inx),
            0xc8 => instr!(iny),
            0x3a => instr!(dea),
            0xc6 => instr!(dec direct),
            0xd6 => instr!(dec direct_indexed_x),
            0xce => instr!(dec absolute),
            0xde => instr!(dec absolute_indexed_x),
            0xca => instr!(dex),
            0x88 => instr!(dey),

            // Register and memory transfers
            0x5b => instr!(tcd),
            0x7b => instr!(tdc),
            0x1b => instr!(tcs),
            0x3b => instr!(tsc),
            0xba => instr!(tsx),
            0xaa => instr!(tax),
            0xa8 => instr!(tay),
            0x8a => instr!(txa),
            0x9a => instr!(txs),
            0x9b => instr!(txy),
            0x98 => instr!(tya),
            0xbb => instr!(tyx),
            0xeb => instr!(xba),
            0x83 => instr!(sta stack_rel),
            0x85 => instr!(sta direct),
            0x95 => instr!(sta direct_indexed_x),
            0x92 => instr!(sta direct_indirect),
            0x87 => instr!(sta direct_indirect_long),
            0x97 => instr!(sta direct_indirect_long_idx),
            0x8d => instr!(sta absolute),
            0x8f => instr!(sta absolute_long),
            0x9d => instr!(sta absolute_indexed_x),
            0x99 => instr!(sta absolute_indexed_y),
            0x9f => instr!(sta absolute_long_indexed_x),
            0x81 => instr!(sta direct_indexed_indirect),
            0x91 => instr!(sta direct_indirect_indexed),
            0x93 => instr!(sta stack_rel_indirect_indexed),
            0x86 => instr!(stx direct),
            0x96 => instr!(stx direct_indexed_y),
            0x8e => instr!(stx absolute),
            0x84 => instr!(sty direct),
            0x94 => instr!(sty direct_indexed_y),
            0x8c => instr!(sty absolute),
            0x64 => instr!(stz direct),
            0x9c => instr!(stz absolute),
            0x74 => instr!(stz direct_indexed_x),
            0x9e => instr!(stz absolute_indexed_x),
            0xa3 => instr!(lda stack_rel),
            0xa5 => instr!(lda direct),
            0xb5 => instr!(lda direct_indexed_x),
            0xb1 => instr!(lda direct_indirect_indexed),
            0xa9 => instr!(lda immediate_acc),
            0xb2 => instr!(lda direct_indirect),
            0xa7 => instr!(lda direct_indirect_long),
            0xb7 => instr!(lda direct_indirect_long_idx),
            0xad => instr!(lda absolute),
            0xbd => instr!(lda absolute_indexed_x),
            0xb9 => instr!(lda absolute_indexed_y),
            0xaf => instr!(lda absolute_long),
            0xbf => instr!(lda absolute_long_indexed_x),
            0xa1 => instr!(lda direct_indexed_indirect),
            0xb3 => instr!(lda stack_rel_indirect_indexed),
            0xa6 => instr!(ldx direct),
            0xb6 => instr!(ldx direct_indexed_y),
            0xa2 => instr!(ldx immediate_index),
            0xae => instr!(ldx absolute),
            0xbe => instr!(ldx absolute_indexed_y),
            0xa4 => instr!(ldy direct),
            0xb4 => instr!(ldy direct_indexed_x),
            0xa0 => instr!(ldy immediate_index),
            0xac => instr!(ldy absolute),
            0xbc => instr!(ldy absolute_indexed_x),
            0x54 => instr!(mvn),
            0x44 => instr!(mvp),

            // Bit operations
            0x24 => instr!(bit direct),
            0x2c => instr!(bit absolute),
            0x34 => instr!(bit direct_indexed_x),
            0x3c => instr!(bit absolute_indexed_x),
            0x89 => instr!(bit immediate_acc),
            0x04 => instr!(tsb direct),
            0x0c => instr!(tsb absolute),
            0x14 => instr!(trb direct),
            0x1c => instr!(trb absolute),

            // Comparisons
            0xc9 => instr!(cmp immediate_acc),
            0xc5 => instr!(cmp direct),
            0xd5 => instr!(cmp direct_indexed_x),
            0xcd => instr!(cmp absolute),
            0xdd => instr!(cmp absolute_indexed_x),
            0xd9 => instr!(cmp absolute_indexed_y),
            0xcf => instr!(cmp absolute_long),
            0xdf => instr!(cmp absolute_long_indexed_x),
            0xd2 => instr!(cmp direct_indirect),
            0xd1 => instr!(cmp direct_indirect_indexed),
            0xd7 => instr!(cmp direct_indirect_long_idx),
            0xc1 => instr!(cmp direct_indexed_indirect),
            0xc3 => instr!(cmp stack_rel),
            0xc7 => instr!(cmp direct_indirect_long),
            0xd3 => instr!(cmp stack_rel_indirect_indexed),
            0xe0 => instr!(cpx immediate_index),
            0xe4 => instr!(cpx direct),
            0xec => instr!(cpx absolute),
            0xc0 => instr!(cpy immediate_index),
            0xc4 => instr!(cpy direct),
            0xcc => instr!(cpy absolute),

            // Branches
            0x80 => instr!(bra rel),
            0x82 => instr!(bra relative_long), // BRL
            0xf0 => instr!(beq rel),
            0xd0 => instr!(bne rel),
            0x10 => instr!(bpl rel),
            0x30 => instr!(bmi rel),
            0x50 => instr!(bvc rel),
            0x70 => instr!(bvs rel),
            0x90 => instr!(bcc rel),
            0xb0 => instr!(bcs rel),

            // Jumps, calls and returns
            0x4c => instr!(jmp absolute), // PBR not consulted
            0x5c => instr!(jml absolute_long),
            0x6c => instr!(jmp absolute_indirect),
            0x7c => instr!(jmp absolute_indexed_indirect),
            0xdc => instr!(jml absolute_indirect_long),
            0x20 => instr!(jsr absolute),
            0x22 => instr!(jsl absolute_long),
            0xfc => instr!(jsr absolute_indexed_indirect),
            0x40 => instr!(rti),
            0x60 => instr!(rts),
            0x6b => instr!(rtl),

            0xea => instr!(nop),
        }

        self.cycles += self.cy as u64;
        self.cy
    }

    /// WDM ($42): a documented reserved 2-byte opcode, guaranteed by the
    /// datasheet to behave as a NOP that consumes one operand byte.
    pub(crate) fn wdm(&mut self) {
        self.fetch_byte();
    }

    /// Push Effective Absolute Address: pushes the raw 16-bit operand.
    pub(crate) fn pea(&mut self, am: AddressingMode) {
        self.push_effective(am);
    }

    /// Push Effective PC-Relative Address: pushes the resolved target of a
    /// `RelLong` operand (not the PC itself).
    pub(crate) fn per(&mut self, am: AddressingMode) {
        self.push_effective(am);
    }

    /// Push Effective Indirect Address: pushes the pointer read from the
    /// direct page, same underlying mechanics as PEA/PER.
    pub(crate) fn pei(&mut self, am: AddressingMode) {
        self.push_effective(am);
    }

    /// Jump Long: sets both PBR and PC from the resolved target.
    pub(crate) fn jml(&mut self, am: AddressingMode) {
        let target = am.address(self);
        self.branch(target);
    }

    /// Jump within the current program bank. The resolved bank (DBR for
    /// `(a,x)`/`(a)`, PBR for plain absolute) is discarded - PBR never
    /// changes on a short jump.
    pub(crate) fn jmp(&mut self, am: AddressingMode) {
        let (_, addr) = am.address(self);
        self.pc = addr;
    }

    /// Branch Always / Branch Long (BRL uses the same handler with
    /// `relative_long` addressing). Unconditional, so always charges the
    /// branch-taken cycle.
    pub(crate) fn bra(&mut self, am: AddressingMode) {
        let target = am.address(self);
        self.branch(target);
        self.cy += 1;
    }

    /// Branch if Plus (N = 0).
    pub(crate) fn bpl(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if !self.p.negative() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Branch if Minus (N = 1).
    pub(crate) fn bmi(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if self.p.negative() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Branch if Overflow Clear.
    pub(crate) fn bvc(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if !self.p.overflow() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Branch if Overflow Set.
    pub(crate) fn bvs(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if self.p.overflow() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Branch if Carry Clear.
    pub(crate) fn bcc(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if !self.p.carry() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Branch if Carry Set.
    pub(crate) fn bcs(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if self.p.carry() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Branch if Equal (Z = 1).
    pub(crate) fn beq(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if self.p.zero() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Branch if Not Equal (Z = 0).
    pub(crate) fn bne(&mut self, am: AddressingMode) {
        let target = am.address(self);
        if !self.p.zero() {
            self.branch(target);
            self.cy += 1;
        }
    }

    /// Jump to Subroutine: pushes `PC - 1` (the address of the last operand
    /// byte, per the 65x convention RTS undoes by incrementing after pop).
    pub(crate) fn jsr(&mut self, am: AddressingMode) {
        let ret = self.pc.wrapping_sub(1);
        self.pushw(ret);
        self.pc = am.address(self).1;
    }

    /// Jump Long to Subroutine: as `jsr`, but also pushes (and then
    /// replaces) PBR.
    pub(crate) fn jsl(&mut self, am: AddressingMode) {
        self.pushb(self.pbr);
        let ret = self.pc.wrapping_sub(1);
        self.pushw(ret);
        let (pbr, pc) = am.address(self);
        self.pbr = pbr;
        self.pc = pc;
    }
}

#[cfg(test)]
mod tests {
    use crate::{mem::FlatMemory, Cpu};

    #[test]
    fn jsr_then_rts_returns_to_the_instruction_after_jsr() {
        let mut mem = FlatMemory::new(0x10000);
        // JSR $1000; BRK (never reached); at $1000: RTS
        mem.write_bytes(0, &[0x20, 0x00, 0x10]);
        mem.write_bytes(0x1000, &[0x60]);
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        cpu.step(); // JSR
        assert_eq!(cpu.pc, 0x1000);
        cpu.step(); // RTS
        assert_eq!(cpu.pc, 0x0003);
    }

    #[test]
    fn jsl_then_rtl_restores_pbr_and_returns_past_the_instruction() {
        let mut mem = FlatMemory::new(0x20000);
        // JSL $01:2000; at $01:2000: RTL
        mem.write_bytes(0, &[0x22, 0x00, 0x20, 0x01]);
        mem.write_bytes(0x12000, &[0x6b]);
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        cpu.xce();
        cpu.step(); // JSL
        assert_eq!(cpu.pbr, 0x01);
        assert_eq!(cpu.pc, 0x2000);
        cpu.step(); // RTL
        assert_eq!(cpu.pbr, 0x00);
        assert_eq!(cpu.pc, 0x0004);
    }

    #[test]
    fn branch_not_taken_falls_through_without_extra_cycle() {
        let mut mem = FlatMemory::new(0x10000);
        mem.write_bytes(0, &[0xf0, 0x10]); // BEQ +16, Z clear at reset
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        let cy = cpu.step();
        assert_eq!(cy, 2);
        assert_eq!(cpu.pc, 0x0002);
    }

    #[test]
    fn branch_taken_charges_extra_cycle_and_jumps() {
        let mut mem = FlatMemory::new(0x10000);
        mem.write_bytes(0, &[0x80, 0x10]); // BRA +16
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        let cy = cpu.step();
        assert_eq!(cy, 3);
        assert_eq!(cpu.pc, 0x0012);
    }

    #[test]
    fn wdm_consumes_one_operand_byte_and_falls_through() {
        let mut mem = FlatMemory::new(0x10000);
        mem.write_bytes(0, &[0x42, 0xff, 0xea]); // WDM $ff; NOP
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        cpu.step();
        assert_eq!(cpu.pc, 0x0002);
    }

    #[test]
    fn stp_and_wai_are_wired_through_step() {
        let mut mem = FlatMemory::new(0x10000);
        mem.write_bytes(0, &[0xdb]); // STP
        mem.write_vector(0xFFFC, 0x0000);
        let mut cpu = Cpu::new(mem);
        assert_eq!(cpu.step(), 0);
        assert!(cpu.stopped);
    }

    #[test]
    fn opcode_info_covers_every_byte_with_a_matching_mnemonic() {
        assert_eq!(super::OPCODE_INFO[0x00].mnemonic, "BRK");
        assert_eq!(super::OPCODE_INFO[0x42].mnemonic, "WDM");
        assert_eq!(super::OPCODE_INFO[0xdb].mnemonic, "STP");
        assert_eq!(super::OPCODE_INFO[0xd4].mnemonic, "PEI");
        for info in super::OPCODE_INFO.iter() {
            assert!(!info.mnemonic.is_empty());
        }
    }
}
