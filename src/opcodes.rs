//! Static opcode table.
//!
//! A 256-entry table maps each opcode byte to its mnemonic and addressing
//! mode. The table is built once at compile time; an opcode with no entry
//! is represented as `None` and surfaces as an explicit error at dispatch,
//! never a silent fallthrough. All 151 documented NMOS 6502 instructions
//! are present.

use crate::addressing::AddressingMode;

/// Instruction mnemonics, one per documented operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Mnemonic {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS,
    CLC, CLD, CLI, CLV, CMP, CPX, CPY, DEC, DEX, DEY, EOR, INC, INX,
    INY, JMP, JSR, LDA, LDX, LDY, LSR, NOP, ORA, PHA, PHP, PLA, PLP,
    ROL, ROR, RTI, RTS, SBC, SEC, SED, SEI, STA, STX, STY, TAX, TAY,
    TSX, TXA, TXS, TYA,
}

/// One entry of the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
}

const fn ins(mnemonic: Mnemonic, mode: AddressingMode) -> Option<Instruction> {
    Some(Instruction { mnemonic, mode })
}

const fn decode(opcode: u8) -> Option<Instruction> {
    use AddressingMode::*;
    use Mnemonic::*;

    match opcode {
        // Loads
        0xA9 => ins(LDA, Immediate),
        0xA5 => ins(LDA, ZeroPage),
        0xB5 => ins(LDA, ZeroPageX),
        0xAD => ins(LDA, Absolute),
        0xBD => ins(LDA, AbsoluteX),
        0xB9 => ins(LDA, AbsoluteY),
        0xA1 => ins(LDA, IndirectX),
        0xB1 => ins(LDA, IndirectY),
        0xA2 => ins(LDX, Immediate),
        0xA6 => ins(LDX, ZeroPage),
        0xB6 => ins(LDX, ZeroPageY),
        0xAE => ins(LDX, Absolute),
        0xBE => ins(LDX, AbsoluteY),
        0xA0 => ins(LDY, Immediate),
        0xA4 => ins(LDY, ZeroPage),
        0xB4 => ins(LDY, ZeroPageX),
        0xAC => ins(LDY, Absolute),
        0xBC => ins(LDY, AbsoluteX),

        // Stores
        0x85 => ins(STA, ZeroPage),
        0x95 => ins(STA, ZeroPageX),
        0x8D => ins(STA, Absolute),
        0x9D => ins(STA, AbsoluteX),
        0x99 => ins(STA, AbsoluteY),
        0x81 => ins(STA, IndirectX),
        0x91 => ins(STA, IndirectY),
        0x86 => ins(STX, ZeroPage),
        0x96 => ins(STX, ZeroPageY),
        0x8E => ins(STX, Absolute),
        0x84 => ins(STY, ZeroPage),
        0x94 => ins(STY, ZeroPageX),
        0x8C => ins(STY, Absolute),

        // Transfers
        0xAA => ins(TAX, Implied),
        0xA8 => ins(TAY, Implied),
        0x8A => ins(TXA, Implied),
        0x98 => ins(TYA, Implied),
        0xBA => ins(TSX, Implied),
        0x9A => ins(TXS, Implied),

        // Stack
        0x48 => ins(PHA, Implied),
        0x68 => ins(PLA, Implied),
        0x08 => ins(PHP, Implied),
        0x28 => ins(PLP, Implied),

        // Arithmetic
        0x69 => ins(ADC, Immediate),
        0x65 => ins(ADC, ZeroPage),
        0x75 => ins(ADC, ZeroPageX),
        0x6D => ins(ADC, Absolute),
        0x7D => ins(ADC, AbsoluteX),
        0x79 => ins(ADC, AbsoluteY),
        0x61 => ins(ADC, IndirectX),
        0x71 => ins(ADC, IndirectY),
        0xE9 => ins(SBC, Immediate),
        0xE5 => ins(SBC, ZeroPage),
        0xF5 => ins(SBC, ZeroPageX),
        0xED => ins(SBC, Absolute),
        0xFD => ins(SBC, AbsoluteX),
        0xF9 => ins(SBC, AbsoluteY),
        0xE1 => ins(SBC, IndirectX),
        0xF1 => ins(SBC, IndirectY),

        // Logic
        0x29 => ins(AND, Immediate),
        0x25 => ins(AND, ZeroPage),
        0x35 => ins(AND, ZeroPageX),
        0x2D => ins(AND, Absolute),
        0x3D => ins(AND, AbsoluteX),
        0x39 => ins(AND, AbsoluteY),
        0x21 => ins(AND, IndirectX),
        0x31 => ins(AND, IndirectY),
        0x49 => ins(EOR, Immediate),
        0x45 => ins(EOR, ZeroPage),
        0x55 => ins(EOR, ZeroPageX),
        0x4D => ins(EOR, Absolute),
        0x5D => ins(EOR, AbsoluteX),
        0x59 => ins(EOR, AbsoluteY),
        0x41 => ins(EOR, IndirectX),
        0x51 => ins(EOR, IndirectY),
        0x09 => ins(ORA, Immediate),
        0x05 => ins(ORA, ZeroPage),
        0x15 => ins(ORA, ZeroPageX),
        0x0D => ins(ORA, Absolute),
        0x1D => ins(ORA, AbsoluteX),
        0x19 => ins(ORA, AbsoluteY),
        0x01 => ins(ORA, IndirectX),
        0x11 => ins(ORA, IndirectY),
        0x24 => ins(BIT, ZeroPage),
        0x2C => ins(BIT, Absolute),

        // Shifts and rotates
        0x0A => ins(ASL, Accumulator),
        0x06 => ins(ASL, ZeroPage),
        0x16 => ins(ASL, ZeroPageX),
        0x0E => ins(ASL, Absolute),
        0x1E => ins(ASL, AbsoluteX),
        0x4A => ins(LSR, Accumulator),
        0x46 => ins(LSR, ZeroPage),
        0x56 => ins(LSR, ZeroPageX),
        0x4E => ins(LSR, Absolute),
        0x5E => ins(LSR, AbsoluteX),
        0x2A => ins(ROL, Accumulator),
        0x26 => ins(ROL, ZeroPage),
        0x36 => ins(ROL, ZeroPageX),
        0x2E => ins(ROL, Absolute),
        0x3E => ins(ROL, AbsoluteX),
        0x6A => ins(ROR, Accumulator),
        0x66 => ins(ROR, ZeroPage),
        0x76 => ins(ROR, ZeroPageX),
        0x6E => ins(ROR, Absolute),
        0x7E => ins(ROR, AbsoluteX),

        // Compares
        0xC9 => ins(CMP, Immediate),
        0xC5 => ins(CMP, ZeroPage),
        0xD5 => ins(CMP, ZeroPageX),
        0xCD => ins(CMP, Absolute),
        0xDD => ins(CMP, AbsoluteX),
        0xD9 => ins(CMP, AbsoluteY),
        0xC1 => ins(CMP, IndirectX),
        0xD1 => ins(CMP, IndirectY),
        0xE0 => ins(CPX, Immediate),
        0xE4 => ins(CPX, ZeroPage),
        0xEC => ins(CPX, Absolute),
        0xC0 => ins(CPY, Immediate),
        0xC4 => ins(CPY, ZeroPage),
        0xCC => ins(CPY, Absolute),

        // Increments and decrements
        0xE6 => ins(INC, ZeroPage),
        0xF6 => ins(INC, ZeroPageX),
        0xEE => ins(INC, Absolute),
        0xFE => ins(INC, AbsoluteX),
        0xE8 => ins(INX, Implied),
        0xC8 => ins(INY, Implied),
        0xC6 => ins(DEC, ZeroPage),
        0xD6 => ins(DEC, ZeroPageX),
        0xCE => ins(DEC, Absolute),
        0xDE => ins(DEC, AbsoluteX),
        0xCA => ins(DEX, Implied),
        0x88 => ins(DEY, Implied),

        // Jumps and subroutines
        0x4C => ins(JMP, Absolute),
        0x6C => ins(JMP, Indirect),
        0x20 => ins(JSR, Absolute),
        0x60 => ins(RTS, Implied),

        // Branches; the displacement byte is read in immediate position.
        0x90 => ins(BCC, Immediate),
        0xB0 => ins(BCS, Immediate),
        0xF0 => ins(BEQ, Immediate),
        0x30 => ins(BMI, Immediate),
        0xD0 => ins(BNE, Immediate),
        0x10 => ins(BPL, Immediate),
        0x50 => ins(BVC, Immediate),
        0x70 => ins(BVS, Immediate),

        // Flag operations
        0x18 => ins(CLC, Implied),
        0xD8 => ins(CLD, Implied),
        0x58 => ins(CLI, Implied),
        0xB8 => ins(CLV, Implied),
        0x38 => ins(SEC, Implied),
        0xF8 => ins(SED, Implied),
        0x78 => ins(SEI, Implied),

        // Control
        0x00 => ins(BRK, Implied),
        0x40 => ins(RTI, Implied),
        0xEA => ins(NOP, Implied),

        _ => None,
    }
}

/// The full opcode table, indexed by opcode byte.
pub static OPCODE_TABLE: [Option<Instruction>; 256] = build_table();

const fn build_table() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut opcode = 0usize;
    while opcode < 256 {
        table[opcode] = decode(opcode as u8);
        opcode += 1;
    }
    table
}

/// Looks up an opcode byte in the table.
pub fn lookup(opcode: u8) -> Option<Instruction> {
    OPCODE_TABLE[opcode as usize]
}
