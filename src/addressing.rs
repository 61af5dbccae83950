//! Addressing-mode resolution.
//!
//! Each mode consumes its operand bytes at the program counter, advances
//! the counter by exactly the operand width, and yields an [`Operand`]
//! naming the storage location (or immediate value) the instruction works
//! on. Write-back instructions mutate the resolved location through the
//! same variant, so there is never an aliased reference into memory.

use crate::alu;
use crate::error::Error;
use crate::memory::Memory;
use crate::registers::Registers;

/// Which silicon revision indirect JMP follows.
///
/// The NMOS part does not carry the increment of the pointer's low byte
/// into the high byte, so a pointer at `$xxFF` takes its high byte from
/// `$xx00`. Later parts (65SC02 and friends) fetch from the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipVariant {
    #[default]
    Nmos,
    /// Page-crossing behavior fixed, 65SC02-style.
    Fixed,
}

/// The storage location (or immediate value) an addressing mode resolves
/// to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand; the instruction is implied.
    None,
    /// The operand byte itself, not an address.
    Value(u8),
    /// A memory cell.
    Address(u16),
    /// The accumulator register, mutated in place by shifts and rotates.
    Accumulator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

impl AddressingMode {
    /// Operand bytes the mode consumes after the opcode.
    pub fn operand_width(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Computes the operand for the current instruction.
    ///
    /// The program counter is advanced by the operand width before any
    /// other effect takes place, whether or not resolution succeeds.
    pub fn resolve(
        self,
        regs: &mut Registers,
        mem: &Memory,
        variant: ChipVariant,
    ) -> Result<Operand, Error> {
        match self {
            AddressingMode::Implied => Ok(Operand::None),
            AddressingMode::Accumulator => Ok(Operand::Accumulator),
            AddressingMode::Immediate => Ok(Operand::Value(fetch_byte(regs, mem))),
            AddressingMode::ZeroPage => Ok(Operand::Address(fetch_byte(regs, mem) as u16)),
            AddressingMode::ZeroPageX => {
                // Indexing stays inside page zero; the add never carries
                // out of eight bits.
                let base = fetch_byte(regs, mem);
                Ok(Operand::Address(base.wrapping_add(regs.x) as u16))
            }
            AddressingMode::ZeroPageY => {
                let base = fetch_byte(regs, mem);
                Ok(Operand::Address(base.wrapping_add(regs.y) as u16))
            }
            AddressingMode::Absolute => Ok(Operand::Address(fetch_word(regs, mem)?)),
            AddressingMode::AbsoluteX => {
                let base = fetch_word(regs, mem)?;
                Ok(Operand::Address(alu::add_word(base, regs.x as u16)))
            }
            AddressingMode::AbsoluteY => {
                let base = fetch_word(regs, mem)?;
                Ok(Operand::Address(alu::add_word(base, regs.y as u16)))
            }
            AddressingMode::Indirect => {
                let ptr = fetch_word(regs, mem)?;
                let target = if ptr & 0x00FF == 0x00FF && variant == ChipVariant::Nmos {
                    // The increment of the pointer's low byte does not
                    // carry into the high byte, so the second fetch stays
                    // on the same page.
                    let lo = mem.read(ptr) as u16;
                    let hi = mem.read(ptr & 0xFF00) as u16;
                    (hi << 8) | lo
                } else {
                    mem.read_word(ptr)?
                };
                Ok(Operand::Address(target))
            }
            AddressingMode::IndirectX => {
                // Pre-indexed: X picks the pointer-table entry in page
                // zero, then the pointer there is the effective address.
                let table = fetch_byte(regs, mem).wrapping_add(regs.x);
                Ok(Operand::Address(read_zero_page_word(mem, table)))
            }
            AddressingMode::IndirectY => {
                // Post-indexed: the zero-page pointer is read first, then Y
                // is added as a full 16-bit sum.
                let base = fetch_byte(regs, mem);
                let ptr = read_zero_page_word(mem, base);
                Ok(Operand::Address(alu::add_word(ptr, regs.y as u16)))
            }
        }
    }
}

fn fetch_byte(regs: &mut Registers, mem: &Memory) -> u8 {
    let byte = mem.read(regs.pc);
    regs.pc = regs.pc.wrapping_add(1);
    byte
}

fn fetch_word(regs: &mut Registers, mem: &Memory) -> Result<u16, Error> {
    let addr = regs.pc;
    regs.pc = regs.pc.wrapping_add(2);
    mem.read_word(addr)
}

/// Reads a little-endian pointer from page zero. The second byte wraps
/// within the page: a pointer at 0xFF takes its high byte from 0x00.
fn read_zero_page_word(mem: &Memory, addr: u8) -> u16 {
    let lo = mem.read(addr as u16) as u16;
    let hi = mem.read(addr.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}
