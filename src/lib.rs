//! Instruction-level emulator core for the MOS 6502.
//!
//! The crate models the processor as a handful of small components: a flat
//! 64 KiB [`Memory`], a [`Registers`] file with a [`StatusFlags`] bitfield,
//! a flag-producing ALU, an addressing-mode resolver and a table-driven
//! instruction dispatcher. [`Cpu::step`] executes one instruction against a
//! memory passed in by the caller; [`Emulator`] bundles one CPU with one
//! memory for the common case.
//!
//! Timing is out of scope: each step executes a whole instruction, and the
//! run loop stops at an explicit halt condition (BRK with interrupts
//! disabled, or a caller-supplied step budget).

mod addressing;
mod alu;
mod cpu;
mod emulator;
mod error;
mod memory;
mod opcodes;
mod registers;
mod savestate;

pub use addressing::{AddressingMode, ChipVariant, Operand};
pub use alu::{add_byte, add_word, subtract_byte, subtract_word, AluOutput};
pub use cpu::{Cpu, HaltReason, StepResult};
pub use emulator::Emulator;
pub use error::Error;
pub use memory::{Memory, MEMORY_SIZE, ROM_BASE, STACK_PAGE};
pub use opcodes::{lookup, Instruction, Mnemonic, OPCODE_TABLE};
pub use registers::{Registers, StatusFlags};
pub use savestate::{SaveState, SAVESTATE_VERSION};
