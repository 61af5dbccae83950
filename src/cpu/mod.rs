//! The fetch-decode-execute engine.
//!
//! `Cpu` owns the register file; memory is a collaborator passed into
//! every step, so addressing and ALU behavior can be tested without a full
//! program. Execution is synchronous and whole-instruction: callers stop
//! between steps, never in the middle of one.

use crate::addressing::{ChipVariant, Operand};
use crate::alu;
use crate::error::Error;
use crate::memory::{Memory, STACK_PAGE};
use crate::opcodes::{self, Instruction, Mnemonic};
use crate::registers::{Registers, StatusFlags};


/// IRQ/BRK vector location.
const IRQ_VECTOR: u16 = 0xFFFE;

/// Capacity of the stack page in bytes.
const STACK_SIZE: u16 = 256;

/// Why the execution loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// BRK executed while the interrupt-disable flag was already set.
    Break,
    /// The caller-supplied step budget ran out.
    StepLimit,
}

/// Outcome of a single instruction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    Halted,
}

/// The MOS 6502 CPU.
pub struct Cpu {
    pub regs: Registers,
    variant: ChipVariant,
    /// Bytes currently on the stack. The pointer itself wraps within the
    /// stack page; this tracks the logical push/pull balance.
    pub(crate) stack_depth: u16,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu::with_variant(ChipVariant::Nmos)
    }

    pub fn with_variant(variant: ChipVariant) -> Self {
        Cpu {
            regs: Registers::new(),
            variant,
            stack_depth: 0,
        }
    }

    pub fn variant(&self) -> ChipVariant {
        self.variant
    }

    /// Zeroes every register. Memory is left untouched.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.stack_depth = 0;
    }

    /// Fetches, decodes and executes one instruction.
    pub fn step(&mut self, mem: &mut Memory) -> Result<StepResult, Error> {
        let opcode_addr = self.regs.pc;
        let opcode = mem.read(opcode_addr);
        self.regs.pc = self.regs.pc.wrapping_add(1);

        let Some(instruction) = opcodes::lookup(opcode) else {
            log::error!("invalid opcode 0x{:02X} at 0x{:04X}", opcode, opcode_addr);
            return Err(Error::InvalidOpcode {
                opcode,
                addr: opcode_addr,
            });
        };

        let operand = instruction.mode.resolve(&mut self.regs, mem, self.variant)?;
        log::trace!(
            "0x{:04X}: {:?} {:?}",
            opcode_addr,
            instruction.mnemonic,
            instruction.mode
        );
        self.execute(instruction, operand, mem)
    }

    /// Runs until BRK halts execution.
    pub fn run(&mut self, mem: &mut Memory) -> Result<HaltReason, Error> {
        loop {
            if let StepResult::Halted = self.step(mem)? {
                return Ok(HaltReason::Break);
            }
        }
    }

    /// Runs until BRK halts execution or `limit` instructions have
    /// executed, whichever comes first.
    pub fn run_with_limit(&mut self, mem: &mut Memory, limit: u64) -> Result<HaltReason, Error> {
        for _ in 0..limit {
            if let StepResult::Halted = self.step(mem)? {
                return Ok(HaltReason::Break);
            }
        }
        Ok(HaltReason::StepLimit)
    }

    fn execute(
        &mut self,
        instruction: Instruction,
        operand: Operand,
        mem: &mut Memory,
    ) -> Result<StepResult, Error> {
        match instruction.mnemonic {
            // Loads
            Mnemonic::LDA => {
                let value = self.operand_value(operand, mem);
                self.regs.a = value;
                self.regs.set_zero_and_negative(value);
            }
            Mnemonic::LDX => {
                let value = self.operand_value(operand, mem);
                self.regs.x = value;
                self.regs.set_zero_and_negative(value);
            }
            Mnemonic::LDY => {
                let value = self.operand_value(operand, mem);
                self.regs.y = value;
                self.regs.set_zero_and_negative(value);
            }

            // Stores; no flags.
            Mnemonic::STA => self.write_operand(operand, mem, self.regs.a),
            Mnemonic::STX => self.write_operand(operand, mem, self.regs.x),
            Mnemonic::STY => self.write_operand(operand, mem, self.regs.y),

            // Transfers
            Mnemonic::TAX => {
                self.regs.x = self.regs.a;
                self.regs.set_zero_and_negative(self.regs.x);
            }
            Mnemonic::TAY => {
                self.regs.y = self.regs.a;
                self.regs.set_zero_and_negative(self.regs.y);
            }
            Mnemonic::TXA => {
                self.regs.a = self.regs.x;
                self.regs.set_zero_and_negative(self.regs.a);
            }
            Mnemonic::TYA => {
                self.regs.a = self.regs.y;
                self.regs.set_zero_and_negative(self.regs.a);
            }
            Mnemonic::TSX => {
                self.regs.x = self.regs.sp;
                self.regs.set_zero_and_negative(self.regs.x);
            }
            // The one transfer that sets no flags.
            Mnemonic::TXS => self.regs.sp = self.regs.x,

            // Arithmetic
            Mnemonic::ADC => {
                let value = self.operand_value(operand, mem);
                self.adc(value);
            }
            Mnemonic::SBC => {
                let value = self.operand_value(operand, mem);
                self.sbc(value);
            }

            // Logic
            Mnemonic::AND => {
                self.regs.a &= self.operand_value(operand, mem);
                self.regs.set_zero_and_negative(self.regs.a);
            }
            Mnemonic::EOR => {
                self.regs.a ^= self.operand_value(operand, mem);
                self.regs.set_zero_and_negative(self.regs.a);
            }
            Mnemonic::ORA => {
                self.regs.a |= self.operand_value(operand, mem);
                self.regs.set_zero_and_negative(self.regs.a);
            }
            Mnemonic::BIT => {
                let value = self.operand_value(operand, mem);
                self.regs
                    .set_flag(StatusFlags::ZERO, self.regs.a & value == 0);
                self.regs
                    .set_flag(StatusFlags::NEGATIVE, value & 0b10000000 != 0);
                self.regs
                    .set_flag(StatusFlags::OVERFLOW, value & 0b01000000 != 0);
            }

            // Shifts and rotates, in place on memory or the accumulator.
            Mnemonic::ASL => self.asl(operand, mem),
            Mnemonic::LSR => self.lsr(operand, mem),
            Mnemonic::ROL => self.rol(operand, mem),
            Mnemonic::ROR => self.ror(operand, mem),

            // Compares
            Mnemonic::CMP => {
                let value = self.operand_value(operand, mem);
                self.compare(self.regs.a, value);
            }
            Mnemonic::CPX => {
                let value = self.operand_value(operand, mem);
                self.compare(self.regs.x, value);
            }
            Mnemonic::CPY => {
                let value = self.operand_value(operand, mem);
                self.compare(self.regs.y, value);
            }

            // Increments and decrements
            Mnemonic::INC => {
                let value = alu::add_byte(self.operand_value(operand, mem), 1, false).value;
                self.write_operand(operand, mem, value);
                self.regs.set_zero_and_negative(value);
            }
            Mnemonic::DEC => {
                let value = alu::subtract_byte(self.operand_value(operand, mem), 1, true).value;
                self.write_operand(operand, mem, value);
                self.regs.set_zero_and_negative(value);
            }
            Mnemonic::INX => {
                self.regs.x = alu::add_byte(self.regs.x, 1, false).value;
                self.regs.set_zero_and_negative(self.regs.x);
            }
            Mnemonic::INY => {
                self.regs.y = alu::add_byte(self.regs.y, 1, false).value;
                self.regs.set_zero_and_negative(self.regs.y);
            }
            Mnemonic::DEX => {
                self.regs.x = alu::subtract_byte(self.regs.x, 1, true).value;
                self.regs.set_zero_and_negative(self.regs.x);
            }
            Mnemonic::DEY => {
                self.regs.y = alu::subtract_byte(self.regs.y, 1, true).value;
                self.regs.set_zero_and_negative(self.regs.y);
            }

            // Branches; no flags altered.
            Mnemonic::BCC => self.branch(operand, mem, !self.regs.flag(StatusFlags::CARRY)),
            Mnemonic::BCS => self.branch(operand, mem, self.regs.flag(StatusFlags::CARRY)),
            Mnemonic::BEQ => self.branch(operand, mem, self.regs.flag(StatusFlags::ZERO)),
            Mnemonic::BNE => self.branch(operand, mem, !self.regs.flag(StatusFlags::ZERO)),
            Mnemonic::BMI => self.branch(operand, mem, self.regs.flag(StatusFlags::NEGATIVE)),
            Mnemonic::BPL => self.branch(operand, mem, !self.regs.flag(StatusFlags::NEGATIVE)),
            Mnemonic::BVS => self.branch(operand, mem, self.regs.flag(StatusFlags::OVERFLOW)),
            Mnemonic::BVC => self.branch(operand, mem, !self.regs.flag(StatusFlags::OVERFLOW)),

            // Flag operations
            Mnemonic::CLC => self.regs.set_flag(StatusFlags::CARRY, false),
            Mnemonic::CLD => self.regs.set_flag(StatusFlags::DECIMAL, false),
            Mnemonic::CLI => self.regs.set_flag(StatusFlags::INTERRUPT_DISABLE, false),
            Mnemonic::CLV => self.regs.set_flag(StatusFlags::OVERFLOW, false),
            Mnemonic::SEC => self.regs.set_flag(StatusFlags::CARRY, true),
            Mnemonic::SED => self.regs.set_flag(StatusFlags::DECIMAL, true),
            Mnemonic::SEI => self.regs.set_flag(StatusFlags::INTERRUPT_DISABLE, true),

            // Jumps and subroutines
            Mnemonic::JMP => {
                if let Operand::Address(target) = operand {
                    self.regs.pc = target;
                }
            }
            Mnemonic::JSR => {
                if let Operand::Address(target) = operand {
                    // PC sits past the operand; the pushed return address
                    // is the last byte of the JSR instruction.
                    let return_addr = self.regs.pc.wrapping_sub(1);
                    self.push(mem, (return_addr >> 8) as u8)?;
                    self.push(mem, return_addr as u8)?;
                    self.regs.pc = target;
                }
            }
            Mnemonic::RTS => {
                let lo = self.pull(mem)? as u16;
                let hi = self.pull(mem)? as u16;
                self.regs.pc = ((hi << 8) | lo).wrapping_add(1);
            }

            // Stack
            Mnemonic::PHA => self.push(mem, self.regs.a)?,
            Mnemonic::PLA => {
                let value = self.pull(mem)?;
                self.regs.a = value;
                self.regs.set_zero_and_negative(value);
            }
            Mnemonic::PHP => self.push(mem, self.regs.status.bits())?,
            Mnemonic::PLP => {
                let bits = self.pull(mem)?;
                self.regs.status = StatusFlags::from_bits_truncate(bits);
            }

            // Control
            Mnemonic::BRK => return self.brk(mem),
            Mnemonic::RTI => {
                let bits = self.pull(mem)?;
                self.regs.status = StatusFlags::from_bits_truncate(bits);
                let lo = self.pull(mem)? as u16;
                let hi = self.pull(mem)? as u16;
                self.regs.pc = (hi << 8) | lo;
            }
            Mnemonic::NOP => {}
        }

        Ok(StepResult::Continue)
    }

    /// Reads through the resolved storage location.
    fn operand_value(&self, operand: Operand, mem: &Memory) -> u8 {
        match operand {
            Operand::Value(value) => value,
            Operand::Address(addr) => mem.read(addr),
            Operand::Accumulator => self.regs.a,
            // Implied instructions never read an operand.
            Operand::None => 0,
        }
    }

    /// Writes through the resolved storage location.
    fn write_operand(&mut self, operand: Operand, mem: &mut Memory, value: u8) {
        match operand {
            Operand::Address(addr) => mem.write(addr, value),
            Operand::Accumulator => self.regs.a = value,
            Operand::Value(_) | Operand::None => {}
        }
    }

    fn adc(&mut self, value: u8) {
        let out = alu::add_byte(self.regs.a, value, self.regs.flag(StatusFlags::CARRY));
        self.regs.set_flag(StatusFlags::CARRY, out.carry);
        self.regs.set_flag(StatusFlags::OVERFLOW, out.overflow);
        self.regs.a = out.value;
        self.regs.set_zero_and_negative(out.value);
    }

    fn sbc(&mut self, value: u8) {
        // Carry-in and carry-out both follow the "no borrow" convention.
        let out = alu::subtract_byte(self.regs.a, value, self.regs.flag(StatusFlags::CARRY));
        self.regs.set_flag(StatusFlags::CARRY, out.carry);
        self.regs.set_flag(StatusFlags::OVERFLOW, out.overflow);
        self.regs.a = out.value;
        self.regs.set_zero_and_negative(out.value);
    }

    /// Non-destructive subtraction: C, Z and N describe how `register`
    /// relates to `value`.
    fn compare(&mut self, register: u8, value: u8) {
        let out = alu::subtract_byte(register, value, true);
        self.regs.set_flag(StatusFlags::CARRY, register >= value);
        self.regs.set_flag(StatusFlags::ZERO, register == value);
        self.regs
            .set_flag(StatusFlags::NEGATIVE, out.value & 0b10000000 != 0);
    }

    fn asl(&mut self, operand: Operand, mem: &mut Memory) {
        let value = self.operand_value(operand, mem);
        self.regs
            .set_flag(StatusFlags::CARRY, value & 0b10000000 != 0);
        let result = value << 1;
        self.write_operand(operand, mem, result);
        self.regs.set_zero_and_negative(result);
    }

    fn lsr(&mut self, operand: Operand, mem: &mut Memory) {
        let value = self.operand_value(operand, mem);
        self.regs
            .set_flag(StatusFlags::CARRY, value & 0b00000001 != 0);
        let result = value >> 1;
        self.write_operand(operand, mem, result);
        self.regs.set_zero_and_negative(result);
    }

    fn rol(&mut self, operand: Operand, mem: &mut Memory) {
        let value = self.operand_value(operand, mem);
        let carry_in = u8::from(self.regs.flag(StatusFlags::CARRY));
        self.regs
            .set_flag(StatusFlags::CARRY, value & 0b10000000 != 0);
        let result = (value << 1) | carry_in;
        self.write_operand(operand, mem, result);
        self.regs.set_zero_and_negative(result);
    }

    fn ror(&mut self, operand: Operand, mem: &mut Memory) {
        let value = self.operand_value(operand, mem);
        let carry_in = u8::from(self.regs.flag(StatusFlags::CARRY));
        self.regs
            .set_flag(StatusFlags::CARRY, value & 0b00000001 != 0);
        let result = (value >> 1) | (carry_in << 7);
        self.write_operand(operand, mem, result);
        self.regs.set_zero_and_negative(result);
    }

    /// Conditionally adds the signed displacement to the already-advanced
    /// program counter.
    fn branch(&mut self, operand: Operand, mem: &Memory, condition: bool) {
        let offset = self.operand_value(operand, mem);
        if condition {
            self.regs.pc = alu::add_word(self.regs.pc, offset as i8 as u16);
        }
    }

    fn push(&mut self, mem: &mut Memory, value: u8) -> Result<(), Error> {
        if self.stack_depth == STACK_SIZE {
            return Err(Error::StackOverflow);
        }
        mem.write(STACK_PAGE | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.stack_depth += 1;
        Ok(())
    }

    fn pull(&mut self, mem: &Memory) -> Result<u8, Error> {
        if self.stack_depth == 0 {
            return Err(Error::StackUnderflow);
        }
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.stack_depth -= 1;
        Ok(mem.read(STACK_PAGE | self.regs.sp as u16))
    }

    /// BRK: push PC+1 and status, set B and I, load PC from the IRQ
    /// vector. A BRK arriving with I already set is the halt condition for
    /// the run loop; without it, a zeroed vector would spin through BRK
    /// forever.
    fn brk(&mut self, mem: &mut Memory) -> Result<StepResult, Error> {
        if self.regs.flag(StatusFlags::INTERRUPT_DISABLE) {
            log::debug!(
                "BRK with interrupts disabled at 0x{:04X}; halting",
                self.regs.pc
            );
            return Ok(StepResult::Halted);
        }

        // The byte after BRK is padding; the pushed return address skips
        // it.
        let return_addr = self.regs.pc.wrapping_add(1);
        self.regs.set_flag(StatusFlags::BREAK, true);
        self.push(mem, (return_addr >> 8) as u8)?;
        self.push(mem, return_addr as u8)?;
        self.push(mem, self.regs.status.bits())?;
        self.regs.set_flag(StatusFlags::INTERRUPT_DISABLE, true);
        self.regs.pc = mem.read_word(IRQ_VECTOR)?;
        Ok(StepResult::Continue)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Cpu::new()
    }
}
