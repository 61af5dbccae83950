//! The machine as a whole: one CPU wired to one flat address space.

use crate::addressing::ChipVariant;
use crate::cpu::{Cpu, HaltReason, StepResult};
use crate::error::Error;
use crate::memory::{Memory, ROM_BASE};
use crate::savestate::SaveState;

/// Owns the CPU and memory and drives them as a unit.
pub struct Emulator {
    cpu: Cpu,
    memory: Memory,
}

impl Emulator {
    pub fn new() -> Self {
        Emulator::with_variant(ChipVariant::Nmos)
    }

    pub fn with_variant(variant: ChipVariant) -> Self {
        Emulator {
            cpu: Cpu::with_variant(variant),
            memory: Memory::new(),
        }
    }

    /// Copies a ROM image to the conventional base address and points the
    /// program counter at its first byte.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Error> {
        self.memory.load(rom, ROM_BASE)?;
        self.cpu.regs.pc = ROM_BASE;
        log::info!("ROM loaded, {} bytes at 0x{:04X}", rom.len(), ROM_BASE);
        Ok(())
    }

    /// Zeroes the CPU registers. Memory, including a loaded ROM, is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    pub fn step(&mut self) -> Result<StepResult, Error> {
        self.cpu.step(&mut self.memory)
    }

    pub fn run(&mut self) -> Result<HaltReason, Error> {
        self.cpu.run(&mut self.memory)
    }

    pub fn run_with_limit(&mut self, limit: u64) -> Result<HaltReason, Error> {
        self.cpu.run_with_limit(&mut self.memory, limit)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn save_state(&self) -> SaveState {
        SaveState::capture(&self.cpu, &self.memory)
    }

    pub fn restore_state(&mut self, state: &SaveState) -> Result<(), String> {
        state.restore(&mut self.cpu, &mut self.memory)
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Emulator::new()
    }
}
