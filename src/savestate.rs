//! Snapshot and restore of the whole machine.
//!
//! A `SaveState` is a plain serde struct holding the register file, the
//! stack bookkeeping and the full address space, serialized with bincode.
//! Restores are validated by version so an old or foreign blob fails
//! loudly instead of producing a half-restored machine.

use serde::{Deserialize, Serialize};

use crate::cpu::Cpu;
use crate::memory::{Memory, MEMORY_SIZE};
use crate::registers::StatusFlags;

/// Bump when the layout of `SaveState` changes.
pub const SAVESTATE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub cpu: CpuState,
    pub memory: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
pub struct CpuState {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub status: u8,
    pub stack_depth: u16,
}

impl SaveState {
    pub fn capture(cpu: &Cpu, memory: &Memory) -> Self {
        SaveState {
            version: SAVESTATE_VERSION,
            cpu: CpuState {
                pc: cpu.regs.pc,
                sp: cpu.regs.sp,
                a: cpu.regs.a,
                x: cpu.regs.x,
                y: cpu.regs.y,
                status: cpu.regs.status.bits(),
                stack_depth: cpu.stack_depth,
            },
            memory: memory.as_slice().to_vec(),
        }
    }

    pub fn restore(&self, cpu: &mut Cpu, memory: &mut Memory) -> Result<(), String> {
        if self.version != SAVESTATE_VERSION {
            return Err(format!(
                "unsupported save state version {} (current: {})",
                self.version, SAVESTATE_VERSION
            ));
        }
        if self.memory.len() != MEMORY_SIZE {
            return Err(format!(
                "save state memory image is {} bytes, expected {}",
                self.memory.len(),
                MEMORY_SIZE
            ));
        }

        cpu.regs.pc = self.cpu.pc;
        cpu.regs.sp = self.cpu.sp;
        cpu.regs.a = self.cpu.a;
        cpu.regs.x = self.cpu.x;
        cpu.regs.y = self.cpu.y;
        cpu.regs.status = StatusFlags::from_bits_truncate(self.cpu.status);
        cpu.stack_depth = self.cpu.stack_depth;
        for (addr, &byte) in self.memory.iter().enumerate() {
            memory.write(addr as u16, byte);
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, String> {
        bincode::serialize(self).map_err(|e| format!("failed to serialize save state: {}", e))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        bincode::deserialize(data).map_err(|e| format!("failed to deserialize save state: {}", e))
    }
}
