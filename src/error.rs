use std::fmt;

/// Failures surfaced by the CPU core.
///
/// Every abnormal condition is an explicit result; an opcode the table does
/// not know is an error, never a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The opcode byte has no entry in the instruction table.
    InvalidOpcode { opcode: u8, addr: u16 },
    /// A multi-byte access would run past the end of the 64 KiB space.
    MemoryOutOfBounds { addr: u32 },
    /// The ROM image does not fit between its base offset and the end of
    /// memory.
    RomTooLarge { len: usize, base: u16 },
    /// A push was attempted with the stack page already full.
    StackOverflow,
    /// A pull was attempted with nothing on the stack.
    StackUnderflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOpcode { opcode, addr } => {
                write!(f, "invalid opcode 0x{:02X} at 0x{:04X}", opcode, addr)
            }
            Error::MemoryOutOfBounds { addr } => {
                write!(f, "memory access out of bounds at 0x{:05X}", addr)
            }
            Error::RomTooLarge { len, base } => {
                write!(f, "ROM of {} bytes does not fit at base 0x{:04X}", len, base)
            }
            Error::StackOverflow => write!(f, "stack overflow"),
            Error::StackUnderflow => write!(f, "stack underflow"),
        }
    }
}

impl std::error::Error for Error {}
