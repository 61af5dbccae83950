use crate::error::Error;

/// Size of the full address space in bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Conventional base address for ROM images.
pub const ROM_BASE: u16 = 0x8000;

/// Base address of the stack page. The stack pointer indexes into this
/// page and grows downward.
pub const STACK_PAGE: u16 = 0x0100;

/// Flat 64 KiB address space, zero-initialized.
///
/// Single-byte accesses take a `u16` address and are structurally in
/// bounds; only multi-byte reads and bulk loads can run off the end of the
/// space, and those are checked explicitly instead of wrapping.
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: Box::new([0; MEMORY_SIZE]),
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.bytes[addr as usize] = data;
    }

    /// Reads a little-endian 16-bit value.
    ///
    /// The high byte lives at `addr + 1`; a read at 0xFFFF would need the
    /// nonexistent byte 0x10000 and is rejected rather than wrapped.
    pub fn read_word(&self, addr: u16) -> Result<u16, Error> {
        if addr == u16::MAX {
            return Err(Error::MemoryOutOfBounds {
                addr: addr as u32 + 1,
            });
        }
        let lo = self.read(addr) as u16;
        let hi = self.read(addr + 1) as u16;
        Ok((hi << 8) | lo)
    }

    /// Copies `bytes` verbatim starting at `base`.
    pub fn load(&mut self, bytes: &[u8], base: u16) -> Result<(), Error> {
        let start = base as usize;
        let Some(end) = start.checked_add(bytes.len()) else {
            return Err(Error::RomTooLarge {
                len: bytes.len(),
                base,
            });
        };
        if end > MEMORY_SIZE {
            return Err(Error::RomTooLarge {
                len: bytes.len(),
                base,
            });
        }
        self.bytes[start..end].copy_from_slice(bytes);
        log::debug!("loaded {} bytes at 0x{:04X}", bytes.len(), base);
        Ok(())
    }

    /// The whole address space as a slice, low addresses first.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}
