use bitflags::bitflags;

bitflags! {
    /// Processor status bitfield.
    ///
    /// Bit positions are pinned once and for all: C=0, Z=1, I=2, D=3, B=4,
    /// V=6, N=7. Bit 5 and anything else stay zero; no documented
    /// instruction touches them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const INTERRUPT_DISABLE = 0b00000100;
        const DECIMAL = 0b00001000;
        const BREAK = 0b00010000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;
    }
}

/// The CPU register file.
pub struct Registers {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub status: StatusFlags,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            pc: 0,
            sp: 0,
            a: 0,
            x: 0,
            y: 0,
            status: StatusFlags::empty(),
        }
    }

    /// Zeroes every register, including the status bitfield.
    pub fn reset(&mut self) {
        *self = Registers::new();
    }

    pub fn set_flag(&mut self, flag: StatusFlags, value: bool) {
        self.status.set(flag, value);
    }

    pub fn flag(&self, flag: StatusFlags) -> bool {
        self.status.contains(flag)
    }

    /// Assigns Z and N from a result byte.
    ///
    /// Both flags are written in both directions, so a stale flag from a
    /// previous instruction never survives into the next one.
    pub fn set_zero_and_negative(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0b10000000 != 0);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Registers::new()
    }
}
