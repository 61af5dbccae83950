//! Byte- and word-wide binary arithmetic.
//!
//! The byte operations produce the carry and signed-overflow results the
//! instruction handlers fold into the status register. Internally they use
//! native fixed-width arithmetic; the tests check every possible input
//! against a bit-by-bit full-adder reference, so the observable semantics
//! match a hardware-style adder exactly.
//!
//! The word operations exist for effective-address arithmetic only and
//! never produce flags.

/// Result of a byte-wide ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluOutput {
    pub value: u8,
    /// Carry out of bit 7. After a subtraction this means "no borrow
    /// occurred".
    pub carry: bool,
    /// Signed overflow: both inputs share a sign bit that differs from the
    /// sign bit of the result.
    pub overflow: bool,
}

/// Adds two bytes plus a carry-in.
pub fn add_byte(a: u8, b: u8, carry_in: bool) -> AluOutput {
    let sum = a as u16 + b as u16 + carry_in as u16;
    let value = sum as u8;
    AluOutput {
        value,
        carry: sum > 0xFF,
        overflow: (a ^ value) & (b ^ value) & 0x80 != 0,
    }
}

/// Subtracts `subtrahend` from `minuend` by adding its one's complement.
///
/// `carry_in` is the 6502 "no borrow" convention: pass `true` for a plain
/// subtraction, or the current carry flag for SBC. The returned carry is
/// `true` when no borrow occurred (`minuend >= subtrahend` for a plain
/// subtraction).
pub fn subtract_byte(minuend: u8, subtrahend: u8, carry_in: bool) -> AluOutput {
    add_byte(minuend, !subtrahend, carry_in)
}

/// 16-bit add for effective-address computation. Wraps within the address
/// space and produces no flags.
pub fn add_word(a: u16, b: u16) -> u16 {
    a.wrapping_add(b)
}

/// 16-bit subtract for address arithmetic. Wraps and produces no flags.
pub fn subtract_word(a: u16, b: u16) -> u16 {
    a.wrapping_sub(b)
}
