//! ALU operations for the 8080.
//!
//! Every function is pure: it takes operands and the current flags and
//! returns the result with the flags that operation class defines.
//!
//! | Class | Z S P | CY | AC |
//! |---|---|---|---|
//! | add/adc/sub/sbb/cmp | result | carry/borrow out of bit 7 | carry out of bit 3 |
//! | ana/xra/ora | result | cleared | cleared |
//! | inr/dcr | result | unchanged | carry out of bit 3 |
//! | dad | unchanged | carry out of bit 15 | unchanged |
//! | rotates | unchanged | bit rotated out | unchanged |
//! | daa | result | set by high correction, never cleared | carry out of bit 3 |

#![allow(clippy::cast_possible_truncation)] // Intentional truncation for low byte extraction.

use crate::flags::Flags;
use crate::opcodes::AluOp;

/// Result of an ALU operation with flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    pub value: u8,
    pub flags: Flags,
}

/// Add two bytes with optional carry in ("arithmetic" policy).
#[must_use]
pub fn add(a: u8, b: u8, carry: bool) -> AluResult {
    let c = u8::from(carry);
    let result16 = u16::from(a) + u16::from(b) + u16::from(c);
    let value = result16 as u8;

    let mut flags = Flags::zsp(value);
    flags.carry = result16 > 0xFF;
    flags.aux_carry = (a & 0x0F) + (b & 0x0F) + c > 0x0F;

    AluResult { value, flags }
}

/// Subtract with optional borrow in ("arithmetic" policy).
///
/// The 8080 subtracts by adding the one's complement with the borrow
/// inverted, so aux-carry is the carry out of bit 3 of that addition and
/// carry is the inverted carry out of bit 7 (a borrow).
#[must_use]
pub fn sub(a: u8, b: u8, borrow: bool) -> AluResult {
    let c = u8::from(borrow);
    let value = a.wrapping_sub(b).wrapping_sub(c);

    let mut flags = Flags::zsp(value);
    flags.carry = u16::from(a) < u16::from(b) + u16::from(c);
    flags.aux_carry = (a & 0x0F) + (!b & 0x0F) + (1 - c) > 0x0F;

    AluResult { value, flags }
}

/// Bitwise AND ("logic" policy).
#[must_use]
pub fn and(a: u8, b: u8) -> AluResult {
    logic(a & b)
}

/// Bitwise exclusive OR ("logic" policy).
#[must_use]
pub fn xor(a: u8, b: u8) -> AluResult {
    logic(a ^ b)
}

/// Bitwise OR ("logic" policy).
#[must_use]
pub fn or(a: u8, b: u8) -> AluResult {
    logic(a | b)
}

/// Logic flag policy: Z/S/P from the result, both carries cleared.
#[must_use]
pub fn logic(value: u8) -> AluResult {
    AluResult {
        value,
        flags: Flags::zsp(value),
    }
}

/// Apply one of the eight accumulator operations.
///
/// For `Cmp` the returned value is the accumulator unchanged; only the
/// flags of the subtraction are kept.
#[must_use]
pub fn apply(op: AluOp, a: u8, b: u8, flags: Flags) -> AluResult {
    match op {
        AluOp::Add => add(a, b, false),
        AluOp::Adc => add(a, b, flags.carry),
        AluOp::Sub => sub(a, b, false),
        AluOp::Sbb => sub(a, b, flags.carry),
        AluOp::Ana => and(a, b),
        AluOp::Xra => xor(a, b),
        AluOp::Ora => or(a, b),
        AluOp::Cmp => AluResult {
            value: a,
            flags: sub(a, b, false).flags,
        },
    }
}

/// Increment a byte. Carry is preserved.
#[must_use]
pub fn inr(value: u8, flags: Flags) -> AluResult {
    let result = value.wrapping_add(1);
    let mut out = flags;
    out.set_zsp(result);
    out.aux_carry = result & 0x0F == 0;
    AluResult {
        value: result,
        flags: out,
    }
}

/// Decrement a byte. Carry is preserved.
#[must_use]
pub fn dcr(value: u8, flags: Flags) -> AluResult {
    let result = value.wrapping_sub(1);
    let mut out = flags;
    out.set_zsp(result);
    // Adding 0xFF carries out of bit 3 unless the low nibble was zero.
    out.aux_carry = result & 0x0F != 0x0F;
    AluResult {
        value: result,
        flags: out,
    }
}

/// Decimal-adjust the accumulator after a BCD addition.
#[must_use]
pub fn daa(a: u8, flags: Flags) -> AluResult {
    let lsb = a & 0x0F;
    let msb = a >> 4;
    let mut correction = 0u8;
    let mut carry = flags.carry;

    if flags.aux_carry || lsb > 9 {
        correction |= 0x06;
    }
    // The high correction applies when the high nibble will exceed 9 once
    // the low correction has carried into it.
    if flags.carry || msb > 9 || (msb >= 9 && lsb > 9) {
        correction |= 0x60;
        carry = true;
    }

    let value = a.wrapping_add(correction);
    let mut out = Flags::zsp(value);
    out.carry = carry;
    out.aux_carry = lsb + (correction & 0x0F) > 0x0F;
    AluResult { value, flags: out }
}

/// 16-bit pair add into HL. Returns the sum and the carry out of bit 15.
#[must_use]
pub fn dad(hl: u16, rp: u16) -> (u16, bool) {
    let result = u32::from(hl) + u32::from(rp);
    (result as u16, result > 0xFFFF)
}

/// Rotate left, bit 7 into carry and bit 0.
#[must_use]
pub fn rlc(a: u8, flags: Flags) -> AluResult {
    rotated(a.rotate_left(1), a & 0x80 != 0, flags)
}

/// Rotate right, bit 0 into carry and bit 7.
#[must_use]
pub fn rrc(a: u8, flags: Flags) -> AluResult {
    rotated(a.rotate_right(1), a & 0x01 != 0, flags)
}

/// Rotate left through carry.
#[must_use]
pub fn ral(a: u8, flags: Flags) -> AluResult {
    rotated((a << 1) | u8::from(flags.carry), a & 0x80 != 0, flags)
}

/// Rotate right through carry.
#[must_use]
pub fn rar(a: u8, flags: Flags) -> AluResult {
    rotated((a >> 1) | (u8::from(flags.carry) << 7), a & 0x01 != 0, flags)
}

fn rotated(value: u8, carry: bool, flags: Flags) -> AluResult {
    let mut out = flags;
    out.carry = carry;
    AluResult { value, flags: out }
}
