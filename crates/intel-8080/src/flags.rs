//! 8080 condition codes.

/// Zero flag position in the packed PSW byte.
pub const ZF: u8 = 0b0000_0001;

/// Sign flag position in the packed PSW byte.
pub const SF: u8 = 0b0000_0010;

/// Parity flag position in the packed PSW byte (set = even parity).
pub const PF: u8 = 0b0000_0100;

/// Carry flag position in the packed PSW byte.
pub const CF: u8 = 0b0000_1000;

/// Auxiliary-carry flag position in the packed PSW byte.
pub const AF: u8 = 0b0001_0000;

/// Bits 5..7 of the packed byte. Always written as zero, ignored on unpack.
pub const PAD_BITS: u8 = 0b1110_0000;

/// Compute parity of a byte (true if even number of 1 bits).
#[must_use]
pub const fn parity(value: u8) -> bool {
    value.count_ones().is_multiple_of(2)
}

/// The five condition flags.
///
/// Kept as named booleans; the byte form only exists on the stack
/// (PUSH PSW / POP PSW) and goes through `pack`/`unpack`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub zero: bool,
    pub sign: bool,
    pub parity: bool,
    pub carry: bool,
    pub aux_carry: bool,
}

impl Flags {
    /// Zero, sign and parity for `value`, with both carries clear.
    #[must_use]
    pub const fn zsp(value: u8) -> Self {
        Self {
            zero: value == 0,
            sign: value & 0x80 != 0,
            parity: parity(value),
            carry: false,
            aux_carry: false,
        }
    }

    /// Update zero, sign and parity from `value`, leaving both carries alone.
    pub fn set_zsp(&mut self, value: u8) {
        self.zero = value == 0;
        self.sign = value & 0x80 != 0;
        self.parity = parity(value);
    }

    /// Pack into the stack byte: bit0 Z, bit1 S, bit2 P, bit3 CY, bit4 AC.
    #[must_use]
    pub const fn pack(self) -> u8 {
        let mut f = 0;
        if self.zero {
            f |= ZF;
        }
        if self.sign {
            f |= SF;
        }
        if self.parity {
            f |= PF;
        }
        if self.carry {
            f |= CF;
        }
        if self.aux_carry {
            f |= AF;
        }
        f
    }

    /// Inverse of [`Flags::pack`].
    #[must_use]
    pub const fn unpack(byte: u8) -> Self {
        Self {
            zero: byte & ZF != 0,
            sign: byte & SF != 0,
            parity: byte & PF != 0,
            carry: byte & CF != 0,
            aux_carry: byte & AF != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trips_every_combination() {
        for bits in 0u8..32 {
            let flags = Flags::unpack(bits);
            assert_eq!(flags.pack(), bits);
            assert_eq!(Flags::unpack(flags.pack()), flags);
        }
    }

    #[test]
    fn pad_bits_are_never_produced_and_ignored_on_unpack() {
        let all = Flags {
            zero: true,
            sign: true,
            parity: true,
            carry: true,
            aux_carry: true,
        };
        assert_eq!(all.pack() & PAD_BITS, 0);
        assert_eq!(Flags::unpack(0xFF), all);
        assert_eq!(Flags::unpack(PAD_BITS), Flags::default());
    }

    #[test]
    fn carry_lives_in_bit_three() {
        let flags = Flags {
            carry: true,
            ..Flags::default()
        };
        assert_eq!(flags.pack(), 0b0000_1000);
    }

    #[test]
    fn zero_has_even_parity() {
        let flags = Flags::zsp(0);
        assert!(flags.zero);
        assert!(flags.parity);
        assert!(!flags.sign);
        assert!(!Flags::zsp(0x01).parity);
        assert!(Flags::zsp(0x03).parity);
        assert!(Flags::zsp(0x80).sign);
    }
}
