//! 8080 register set.

#![allow(clippy::cast_possible_truncation)] // Intentional truncation for low byte extraction.

/// Register pairs as encoded in opcode bits 5..4.
///
/// `Sp` and `Psw` share encoding 3: LXI/INX/DCX/DAD use the stack
/// pointer, PUSH/POP use the accumulator + flags word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterPair {
    B,
    D,
    H,
    Sp,
    Psw,
}

impl RegisterPair {
    /// Assembler name of the pair.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::D => "D",
            Self::H => "H",
            Self::Sp => "SP",
            Self::Psw => "PSW",
        }
    }
}

/// 8080 registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// Get BC register pair.
    #[must_use]
    pub const fn bc(&self) -> u16 {
        (self.b as u16) << 8 | self.c as u16
    }

    /// Get DE register pair.
    #[must_use]
    pub const fn de(&self) -> u16 {
        (self.d as u16) << 8 | self.e as u16
    }

    /// Get HL register pair.
    #[must_use]
    pub const fn hl(&self) -> u16 {
        (self.h as u16) << 8 | self.l as u16
    }

    /// Set BC register pair.
    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    /// Set DE register pair.
    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    /// Set HL register pair.
    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    /// Read a 16-bit pair. `Psw` has no meaning here without the flags and
    /// is handled by the CPU.
    #[must_use]
    pub(crate) fn pair(&self, rp: RegisterPair) -> u16 {
        match rp {
            RegisterPair::B => self.bc(),
            RegisterPair::D => self.de(),
            RegisterPair::H => self.hl(),
            RegisterPair::Sp => self.sp,
            RegisterPair::Psw => unreachable!("PSW is assembled by the CPU"),
        }
    }

    /// Write a 16-bit pair.
    pub(crate) fn set_pair(&mut self, rp: RegisterPair, value: u16) {
        match rp {
            RegisterPair::B => self.set_bc(value),
            RegisterPair::D => self.set_de(value),
            RegisterPair::H => self.set_hl(value),
            RegisterPair::Sp => self.sp = value,
            RegisterPair::Psw => unreachable!("PSW is assembled by the CPU"),
        }
    }
}
