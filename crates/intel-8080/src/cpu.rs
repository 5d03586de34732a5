//! The 8080 processor state and single-step driver.

#![allow(clippy::cast_possible_truncation)] // Intentional truncation for low byte extraction.

mod execute;

use emu_core::{Bus, Cpu, IoBus, Observable, Step, Value};

use crate::flags::Flags;
use crate::opcodes::{Condition, Instruction, OPCODES, Reg};
use crate::registers::Registers;

/// Clock states spent pushing the return address when an interrupt is
/// accepted (the RST that the interrupting device supplies).
const INTERRUPT_CYCLES: u64 = 11;

/// Intel 8080 CPU.
///
/// Memory and ports live on the bus handed to [`Cpu::step`]; the CPU
/// holds only registers, flags and the interrupt/halt latches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct I8080 {
    regs: Registers,
    flags: Flags,
    /// Interrupt enable (EI/DI).
    inte: bool,
    halted: bool,
    /// Total clock states executed since reset.
    cycles: u64,
}

impl I8080 {
    /// Power-on state: every register, pair and flag zero, interrupts
    /// disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    #[must_use]
    pub fn sp(&self) -> u16 {
        self.regs.sp
    }

    pub fn set_pc(&mut self, pc: u16) {
        self.regs.pc = pc;
    }

    pub fn set_sp(&mut self, sp: u16) {
        self.regs.sp = sp;
    }

    /// Interrupt-enable latch.
    #[must_use]
    pub fn interrupts_enabled(&self) -> bool {
        self.inte
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Total clock states executed since reset.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Accumulator and packed flags as pushed by PUSH PSW.
    #[must_use]
    pub fn psw(&self) -> u16 {
        u16::from(self.regs.a) << 8 | u16::from(self.flags.pack())
    }

    fn set_psw(&mut self, value: u16) {
        self.regs.a = (value >> 8) as u8;
        self.flags = Flags::unpack(value as u8);
    }

    fn fetch_byte<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let byte = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        byte
    }

    /// Fetch a little-endian 16-bit operand.
    fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = self.fetch_byte(bus);
        let high = self.fetch_byte(bus);
        u16::from(high) << 8 | u16::from(low)
    }

    fn read_word<B: Bus>(bus: &mut B, address: u16) -> u16 {
        let low = bus.read(address);
        let high = bus.read(address.wrapping_add(1));
        u16::from(high) << 8 | u16::from(low)
    }

    fn write_word<B: Bus>(bus: &mut B, address: u16, value: u16) {
        bus.write(address, value as u8);
        bus.write(address.wrapping_add(1), (value >> 8) as u8);
    }

    /// High byte at SP-1, low byte at SP-2.
    fn push<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write(self.regs.sp, (value >> 8) as u8);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write(self.regs.sp, value as u8);
    }

    fn pop<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = Self::read_word(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    fn read_reg<B: Bus>(&self, bus: &mut B, reg: Reg) -> u8 {
        match reg {
            Reg::B => self.regs.b,
            Reg::C => self.regs.c,
            Reg::D => self.regs.d,
            Reg::E => self.regs.e,
            Reg::H => self.regs.h,
            Reg::L => self.regs.l,
            Reg::M => bus.read(self.regs.hl()),
            Reg::A => self.regs.a,
        }
    }

    fn write_reg<B: Bus>(&mut self, bus: &mut B, reg: Reg, value: u8) {
        match reg {
            Reg::B => self.regs.b = value,
            Reg::C => self.regs.c = value,
            Reg::D => self.regs.d = value,
            Reg::E => self.regs.e = value,
            Reg::H => self.regs.h = value,
            Reg::L => self.regs.l = value,
            Reg::M => bus.write(self.regs.hl(), value),
            Reg::A => self.regs.a = value,
        }
    }

    fn condition(&self, cc: Condition) -> bool {
        match cc {
            Condition::NotZero => !self.flags.zero,
            Condition::Zero => self.flags.zero,
            Condition::NoCarry => !self.flags.carry,
            Condition::Carry => self.flags.carry,
            Condition::ParityOdd => !self.flags.parity,
            Condition::ParityEven => self.flags.parity,
            Condition::Plus => !self.flags.sign,
            Condition::Minus => self.flags.sign,
        }
    }
}

impl<B: IoBus> Cpu<B> for I8080 {
    fn step(&mut self, bus: &mut B) -> Step {
        if self.halted {
            return Step::Halted;
        }

        let address = self.regs.pc;
        let opcode = self.fetch_byte(bus);
        let entry = OPCODES[usize::from(opcode)];

        if entry.instruction == Instruction::Undefined {
            self.regs.pc = address;
            return Step::Unimplemented { opcode, address };
        }

        let taken = self.execute(bus, entry.instruction);
        let cycles = if taken {
            entry.alt_cycles
        } else {
            entry.cycles
        };
        self.cycles += u64::from(cycles);

        if self.halted {
            Step::Halted
        } else {
            Step::Continue {
                cycles: u32::from(cycles),
            }
        }
    }

    fn interrupt(&mut self, bus: &mut B, vector: u8) -> bool {
        if !self.inte {
            return false;
        }
        self.push(bus, self.regs.pc);
        self.regs.pc = u16::from(vector & 0x07) * 8;
        self.halted = false;
        self.cycles += INTERRUPT_CYCLES;
        true
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }
}

/// All query paths supported by the 8080.
const I8080_QUERY_PATHS: &[&str] = &[
    // Registers
    "a", "b", "c", "d", "e", "h", "l",
    // Register pairs
    "bc", "de", "hl", "psw",
    // Other registers
    "sp", "pc",
    // Flags (individual)
    "flags.z", "flags.s", "flags.p", "flags.cy", "flags.ac",
    // CPU state
    "inte", "halted", "cycles",
];

impl Observable for I8080 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "a" => Some(self.regs.a.into()),
            "b" => Some(self.regs.b.into()),
            "c" => Some(self.regs.c.into()),
            "d" => Some(self.regs.d.into()),
            "e" => Some(self.regs.e.into()),
            "h" => Some(self.regs.h.into()),
            "l" => Some(self.regs.l.into()),

            "bc" => Some(self.regs.bc().into()),
            "de" => Some(self.regs.de().into()),
            "hl" => Some(self.regs.hl().into()),
            "psw" => Some(self.psw().into()),

            "sp" => Some(self.regs.sp.into()),
            "pc" => Some(self.regs.pc.into()),

            "flags.z" => Some(self.flags.zero.into()),
            "flags.s" => Some(self.flags.sign.into()),
            "flags.p" => Some(self.flags.parity.into()),
            "flags.cy" => Some(self.flags.carry.into()),
            "flags.ac" => Some(self.flags.aux_carry.into()),

            "inte" => Some(self.inte.into()),
            "halted" => Some(self.halted.into()),
            "cycles" => Some(self.cycles.into()),

            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        I8080_QUERY_PATHS
    }
}
