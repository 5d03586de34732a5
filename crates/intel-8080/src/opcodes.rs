//! Opcode table.
//!
//! The 8080 encodes operands in fixed bit fields: bits 5..3 select a
//! destination register, condition or restart vector, bits 2..0 a source
//! register, bits 5..4 a register pair. `decode` turns each of the 256
//! bytes into an [`Instruction`] once, at compile time, so the dispatcher
//! never re-derives which handler family or flag policy applies.

#![allow(clippy::cast_possible_truncation)] // Table index is always < 256.

use std::fmt;

use crate::registers::RegisterPair;

/// 8-bit operand: a register, or `M` (memory addressed by HL).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Reg {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::B,
            1 => Self::C,
            2 => Self::D,
            3 => Self::E,
            4 => Self::H,
            5 => Self::L,
            6 => Self::M,
            _ => Self::A,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::H => "H",
            Self::L => "L",
            Self::M => "M",
            Self::A => "A",
        }
    }
}

/// Branch condition, bits 5..3 of conditional jump/call/return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::NotZero,
            1 => Self::Zero,
            2 => Self::NoCarry,
            3 => Self::Carry,
            4 => Self::ParityOdd,
            5 => Self::ParityEven,
            6 => Self::Plus,
            _ => Self::Minus,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::NotZero => "NZ",
            Self::Zero => "Z",
            Self::NoCarry => "NC",
            Self::Carry => "C",
            Self::ParityOdd => "PO",
            Self::ParityEven => "PE",
            Self::Plus => "P",
            Self::Minus => "M",
        }
    }
}

/// Accumulator operation, bits 5..3 of the 0x80..0xBF block and of the
/// immediate forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Self::Add,
            1 => Self::Adc,
            2 => Self::Sub,
            3 => Self::Sbb,
            4 => Self::Ana,
            5 => Self::Xra,
            6 => Self::Ora,
            _ => Self::Cmp,
        }
    }

    const fn mnemonics(self) -> (&'static str, &'static str) {
        match self {
            Self::Add => ("ADD", "ADI"),
            Self::Adc => ("ADC", "ACI"),
            Self::Sub => ("SUB", "SUI"),
            Self::Sbb => ("SBB", "SBI"),
            Self::Ana => ("ANA", "ANI"),
            Self::Xra => ("XRA", "XRI"),
            Self::Ora => ("ORA", "ORI"),
            Self::Cmp => ("CMP", "CPI"),
        }
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Hlt,
    /// MOV dst, src
    Mov(Reg, Reg),
    Mvi(Reg),
    Lxi(RegisterPair),
    Lda,
    Sta,
    Lhld,
    Shld,
    Ldax(RegisterPair),
    Stax(RegisterPair),
    Xchg,
    Inr(Reg),
    Dcr(Reg),
    Inx(RegisterPair),
    Dcx(RegisterPair),
    Dad(RegisterPair),
    Alu(AluOp, Reg),
    AluImm(AluOp),
    Rlc,
    Rrc,
    Ral,
    Rar,
    Daa,
    Cma,
    Stc,
    Cmc,
    Jmp,
    Jcc(Condition),
    Call,
    Ccc(Condition),
    Ret,
    Rcc(Condition),
    Rst(u8),
    Pchl,
    Push(RegisterPair),
    Pop(RegisterPair),
    Xthl,
    Sphl,
    In,
    Out,
    Ei,
    Di,
    /// Undocumented alias with no defined behaviour here.
    Undefined,
}

impl Instruction {
    /// Instruction length in bytes, opcode included.
    #[must_use]
    pub const fn length(self) -> u8 {
        match self {
            Self::Mvi(_) | Self::AluImm(_) | Self::In | Self::Out => 2,
            Self::Lxi(_)
            | Self::Lda
            | Self::Sta
            | Self::Lhld
            | Self::Shld
            | Self::Jmp
            | Self::Jcc(_)
            | Self::Call
            | Self::Ccc(_) => 3,
            _ => 1,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Nop => write!(f, "NOP"),
            Self::Hlt => write!(f, "HLT"),
            Self::Mov(dst, src) => write!(f, "MOV {},{}", dst.name(), src.name()),
            Self::Mvi(r) => write!(f, "MVI {},d8", r.name()),
            Self::Lxi(rp) => write!(f, "LXI {},d16", rp.name()),
            Self::Lda => write!(f, "LDA a16"),
            Self::Sta => write!(f, "STA a16"),
            Self::Lhld => write!(f, "LHLD a16"),
            Self::Shld => write!(f, "SHLD a16"),
            Self::Ldax(rp) => write!(f, "LDAX {}", rp.name()),
            Self::Stax(rp) => write!(f, "STAX {}", rp.name()),
            Self::Xchg => write!(f, "XCHG"),
            Self::Inr(r) => write!(f, "INR {}", r.name()),
            Self::Dcr(r) => write!(f, "DCR {}", r.name()),
            Self::Inx(rp) => write!(f, "INX {}", rp.name()),
            Self::Dcx(rp) => write!(f, "DCX {}", rp.name()),
            Self::Dad(rp) => write!(f, "DAD {}", rp.name()),
            Self::Alu(op, r) => write!(f, "{} {}", op.mnemonics().0, r.name()),
            Self::AluImm(op) => write!(f, "{} d8", op.mnemonics().1),
            Self::Rlc => write!(f, "RLC"),
            Self::Rrc => write!(f, "RRC"),
            Self::Ral => write!(f, "RAL"),
            Self::Rar => write!(f, "RAR"),
            Self::Daa => write!(f, "DAA"),
            Self::Cma => write!(f, "CMA"),
            Self::Stc => write!(f, "STC"),
            Self::Cmc => write!(f, "CMC"),
            Self::Jmp => write!(f, "JMP a16"),
            Self::Jcc(cc) => write!(f, "J{} a16", cc.suffix()),
            Self::Call => write!(f, "CALL a16"),
            Self::Ccc(cc) => write!(f, "C{} a16", cc.suffix()),
            Self::Ret => write!(f, "RET"),
            Self::Rcc(cc) => write!(f, "R{}", cc.suffix()),
            Self::Rst(n) => write!(f, "RST {n}"),
            Self::Pchl => write!(f, "PCHL"),
            Self::Push(rp) => write!(f, "PUSH {}", rp.name()),
            Self::Pop(rp) => write!(f, "POP {}", rp.name()),
            Self::Xthl => write!(f, "XTHL"),
            Self::Sphl => write!(f, "SPHL"),
            Self::In => write!(f, "IN d8"),
            Self::Out => write!(f, "OUT d8"),
            Self::Ei => write!(f, "EI"),
            Self::Di => write!(f, "DI"),
            Self::Undefined => write!(f, "???"),
        }
    }
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub instruction: Instruction,
    /// Clock states when not branching (or unconditionally).
    pub cycles: u8,
    /// Clock states when a conditional call or return is taken.
    pub alt_cycles: u8,
}

impl Opcode {
    /// Instruction length in bytes, opcode included.
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.instruction.length()
    }
}

/// The full 256-entry opcode table.
pub static OPCODES: [Opcode; 256] = build_table();

const fn build_table() -> [Opcode; 256] {
    let mut table = [Opcode {
        instruction: Instruction::Undefined,
        cycles: 4,
        alt_cycles: 4,
    }; 256];
    let mut i = 0;
    while i < 256 {
        let instruction = decode(i as u8);
        let (cycles, alt_cycles) = timing(instruction);
        table[i] = Opcode {
            instruction,
            cycles,
            alt_cycles,
        };
        i += 1;
    }
    table
}

/// Register pair from bits 5..4, with encoding 3 meaning SP.
const fn pair_sp(op: u8) -> RegisterPair {
    match (op >> 4) & 0x03 {
        0 => RegisterPair::B,
        1 => RegisterPair::D,
        2 => RegisterPair::H,
        _ => RegisterPair::Sp,
    }
}

/// Register pair from bits 5..4, with encoding 3 meaning PSW.
const fn pair_psw(op: u8) -> RegisterPair {
    match (op >> 4) & 0x03 {
        0 => RegisterPair::B,
        1 => RegisterPair::D,
        2 => RegisterPair::H,
        _ => RegisterPair::Psw,
    }
}

const fn decode(op: u8) -> Instruction {
    let ddd = (op >> 3) & 0x07;
    let sss = op & 0x07;

    match op >> 6 {
        // 0x40..0x7F: MOV block, with HLT where MOV M,M would be.
        1 => {
            if op == 0x76 {
                Instruction::Hlt
            } else {
                Instruction::Mov(Reg::from_bits(ddd), Reg::from_bits(sss))
            }
        }
        // 0x80..0xBF: accumulator ops against a register or M.
        2 => Instruction::Alu(AluOp::from_bits(ddd), Reg::from_bits(sss)),
        0 => match sss {
            0 => {
                if op == 0x00 {
                    Instruction::Nop
                } else {
                    Instruction::Undefined
                }
            }
            1 => {
                if op & 0x08 == 0 {
                    Instruction::Lxi(pair_sp(op))
                } else {
                    Instruction::Dad(pair_sp(op))
                }
            }
            2 => match op {
                0x02 => Instruction::Stax(RegisterPair::B),
                0x12 => Instruction::Stax(RegisterPair::D),
                0x0A => Instruction::Ldax(RegisterPair::B),
                0x1A => Instruction::Ldax(RegisterPair::D),
                0x22 => Instruction::Shld,
                0x2A => Instruction::Lhld,
                0x32 => Instruction::Sta,
                _ => Instruction::Lda,
            },
            3 => {
                if op & 0x08 == 0 {
                    Instruction::Inx(pair_sp(op))
                } else {
                    Instruction::Dcx(pair_sp(op))
                }
            }
            4 => Instruction::Inr(Reg::from_bits(ddd)),
            5 => Instruction::Dcr(Reg::from_bits(ddd)),
            6 => Instruction::Mvi(Reg::from_bits(ddd)),
            _ => match ddd {
                0 => Instruction::Rlc,
                1 => Instruction::Rrc,
                2 => Instruction::Ral,
                3 => Instruction::Rar,
                4 => Instruction::Daa,
                5 => Instruction::Cma,
                6 => Instruction::Stc,
                _ => Instruction::Cmc,
            },
        },
        _ => match sss {
            0 => Instruction::Rcc(Condition::from_bits(ddd)),
            1 => match op {
                0xC9 => Instruction::Ret,
                0xE9 => Instruction::Pchl,
                0xF9 => Instruction::Sphl,
                0xD9 => Instruction::Undefined,
                _ => Instruction::Pop(pair_psw(op)),
            },
            2 => Instruction::Jcc(Condition::from_bits(ddd)),
            3 => match op {
                0xC3 => Instruction::Jmp,
                0xD3 => Instruction::Out,
                0xDB => Instruction::In,
                0xE3 => Instruction::Xthl,
                0xEB => Instruction::Xchg,
                0xF3 => Instruction::Di,
                0xFB => Instruction::Ei,
                _ => Instruction::Undefined,
            },
            4 => Instruction::Ccc(Condition::from_bits(ddd)),
            5 => match op {
                0xCD => Instruction::Call,
                0xDD | 0xED | 0xFD => Instruction::Undefined,
                _ => Instruction::Push(pair_psw(op)),
            },
            6 => Instruction::AluImm(AluOp::from_bits(ddd)),
            _ => Instruction::Rst(ddd),
        },
    }
}

/// Documented clock states: (not taken, taken).
const fn timing(instruction: Instruction) -> (u8, u8) {
    let cycles = match instruction {
        Instruction::Ccc(_) => return (11, 17),
        Instruction::Rcc(_) => return (5, 11),
        Instruction::Nop
        | Instruction::Alu(_, Reg::B | Reg::C | Reg::D | Reg::E | Reg::H | Reg::L | Reg::A)
        | Instruction::Rlc
        | Instruction::Rrc
        | Instruction::Ral
        | Instruction::Rar
        | Instruction::Daa
        | Instruction::Cma
        | Instruction::Stc
        | Instruction::Cmc
        | Instruction::Ei
        | Instruction::Di
        | Instruction::Undefined => 4,
        Instruction::Mov(Reg::M, _)
        | Instruction::Mov(_, Reg::M)
        | Instruction::Hlt
        | Instruction::Ldax(_)
        | Instruction::Stax(_)
        | Instruction::Alu(_, Reg::M)
        | Instruction::AluImm(_) => 7,
        Instruction::Inr(Reg::M) | Instruction::Dcr(Reg::M) | Instruction::Mvi(Reg::M) => 10,
        Instruction::Mvi(_) => 7,
        Instruction::Mov(_, _)
        | Instruction::Inr(_)
        | Instruction::Dcr(_)
        | Instruction::Inx(_)
        | Instruction::Dcx(_)
        | Instruction::Xchg
        | Instruction::Pchl
        | Instruction::Sphl => 5,
        Instruction::Lxi(_)
        | Instruction::Dad(_)
        | Instruction::Jmp
        | Instruction::Jcc(_)
        | Instruction::Ret
        | Instruction::Pop(_)
        | Instruction::In
        | Instruction::Out => 10,
        Instruction::Push(_) | Instruction::Rst(_) => 11,
        Instruction::Lda | Instruction::Sta => 13,
        Instruction::Lhld | Instruction::Shld => 16,
        Instruction::Call => 17,
        Instruction::Xthl => 18,
    };
    (cycles, cycles)
}
