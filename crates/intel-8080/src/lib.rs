//! Intel 8080 CPU emulator.
//!
//! Each call to `step()` executes exactly one instruction against a bus
//! the caller owns. Flags are bit-exact: firmware depends on them.

mod alu;
mod cpu;
mod flags;
mod opcodes;
mod registers;

pub use alu::AluResult;
pub use cpu::I8080;
pub use flags::Flags;
pub use opcodes::{AluOp, Condition, Instruction, OPCODES, Opcode, Reg};
pub use registers::{RegisterPair, Registers};
