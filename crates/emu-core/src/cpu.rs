//! CPU core trait.

use crate::IoBus;

/// Outcome of executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The instruction completed; `cycles` clock states were consumed.
    Continue { cycles: u32 },
    /// The CPU executed (or is parked on) a halt instruction.
    Halted,
    /// The byte at `address` has no defined behaviour. No state was changed.
    Unimplemented { opcode: u8, address: u16 },
}

/// A CPU that executes whole instructions.
///
/// The bus is passed in, not owned, so the machine keeps control of memory
/// and ports between steps (interrupt injection, frame snapshots, input).
pub trait Cpu<B: IoBus> {
    /// Execute one instruction. Never blocks and never loops.
    fn step(&mut self, bus: &mut B) -> Step;

    /// Request a maskable interrupt through restart vector `vector` (0..=7).
    ///
    /// Returns true if the interrupt was accepted.
    fn interrupt(&mut self, bus: &mut B, vector: u8) -> bool;

    /// Reset the CPU to its power-on state.
    fn reset(&mut self);

    /// Current program counter.
    fn pc(&self) -> u16;
}
