//! Space Invaders bus: flat 64K address space plus the port controller.
//!
//! The board decodes only the low 14 address bits, but the firmware never
//! strays outside 0x0000-0x3FFF, so the whole 64K array is backed and
//! nothing is write-protected.

use emu_core::{Bus, IoBus};

use crate::input::DipSwitches;
use crate::ports::InvadersPorts;

/// Start of work RAM.
pub const RAM_START: u16 = 0x2000;

pub struct InvadersBus {
    memory: Box<[u8; 0x10000]>,
    pub ports: InvadersPorts,
}

impl InvadersBus {
    #[must_use]
    pub fn new(dip: DipSwitches) -> Self {
        Self {
            memory: Box::new([0; 0x10000]),
            ports: InvadersPorts::new(dip),
        }
    }

    /// Copy bytes verbatim into memory starting at `offset`, wrapping at
    /// the top of the address space.
    pub fn load(&mut self, offset: u16, data: &[u8]) {
        let mut addr = offset;
        for &byte in data {
            self.memory[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read a byte without side effects.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    /// Borrow a range of memory.
    #[must_use]
    pub fn slice(&self, start: u16, len: usize) -> &[u8] {
        let start = usize::from(start);
        let end = (start + len).min(self.memory.len());
        &self.memory[start..end]
    }
}

impl Default for InvadersBus {
    fn default() -> Self {
        Self::new(DipSwitches::default())
    }
}

impl Bus for InvadersBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[usize::from(address)] = value;
    }
}

impl IoBus for InvadersBus {
    fn read_io(&mut self, port: u8) -> u8 {
        self.ports.read(port)
    }

    fn write_io(&mut self, port: u8, value: u8) {
        self.ports.write(port, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rom_area_is_writable() {
        let mut bus = InvadersBus::default();
        bus.write(0x0000, 0xAA);
        assert_eq!(bus.read(0x0000), 0xAA);
        bus.write(0xFFFF, 0x55);
        assert_eq!(bus.peek(0xFFFF), 0x55);
    }

    #[test]
    fn load_wraps_at_top() {
        let mut bus = InvadersBus::default();
        bus.load(0xFFFF, &[1, 2]);
        assert_eq!(bus.peek(0xFFFF), 1);
        assert_eq!(bus.peek(0x0000), 2);
    }

    #[test]
    fn io_goes_to_ports() {
        let mut bus = InvadersBus::default();
        bus.write_io(4, 0x12);
        bus.write_io(4, 0x34);
        bus.write_io(2, 0);
        assert_eq!(bus.read_io(3), 0x34);
        assert_eq!(bus.read_io(0), 0x0E);
    }

    #[test]
    fn slice_is_clamped() {
        let bus = InvadersBus::default();
        assert_eq!(bus.slice(RAM_START, 0x400).len(), 0x400);
        assert_eq!(bus.slice(0xFFF0, 0x100).len(), 0x10);
    }
}
