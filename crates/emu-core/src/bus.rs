//! Memory bus interface.

use crate::IoBus;

/// Memory bus interface.
///
/// The CPU reaches memory through this trait. Addresses are 16 bits wide
/// and every address is valid: the bus never faults, whatever the emulated
/// program does.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Flat 64 KiB RAM with a trivial port space.
///
/// Used by CPU tests and diagnostic harnesses. Port reads return `0xFF`;
/// port writes are latched so tests can inspect them.
pub struct SimpleBus {
    ram: Box<[u8; 0x10000]>,
    outputs: [Option<u8>; 256],
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; 0x10000]),
            outputs: [None; 256],
        }
    }

    /// Copy `data` into RAM starting at `address`, wrapping at the top.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let mut addr = address;
        for &byte in data {
            self.ram[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read RAM without side effects.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    /// Last value written to `port`, if any.
    #[must_use]
    pub fn last_output(&self, port: u8) -> Option<u8> {
        self.outputs[usize::from(port)]
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address)] = value;
    }
}

impl IoBus for SimpleBus {
    fn read_io(&mut self, _port: u8) -> u8 {
        0xFF
    }

    fn write_io(&mut self, port: u8, value: u8) {
        self.outputs[usize::from(port)] = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_wraps_at_top_of_memory() {
        let mut bus = SimpleBus::new();
        bus.load(0xFFFF, &[0x11, 0x22]);
        assert_eq!(bus.peek(0xFFFF), 0x11);
        assert_eq!(bus.peek(0x0000), 0x22);
    }

    #[test]
    fn port_writes_are_latched() {
        let mut bus = SimpleBus::new();
        assert_eq!(bus.last_output(4), None);
        bus.write_io(4, 0xAB);
        assert_eq!(bus.last_output(4), Some(0xAB));
        assert_eq!(bus.read_io(4), 0xFF);
    }
}
