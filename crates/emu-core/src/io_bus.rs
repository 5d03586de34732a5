use crate::Bus;

/// A bus that also has a separate I/O port space.
///
/// The 8080 addresses 256 ports with the IN and OUT instructions. What a
/// port means is entirely up to the machine: input switches, latches,
/// peripheral registers.
pub trait IoBus: Bus {
    /// Read a byte from the given I/O port.
    fn read_io(&mut self, port: u8) -> u8;

    /// Write a byte to the given I/O port.
    fn write_io(&mut self, port: u8, value: u8);
}
