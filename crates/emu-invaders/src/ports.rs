//! Port controller: the board's IN/OUT decoding and the external shift
//! register.
//!
//! | Port | IN | OUT |
//! |---|---|---|
//! | 0 | unused, reads `0x0E` | - |
//! | 1 | player 1 / coin switches | - |
//! | 2 | player 2 / DIP switches | shift amount |
//! | 3 | shift result | sound latch 1 |
//! | 4 | - | shift data |
//! | 5 | - | sound latch 2 |
//! | 6 | - | watchdog |

#![allow(clippy::cast_possible_truncation)]

use tracing::debug;

use crate::input::{Button, DipSwitches};

pub const IN_UNUSED: u8 = 0;
pub const IN_PLAYER1: u8 = 1;
pub const IN_PLAYER2: u8 = 2;
pub const IN_SHIFT_RESULT: u8 = 3;

pub const OUT_SHIFT_AMOUNT: u8 = 2;
pub const OUT_SOUND1: u8 = 3;
pub const OUT_SHIFT_DATA: u8 = 4;
pub const OUT_SOUND2: u8 = 5;
pub const OUT_WATCHDOG: u8 = 6;

/// Idle pattern read from input port 0.
const PORT0_IDLE: u8 = 0x0E;

/// Input port 1 bit 3 is tied high on the board.
const PORT1_ALWAYS_SET: u8 = 0x08;

/// 16-bit external shift register (two Fujitsu MB14241-style latches).
///
/// The firmware writes bytes in, picks a shift amount, and reads back the
/// 8-bit window; this is how it draws sprites at arbitrary bit offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftRegister {
    shift0: u8,
    shift1: u8,
    amount: u8,
}

impl ShiftRegister {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shift0: 0,
            shift1: 0,
            amount: 0,
        }
    }

    /// Shift a new byte in: the previous high byte becomes the low byte.
    pub fn write_data(&mut self, value: u8) {
        self.shift0 = self.shift1;
        self.shift1 = value;
    }

    /// Latch the shift amount (low three bits).
    pub fn write_amount(&mut self, value: u8) {
        self.amount = value & 0x07;
    }

    /// The 8-bit window `amount` bits below the top of the 16-bit value.
    #[must_use]
    pub fn read(&self) -> u8 {
        let value = u16::from(self.shift1) << 8 | u16::from(self.shift0);
        (value >> (8 - self.amount)) as u8
    }

    #[must_use]
    pub fn amount(&self) -> u8 {
        self.amount
    }
}

/// Everything behind the board's port decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvadersPorts {
    in1: u8,
    in2: u8,
    shift: ShiftRegister,
    sound1: u8,
    sound2: u8,
    watchdog: u8,
}

impl InvadersPorts {
    #[must_use]
    pub fn new(dip: DipSwitches) -> Self {
        Self {
            in1: PORT1_ALWAYS_SET,
            in2: dip.port2_bits(),
            shift: ShiftRegister::new(),
            sound1: 0,
            sound2: 0,
            watchdog: 0,
        }
    }

    /// Value the CPU sees on an IN instruction.
    #[must_use]
    pub fn read(&self, port: u8) -> u8 {
        match port {
            IN_UNUSED => PORT0_IDLE,
            IN_PLAYER1 => self.in1,
            IN_PLAYER2 => self.in2,
            IN_SHIFT_RESULT => self.shift.read(),
            _ => {
                debug!(port, "read from unmapped input port");
                0
            }
        }
    }

    /// Apply an OUT instruction.
    pub fn write(&mut self, port: u8, value: u8) {
        match port {
            OUT_SHIFT_AMOUNT => self.shift.write_amount(value),
            OUT_SOUND1 => self.sound1 = value,
            OUT_SHIFT_DATA => self.shift.write_data(value),
            OUT_SOUND2 => self.sound2 = value,
            OUT_WATCHDOG => self.watchdog = value,
            _ => debug!(port, value, "write to unmapped output port ignored"),
        }
    }

    pub fn press(&mut self, button: Button) {
        let (port, mask) = button.location();
        *self.input_mut(port) |= mask;
    }

    pub fn release(&mut self, button: Button) {
        let (port, mask) = button.location();
        *self.input_mut(port) &= !mask;
    }

    fn input_mut(&mut self, port: u8) -> &mut u8 {
        if port == IN_PLAYER1 {
            &mut self.in1
        } else {
            &mut self.in2
        }
    }

    #[must_use]
    pub fn in1(&self) -> u8 {
        self.in1
    }

    #[must_use]
    pub fn in2(&self) -> u8 {
        self.in2
    }

    #[must_use]
    pub fn shift(&self) -> &ShiftRegister {
        &self.shift
    }

    /// Last values written to the two sound latches.
    #[must_use]
    pub fn sound(&self) -> (u8, u8) {
        (self.sound1, self.sound2)
    }

    #[must_use]
    pub fn watchdog(&self) -> u8 {
        self.watchdog
    }
}

impl Default for InvadersPorts {
    fn default() -> Self {
        Self::new(DipSwitches::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_register_windows() {
        let mut shift = ShiftRegister::new();
        shift.write_data(0xAB);
        shift.write_data(0xCD);
        // 0xCDAB
        assert_eq!(shift.read(), 0xCD);
        shift.write_amount(4);
        assert_eq!(shift.read(), 0xDA);
        shift.write_amount(7);
        assert_eq!(shift.read(), 0xD5);
    }

    #[test]
    fn shift_amount_keeps_low_bits() {
        let mut shift = ShiftRegister::new();
        shift.write_amount(0xFB);
        assert_eq!(shift.amount(), 3);
    }

    #[test]
    fn shift_round_trip_through_ports() {
        let mut ports = InvadersPorts::default();
        ports.write(OUT_SHIFT_DATA, 0xFF);
        ports.write(OUT_SHIFT_DATA, 0x00);
        ports.write(OUT_SHIFT_AMOUNT, 2);
        // 0x00FF >> 6
        assert_eq!(ports.read(IN_SHIFT_RESULT), 0x03);
    }

    #[test]
    fn fixed_and_unmapped_inputs() {
        let ports = InvadersPorts::default();
        assert_eq!(ports.read(IN_UNUSED), 0x0E);
        assert_eq!(ports.read(IN_PLAYER1), 0x08);
        assert_eq!(ports.read(7), 0x00);
    }

    #[test]
    fn latches_record_writes() {
        let mut ports = InvadersPorts::default();
        ports.write(OUT_SOUND1, 0x01);
        ports.write(OUT_SOUND2, 0x10);
        ports.write(OUT_WATCHDOG, 0x55);
        ports.write(0x42, 0x99);
        assert_eq!(ports.sound(), (0x01, 0x10));
        assert_eq!(ports.watchdog(), 0x55);
    }

    #[test]
    fn buttons_set_and_clear_bits() {
        let mut ports = InvadersPorts::default();
        ports.press(Button::Coin);
        ports.press(Button::P1Fire);
        assert_eq!(ports.read(IN_PLAYER1), 0x08 | 0x01 | 0x10);
        ports.release(Button::Coin);
        assert_eq!(ports.read(IN_PLAYER1), 0x08 | 0x10);

        let before = ports.in2();
        ports.press(Button::P2Right);
        assert_eq!(ports.read(IN_PLAYER2), before | 0x40);
        ports.release(Button::P2Right);
        assert_eq!(ports.read(IN_PLAYER2), before);
    }
}
