//! Cabinet inputs: buttons and DIP switches.
//!
//! Input port 1: bit0 coin, bit1 P2 start, bit2 P1 start, bit3 always 1,
//! bit4 P1 fire, bit5 P1 left, bit6 P1 right.
//!
//! Input port 2: bits 0-1 lives DIP, bit2 tilt, bit3 bonus-ship DIP,
//! bit4 P2 fire, bit5 P2 left, bit6 P2 right, bit7 coin-info DIP.
//!
//! Switches are active high: pressing sets the bit.

use crate::ports::{IN_PLAYER1, IN_PLAYER2};

/// A cabinet switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Coin,
    P1Start,
    P2Start,
    P1Fire,
    P1Left,
    P1Right,
    P2Fire,
    P2Left,
    P2Right,
    Tilt,
}

impl Button {
    /// Input port and bit mask this switch drives.
    #[must_use]
    pub const fn location(self) -> (u8, u8) {
        match self {
            Self::Coin => (IN_PLAYER1, 0x01),
            Self::P2Start => (IN_PLAYER1, 0x02),
            Self::P1Start => (IN_PLAYER1, 0x04),
            Self::P1Fire => (IN_PLAYER1, 0x10),
            Self::P1Left => (IN_PLAYER1, 0x20),
            Self::P1Right => (IN_PLAYER1, 0x40),
            Self::Tilt => (IN_PLAYER2, 0x04),
            Self::P2Fire => (IN_PLAYER2, 0x10),
            Self::P2Left => (IN_PLAYER2, 0x20),
            Self::P2Right => (IN_PLAYER2, 0x40),
        }
    }
}

/// Operator DIP switch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DipSwitches {
    /// Ships per game, 3 to 6.
    pub lives: u8,
    /// Award the bonus ship at 1000 points instead of 1500.
    pub bonus_at_1000: bool,
    /// Show coin information on the attract screen.
    pub coin_info: bool,
}

impl Default for DipSwitches {
    fn default() -> Self {
        Self {
            lives: 3,
            bonus_at_1000: false,
            coin_info: true,
        }
    }
}

impl DipSwitches {
    /// The DIP bits of input port 2. Lives outside 3..=6 are clamped.
    #[must_use]
    pub fn port2_bits(self) -> u8 {
        let mut bits = self.lives.clamp(3, 6) - 3;
        if self.bonus_at_1000 {
            bits |= 0x08;
        }
        // Coin info is shown when the switch is open (bit clear).
        if !self.coin_info {
            bits |= 0x80;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dips_are_three_lives_with_coin_info() {
        assert_eq!(DipSwitches::default().port2_bits(), 0x00);
    }

    #[test]
    fn dip_bits() {
        let dip = DipSwitches {
            lives: 6,
            bonus_at_1000: true,
            coin_info: false,
        };
        assert_eq!(dip.port2_bits(), 0x03 | 0x08 | 0x80);

        let dip = DipSwitches {
            lives: 9,
            ..DipSwitches::default()
        };
        assert_eq!(dip.port2_bits(), 0x03);
    }

    #[test]
    fn buttons_have_distinct_bits() {
        let all = [
            Button::Coin,
            Button::P1Start,
            Button::P2Start,
            Button::P1Fire,
            Button::P1Left,
            Button::P1Right,
            Button::P2Fire,
            Button::P2Left,
            Button::P2Right,
            Button::Tilt,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.location(), b.location(), "{a:?} and {b:?} overlap");
            }
        }
    }
}
