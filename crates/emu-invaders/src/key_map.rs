//! Host keyboard to cabinet switch mapping.
//!
//! Default mapping:
//! - C → coin
//! - 1 / 2 → one / two player start
//! - Arrows → player 1 left / right
//! - Space → player 1 fire
//! - A / D / W → player 2 left / right / fire
//! - T → tilt

use winit::keyboard::KeyCode;

use crate::input::Button;

/// Map a host key to a cabinet switch.
///
/// Returns `None` for unmapped keys.
#[must_use]
pub fn map_keycode(key: KeyCode) -> Option<Button> {
    match key {
        KeyCode::KeyC => Some(Button::Coin),
        KeyCode::Digit1 => Some(Button::P1Start),
        KeyCode::Digit2 => Some(Button::P2Start),
        KeyCode::ArrowLeft => Some(Button::P1Left),
        KeyCode::ArrowRight => Some(Button::P1Right),
        KeyCode::Space => Some(Button::P1Fire),
        KeyCode::KeyA => Some(Button::P2Left),
        KeyCode::KeyD => Some(Button::P2Right),
        KeyCode::KeyW => Some(Button::P2Fire),
        KeyCode::KeyT => Some(Button::Tilt),
        _ => None,
    }
}
