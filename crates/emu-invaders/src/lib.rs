//! Space Invaders (Taito/Midway, 1978) arcade board emulator.
//!
//! An Intel 8080 at 2 MHz, 8K of ROM, 1K of work RAM and 7K of 1-bit
//! video RAM, plus a hardware shift register on the I/O ports. The video
//! circuit raises RST 1 at mid-screen and RST 2 at vertical blank.

mod bus;
#[cfg(feature = "native")]
pub mod capture;
mod config;
mod error;
mod input;
mod invaders;
#[cfg(feature = "native")]
pub mod key_map;
pub mod ports;
pub mod rom;
pub mod video;

pub use bus::{InvadersBus, RAM_START};
pub use config::{CPU_HZ, FRAMES_PER_SECOND, InvadersConfig, RomSource, UnimplementedPolicy};
pub use error::{InvadersError, Result};
pub use input::{Button, DipSwitches};
pub use invaders::{Invaders, MID_SCREEN_VECTOR, VBLANK_VECTOR};
