//! Machine configuration.

use std::path::PathBuf;

use crate::input::DipSwitches;

/// CPU crystal: 2 MHz.
pub const CPU_HZ: u64 = 2_000_000;

/// Monitor refresh rate.
pub const FRAMES_PER_SECOND: u64 = 60;

/// Where the ROM images come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomSource {
    /// Directory holding `invaders.h`, `.g`, `.f` and `.e`.
    Directory(PathBuf),
    /// One combined 8K image loaded at 0x0000.
    Combined(PathBuf),
    /// Bytes already in memory, loaded at 0x0000.
    Bytes(Vec<u8>),
}

impl Default for RomSource {
    fn default() -> Self {
        Self::Directory(PathBuf::from("roms"))
    }
}

/// What to do when the CPU meets an opcode it does not implement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnimplementedPolicy {
    /// Stop the machine with an error.
    #[default]
    Fatal,
    /// Log a warning and step over the byte.
    Skip,
}

/// Space Invaders configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvadersConfig {
    pub roms: RomSource,
    pub dip: DipSwitches,
    pub policy: UnimplementedPolicy,
}
