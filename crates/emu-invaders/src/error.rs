//! Machine errors.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InvadersError>;

#[derive(Debug, Error)]
pub enum InvadersError {
    #[error("failed to read ROM {}: {source}", path.display())]
    RomRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("ROM image {name} is {len} bytes, only {room} fit at {offset:#06X}")]
    RomTooLarge {
        name: String,
        offset: u16,
        len: usize,
        room: usize,
    },
    #[error("unimplemented opcode {opcode:#04X} at {address:#06X}")]
    UnimplementedOpcode { opcode: u8, address: u16 },
    #[error("CPU halted at {address:#06X}")]
    Halted { address: u16 },
    #[error("failed to write screenshot {}: {source}", path.display())]
    Screenshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
