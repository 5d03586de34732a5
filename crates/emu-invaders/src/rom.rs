//! ROM loading.
//!
//! The board carries four 2K EPROMs. MAME-style dumps name them
//! `invaders.h`, `.g`, `.f` and `.e`; some distributions ship a single
//! combined 8K `invaders` file instead. Images are copied verbatim, with
//! no header or checksum check.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{InvadersError, Result};

/// Size of the ROM window at the bottom of the address space.
pub const ROM_SIZE: usize = 0x2000;

/// One ROM image and where it sits in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomImage {
    pub name: &'static str,
    pub offset: u16,
}

/// The standard four-chip set.
pub const INVADERS_ROMS: [RomImage; 4] = [
    RomImage {
        name: "invaders.h",
        offset: 0x0000,
    },
    RomImage {
        name: "invaders.g",
        offset: 0x0800,
    },
    RomImage {
        name: "invaders.f",
        offset: 0x1000,
    },
    RomImage {
        name: "invaders.e",
        offset: 0x1800,
    },
];

/// Loaded ROM contents, ready to copy into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomSet {
    /// `(offset, bytes)` for each image.
    pub images: Vec<(u16, Vec<u8>)>,
}

impl RomSet {
    /// A single image loaded at 0x0000.
    ///
    /// # Errors
    ///
    /// Returns [`InvadersError::RomTooLarge`] if the image exceeds the
    /// ROM window.
    pub fn combined(name: &str, bytes: Vec<u8>) -> Result<Self> {
        check_fits(name, 0x0000, bytes.len())?;
        Ok(Self {
            images: vec![(0x0000, bytes)],
        })
    }

    /// Total bytes across all images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.iter().map(|(_, bytes)| bytes.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_fits(name: &str, offset: u16, len: usize) -> Result<()> {
    let room = ROM_SIZE.saturating_sub(usize::from(offset));
    if len > room {
        return Err(InvadersError::RomTooLarge {
            name: name.to_string(),
            offset,
            len,
            room,
        });
    }
    Ok(())
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| InvadersError::RomRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the four standard images from `dir`.
///
/// # Errors
///
/// Returns [`InvadersError::RomRead`] naming the first file that cannot
/// be read, or [`InvadersError::RomTooLarge`] for an oversized image.
pub fn load_rom_set(dir: &Path) -> Result<RomSet> {
    let mut images = Vec::with_capacity(INVADERS_ROMS.len());
    for rom in &INVADERS_ROMS {
        let path = dir.join(rom.name);
        let bytes = read_image(&path)?;
        check_fits(rom.name, rom.offset, bytes.len())?;
        info!(path = %path.display(), offset = rom.offset, len = bytes.len(), "loaded ROM");
        images.push((rom.offset, bytes));
    }
    Ok(RomSet { images })
}

/// Read a single combined image.
///
/// # Errors
///
/// Returns [`InvadersError::RomRead`] if the file cannot be read, or
/// [`InvadersError::RomTooLarge`] if it is bigger than 8K.
pub fn load_combined(path: &Path) -> Result<RomSet> {
    let bytes = read_image(path)?;
    info!(path = %path.display(), len = bytes.len(), "loaded combined ROM");
    RomSet::combined(&path.display().to_string(), bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_images_tile_the_rom_window() {
        let mut next = 0usize;
        for rom in &INVADERS_ROMS {
            assert_eq!(usize::from(rom.offset), next);
            next += 0x800;
        }
        assert_eq!(next, ROM_SIZE);
    }

    #[test]
    fn combined_image_limits() {
        assert!(RomSet::combined("ok", vec![0; ROM_SIZE]).is_ok());
        let err = RomSet::combined("big", vec![0; ROM_SIZE + 1]);
        assert!(matches!(
            err,
            Err(InvadersError::RomTooLarge {
                len: 0x2001,
                room: 0x2000,
                ..
            })
        ));
    }

    #[test]
    fn short_images_are_allowed() {
        let set = RomSet::combined("tiny", vec![0x76]).expect("fits");
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }
}
