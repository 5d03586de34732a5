//! Headless capture: PNG screenshots.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use crate::Invaders;
use crate::error::{InvadersError, Result};
use crate::video::{RGBA_LEN, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Save the upright screen as a PNG file.
///
/// # Errors
///
/// Returns [`InvadersError::Screenshot`] if the file cannot be created or
/// encoded.
pub fn save_screenshot(machine: &Invaders, path: &Path) -> Result<()> {
    let mut rgba = vec![0u8; RGBA_LEN];
    machine.render_rgba(&mut rgba);

    write_png(path, &rgba).map_err(|source| InvadersError::Screenshot {
        path: path.to_path_buf(),
        source,
    })
}

fn write_png(path: &Path, rgba: &[u8]) -> std::io::Result<()> {
    let file = fs::File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), SCREEN_WIDTH, SCREEN_HEIGHT);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnimplementedPolicy;
    use crate::input::DipSwitches;

    #[test]
    fn writes_png_signature() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("shot.png");
        let machine = Invaders::blank(DipSwitches::default(), UnimplementedPolicy::Fatal);
        save_screenshot(&machine, &path).expect("screenshot written");

        let bytes = fs::read(&path).expect("read back");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("shot.png");
        let machine = Invaders::blank(DipSwitches::default(), UnimplementedPolicy::Fatal);
        let err = save_screenshot(&machine, &path);
        assert!(matches!(err, Err(InvadersError::Screenshot { .. })));
    }
}
