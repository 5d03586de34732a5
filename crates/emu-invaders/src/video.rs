//! Video RAM layout and rasterisation.
//!
//! The frame buffer is 7K of 1-bit pixels at 0x2400. Each raw row is 32
//! bytes (256 pixels, least significant bit first) and there are 224 raw
//! rows. The monitor is mounted rotated 90 degrees counter-clockwise, so
//! raw row `y` becomes screen column `y` and raw pixel `x` becomes screen
//! row `255 - x`.

/// First byte of video RAM.
pub const VRAM_START: u16 = 0x2400;

/// Bytes of video RAM.
pub const VRAM_LEN: usize = 0x1C00;

/// Raw (unrotated) geometry.
pub const RAW_WIDTH: usize = 256;
pub const RAW_HEIGHT: usize = 224;

/// Upright screen geometry as seen in the cabinet.
pub const SCREEN_WIDTH: u32 = 224;
pub const SCREEN_HEIGHT: u32 = 256;

/// Bytes of one upright RGBA frame.
pub const RGBA_LEN: usize = SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize * 4;

const LIT: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
const UNLIT: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// Whether raw pixel (`x`, `y`) is lit.
#[must_use]
pub fn raw_pixel(vram: &[u8; VRAM_LEN], x: usize, y: usize) -> bool {
    let byte = vram[y * (RAW_WIDTH / 8) + x / 8];
    byte & (1 << (x % 8)) != 0
}

/// Rasterise a VRAM snapshot into an upright RGBA image.
///
/// `frame` must be at least [`RGBA_LEN`] bytes; extra bytes are left alone.
pub fn render_rgba(vram: &[u8; VRAM_LEN], frame: &mut [u8]) {
    let width = SCREEN_WIDTH as usize;
    for y in 0..RAW_HEIGHT {
        for x in 0..RAW_WIDTH {
            let colour = if raw_pixel(vram, x, y) { LIT } else { UNLIT };
            let row = RAW_WIDTH - 1 - x;
            let offset = (row * width + y) * 4;
            if let Some(pixel) = frame.get_mut(offset..offset + 4) {
                pixel.copy_from_slice(&colour);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &[u8], col: usize, row: usize) -> &[u8] {
        let offset = (row * SCREEN_WIDTH as usize + col) * 4;
        &frame[offset..offset + 4]
    }

    #[test]
    fn geometry_matches_vram_size() {
        assert_eq!(RAW_WIDTH * RAW_HEIGHT / 8, VRAM_LEN);
    }

    #[test]
    fn first_bit_lands_bottom_left() {
        let mut vram = [0u8; VRAM_LEN];
        vram[0] = 0x01;
        let mut frame = vec![0u8; RGBA_LEN];
        render_rgba(&vram, &mut frame);
        assert_eq!(pixel(&frame, 0, 255), &LIT);
        assert_eq!(pixel(&frame, 0, 254), &UNLIT);
        assert_eq!(pixel(&frame, 1, 255), &UNLIT);
    }

    #[test]
    fn last_bit_lands_top_right() {
        let mut vram = [0u8; VRAM_LEN];
        vram[VRAM_LEN - 1] = 0x80;
        let mut frame = vec![0u8; RGBA_LEN];
        render_rgba(&vram, &mut frame);
        assert_eq!(pixel(&frame, 223, 0), &LIT);
    }

    #[test]
    fn raw_pixels_are_lsb_first() {
        let mut vram = [0u8; VRAM_LEN];
        vram[33] = 0x04;
        assert!(raw_pixel(&vram, 10, 1));
        assert!(!raw_pixel(&vram, 9, 1));
    }
}
