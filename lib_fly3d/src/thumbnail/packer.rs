use log::{debug, info};
use thiserror::Error;

use crate::constants::{BYTES_PER_PIXEL, IMAGE_BLOCK_MARKER, IMAGE_SUBHEADER_SIZE};

#[derive(Error, Debug)]
pub enum PackError {
    #[error("invalid pixel data length: expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    InvalidPixelDataLength {
        width: u16,
        height: u16,
        expected: usize,
        actual: usize,
    },
    #[error("image dimensions must be non-zero: {0}x{1}")]
    ZeroDimension(u16, u16),
}

/// Packs 8-bit RGB channels into a single RGB565 value, keeping the
/// top 5/6/5 bits of each channel.
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Composites an RGBA sample over a white background.
///
/// The truncating cast (rather than rounding) matches the firmware's
/// reference converter bit-for-bit and must not be changed.
fn blend_over_white(channel: u8, alpha: f64) -> u8 {
    (channel as f64 * alpha + 255.0 * (1.0 - alpha)) as u8
}

/// Encodes a row-major RGBA8 buffer as an image block: a 7-byte
/// sub-header (marker, big-endian width, height and a reserved zero
/// field) followed by one big-endian RGB565 value per pixel.
///
/// Alpha is composited over white before packing, so a fully
/// transparent pixel encodes as `0xFFFF`.
pub fn pack(width: u16, height: u16, rgba_data: &[u8]) -> Result<Vec<u8>, PackError> {
    if width == 0 || height == 0 {
        return Err(PackError::ZeroDimension(width, height));
    }

    let expected = width as usize * height as usize * 4;
    if rgba_data.len() != expected {
        return Err(PackError::InvalidPixelDataLength {
            width,
            height,
            expected,
            actual: rgba_data.len(),
        });
    }

    let pixel_count = width as usize * height as usize;
    let mut block = Vec::with_capacity(IMAGE_SUBHEADER_SIZE + pixel_count * BYTES_PER_PIXEL);

    // Sub-header
    block.push(IMAGE_BLOCK_MARKER);
    block.extend_from_slice(&width.to_be_bytes());
    block.extend_from_slice(&height.to_be_bytes());
    block.extend_from_slice(&0u16.to_be_bytes());
    debug!(
        "Image block sub-header written: width={} height={}",
        width, height
    );

    for pixel in rgba_data.chunks_exact(4) {
        let alpha = pixel[3] as f64 / 255.0;
        let r = blend_over_white(pixel[0], alpha);
        let g = blend_over_white(pixel[1], alpha);
        let b = blend_over_white(pixel[2], alpha);
        block.extend_from_slice(&pack_rgb565(r, g, b).to_be_bytes());
    }

    info!(
        "Packed {}x{} thumbnail into {} byte image block",
        width,
        height,
        block.len()
    );
    Ok(block)
}
