use log::{debug, error};
use thiserror::Error;

use crate::constants::{BYTES_PER_PIXEL, IMAGE_BLOCK_MARKER, IMAGE_SUBHEADER_SIZE};

#[derive(Error, Debug)]
pub enum UnpackError {
    #[error("image block too short for sub-header: {0} bytes")]
    TruncatedSubHeader(usize),
    #[error("invalid image block marker: expected 2, got {0}")]
    InvalidMarker(u8),
    #[error("pixel payload length mismatch: expected {expected} bytes for {width}x{height}, got {actual}")]
    PixelPayloadMismatch {
        width: u16,
        height: u16,
        expected: usize,
        actual: usize,
    },
}

/// A thumbnail decoded from an image block.
///
/// Packing composites over white, so alpha is unrecoverable; pixels
/// come back as RGB8, row-major.
#[derive(Debug)]
pub struct Thumbnail {
    pub width: u16,
    pub height: u16,
    pub rgb_data: Vec<u8>,
}

/// Expands a packed RGB565 value to RGB8, shifting each field to the
/// top bits of its byte.
pub fn unpack_rgb565(packed: u16) -> (u8, u8, u8) {
    let r = ((packed >> 11) & 0x1F) as u8;
    let g = ((packed >> 5) & 0x3F) as u8;
    let b = (packed & 0x1F) as u8;
    (r << 3, g << 2, b << 3)
}

/// Decodes an image block produced by [`pack`](crate::thumbnail::pack)
/// back into dimensions and RGB8 pixel data.
pub fn unpack(block: &[u8]) -> Result<Thumbnail, UnpackError> {
    if block.len() < IMAGE_SUBHEADER_SIZE {
        error!("Image block too short: {} bytes", block.len());
        return Err(UnpackError::TruncatedSubHeader(block.len()));
    }
    if block[0] != IMAGE_BLOCK_MARKER {
        error!("Invalid image block marker: {}", block[0]);
        return Err(UnpackError::InvalidMarker(block[0]));
    }

    let width = u16::from_be_bytes([block[1], block[2]]);
    let height = u16::from_be_bytes([block[3], block[4]]);
    // block[5..7] is the reserved field
    debug!("Image block dimensions: width={} height={}", width, height);

    let payload = &block[IMAGE_SUBHEADER_SIZE..];
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if payload.len() != expected {
        error!(
            "Pixel payload length mismatch: expected {} got {}",
            expected,
            payload.len()
        );
        return Err(UnpackError::PixelPayloadMismatch {
            width,
            height,
            expected,
            actual: payload.len(),
        });
    }

    let mut rgb_data = Vec::with_capacity(width as usize * height as usize * 3);
    for pair in payload.chunks_exact(BYTES_PER_PIXEL) {
        let (r, g, b) = unpack_rgb565(u16::from_be_bytes([pair[0], pair[1]]));
        rgb_data.extend_from_slice(&[r, g, b]);
    }

    Ok(Thumbnail {
        width,
        height,
        rgb_data,
    })
}
