use log::{debug, error, info};
use thiserror::Error;

use super::format::ContainerHeader;
use crate::constants::{ADDRESS_TABLE_MARKER, HEADER_SIZE};
use crate::thumbnail::{self, Thumbnail, UnpackError};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("container too short for address table: {0} bytes")]
    TruncatedHeader(usize),
    #[error("invalid header block marker: expected 1, got {0}")]
    InvalidMarker(u8),
    #[error("header field {field} is inconsistent: {value}")]
    InconsistentHeader { field: &'static str, value: u32 },
    #[error("block [{offset}, {offset}+{size}) lies outside the {len} byte container")]
    BlockOutOfBounds { offset: u32, size: u32, len: usize },

    #[error("image block decoding failed")]
    UnpackFailed(#[from] UnpackError),
}

/// A fully decoded container: the address table, the thumbnail and
/// the G-code program it carried.
#[derive(Debug)]
pub struct Container {
    pub header: ContainerHeader,
    pub thumbnail: Thumbnail,
    pub gcode: Vec<u8>,
}

fn read_u32_be(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn block(data: &[u8], offset: u32, size: u32) -> Result<&[u8], DecodeError> {
    let start = offset as usize;
    let end = start
        .checked_add(size as usize)
        .filter(|&end| end <= data.len())
        .ok_or(DecodeError::BlockOutOfBounds {
            offset,
            size,
            len: data.len(),
        })?;
    Ok(&data[start..end])
}

/// Parses and validates the 17-byte address table at the start of a
/// container.
pub fn decode_header(data: &[u8]) -> Result<ContainerHeader, DecodeError> {
    if data.len() < HEADER_SIZE {
        error!("Container too short: {} bytes", data.len());
        return Err(DecodeError::TruncatedHeader(data.len()));
    }
    if data[0] != ADDRESS_TABLE_MARKER {
        error!("Invalid header block marker: {}", data[0]);
        return Err(DecodeError::InvalidMarker(data[0]));
    }

    let mut cursor = ContainerHeader::MARKER_SIZE;
    let mut next_field = || {
        let value = read_u32_be(data, cursor);
        cursor += ContainerHeader::FIELD_SIZE;
        value
    };
    let header = ContainerHeader {
        image_offset: next_field(),
        image_size: next_field(),
        stream_offset: next_field(),
        stream_size: next_field(),
    };
    debug!(
        "Address table: image {}+{}, stream {}+{}",
        header.image_offset, header.image_size, header.stream_offset, header.stream_size
    );

    if header.image_offset != HEADER_SIZE as u32 {
        return Err(DecodeError::InconsistentHeader {
            field: "image offset",
            value: header.image_offset,
        });
    }
    if header.image_offset.checked_add(header.image_size) != Some(header.stream_offset) {
        return Err(DecodeError::InconsistentHeader {
            field: "stream offset",
            value: header.stream_offset,
        });
    }

    Ok(header)
}

/// Decodes a complete container, recovering the thumbnail and the
/// embedded G-code bytes.
pub fn decode(data: &[u8]) -> Result<Container, DecodeError> {
    let header = decode_header(data)?;

    let image_block = block(data, header.image_offset, header.image_size)?;
    let gcode = block(data, header.stream_offset, header.stream_size)?;

    let thumbnail = thumbnail::unpack(image_block)?;
    info!(
        "Decoded container: {}x{} thumbnail, {} bytes of G-code",
        thumbnail.width,
        thumbnail.height,
        gcode.len()
    );

    Ok(Container {
        header,
        thumbnail,
        gcode: gcode.to_vec(),
    })
}
