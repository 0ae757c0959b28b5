use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use super::format::ContainerHeader;
use crate::constants::{ADDRESS_TABLE_MARKER, CONTAINER_EXTENSION, HEADER_SIZE};
use crate::thumbnail::{self, PackError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read G-code source {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write container {path}: {source}")]
    ContainerWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("block of {0} bytes exceeds the format's 32-bit addressing")]
    OversizedBlock(usize),
    #[error("source {0} already carries the container extension")]
    PathCollision(PathBuf),

    #[error("thumbnail packing failed")]
    PackFailed(#[from] PackError),
}

/// Assembles a complete container in memory: 17-byte address table,
/// image block, then the G-code bytes verbatim.
pub fn encode(image_block: &[u8], gcode: &[u8]) -> Result<Vec<u8>, StoreError> {
    let image_size: u32 = image_block
        .len()
        .try_into()
        .map_err(|_| StoreError::OversizedBlock(image_block.len()))?;
    let stream_size: u32 = gcode
        .len()
        .try_into()
        .map_err(|_| StoreError::OversizedBlock(gcode.len()))?;

    let header = ContainerHeader::for_blocks(image_size, stream_size);
    debug!(
        "Container header: image {}+{}, stream {}+{}",
        header.image_offset, header.image_size, header.stream_offset, header.stream_size
    );

    let mut container = Vec::with_capacity(HEADER_SIZE + image_block.len() + gcode.len());
    container.push(ADDRESS_TABLE_MARKER);
    container.extend_from_slice(&header.image_offset.to_be_bytes());
    container.extend_from_slice(&header.image_size.to_be_bytes());
    container.extend_from_slice(&header.stream_offset.to_be_bytes());
    container.extend_from_slice(&header.stream_size.to_be_bytes());
    container.extend_from_slice(image_block);
    container.extend_from_slice(gcode);
    Ok(container)
}

/// Bundles an image block with an existing G-code file.
///
/// The container is written to a sibling path with the `fly3d`
/// extension, going through a temporary file and a rename so a failed
/// write never leaves a partial container at the final path. On
/// success the source G-code file is deleted; if that deletion fails
/// the container is kept and the failure is only logged.
pub fn store(image_block: &[u8], gcode_path: &Path) -> Result<PathBuf, StoreError> {
    let output_path = gcode_path.with_extension(CONTAINER_EXTENSION);
    if output_path == gcode_path {
        return Err(StoreError::PathCollision(gcode_path.to_path_buf()));
    }

    let gcode = fs::read(gcode_path).map_err(|source| StoreError::SourceRead {
        path: gcode_path.to_path_buf(),
        source,
    })?;
    debug!(
        "Read {} bytes of G-code from {}",
        gcode.len(),
        gcode_path.display()
    );

    let container = encode(image_block, &gcode)?;
    let tmp_path = gcode_path.with_extension(format!("{}.tmp", CONTAINER_EXTENSION));

    if let Err(source) = fs::write(&tmp_path, &container) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::ContainerWrite {
            path: output_path,
            source,
        });
    }
    if let Err(source) = fs::rename(&tmp_path, &output_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::ContainerWrite {
            path: output_path,
            source,
        });
    }

    if let Err(e) = fs::remove_file(gcode_path) {
        warn!(
            "Container written but could not remove source {}: {}",
            gcode_path.display(),
            e
        );
    }

    info!(
        "Saved {} byte container to {}",
        container.len(),
        output_path.display()
    );
    Ok(output_path)
}

/// Packs an RGBA8 thumbnail and bundles it with the G-code file at
/// `gcode_path`, returning the path of the created container.
///
/// Pure synchronous entry point; serializing concurrent writes to the
/// same path is the caller's responsibility.
pub fn build_container(
    rgba_data: &[u8],
    width: u16,
    height: u16,
    gcode_path: &Path,
) -> Result<PathBuf, StoreError> {
    let image_block = thumbnail::pack(width, height, rgba_data)?;
    store(&image_block, gcode_path)
}
