use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::RgbImage;
use log::{debug, info};
use thiserror::Error;

use lib_fly3d::constants::{THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use lib_fly3d::container::{self, DecodeError, StoreError};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("thumbnail image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("could not build container: {0}")]
    Store(#[from] StoreError),

    #[error("could not read container: {0}")]
    Decode(#[from] DecodeError),

    #[error("decoded thumbnail has inconsistent dimensions")]
    MalformedThumbnail,
}

/// Packs a G-code file and a thumbnail image into a container at the
/// sibling `.fly3d` path. The source G-code file is removed once the
/// container is written.
pub fn pack(gcode: &Path, thumbnail: &Path) -> Result<PathBuf, CommandError> {
    let img = image::open(thumbnail)?;
    debug!(
        "Loaded thumbnail source {} ({}x{})",
        thumbnail.display(),
        img.width(),
        img.height()
    );

    let resized = img
        .resize_exact(
            THUMBNAIL_WIDTH as u32,
            THUMBNAIL_HEIGHT as u32,
            FilterType::Lanczos3,
        )
        .to_rgba8();

    let output =
        container::build_container(resized.as_raw(), THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, gcode)?;
    Ok(output)
}

/// Prints the address table and thumbnail dimensions of a container.
pub fn info(file: &Path) -> Result<(), CommandError> {
    let data = fs::read(file)?;
    let container = container::decode(&data)?;

    println!("{}", file.display());
    println!(
        "  image block:  offset {:>8}  size {:>8}  ({}x{} RGB565)",
        container.header.image_offset,
        container.header.image_size,
        container.thumbnail.width,
        container.thumbnail.height
    );
    println!(
        "  gcode block:  offset {:>8}  size {:>8}",
        container.header.stream_offset, container.header.stream_size
    );
    Ok(())
}

/// Extracts the thumbnail (as PNG) and/or the G-code program from a
/// container.
pub fn extract(
    file: &Path,
    thumbnail_out: Option<&Path>,
    gcode_out: Option<&Path>,
) -> Result<(), CommandError> {
    let data = fs::read(file)?;
    let container = container::decode(&data)?;

    if let Some(path) = thumbnail_out {
        let thumbnail = RgbImage::from_raw(
            container.thumbnail.width as u32,
            container.thumbnail.height as u32,
            container.thumbnail.rgb_data,
        )
        .ok_or(CommandError::MalformedThumbnail)?;
        thumbnail.save(path)?;
        info!("Extracted thumbnail to {}", path.display());
    }

    if let Some(path) = gcode_out {
        fs::write(path, &container.gcode)?;
        info!(
            "Extracted {} bytes of G-code to {}",
            container.gcode.len(),
            path.display()
        );
    }

    Ok(())
}
