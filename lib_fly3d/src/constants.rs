/// Block marker for the address-table header block.
pub const ADDRESS_TABLE_MARKER: u8 = 1;
/// Block marker for the thumbnail image block.
pub const IMAGE_BLOCK_MARKER: u8 = 2;

/// Fixed length of the address-table header: marker byte plus four
/// big-endian u32 offset/size fields.
pub const HEADER_SIZE: usize = 17;

/// Length of the image block sub-header: marker byte, width, height,
/// reserved field (u16 each, big-endian).
pub const IMAGE_SUBHEADER_SIZE: usize = 7;

/// Bytes per packed RGB565 pixel.
pub const BYTES_PER_PIXEL: usize = 2;

/// Thumbnail dimensions used by the printer firmware.
pub const THUMBNAIL_WIDTH: u16 = 240;
pub const THUMBNAIL_HEIGHT: u16 = 240;

/// File extension of the container format.
pub const CONTAINER_EXTENSION: &str = "fly3d";
