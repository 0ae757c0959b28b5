use crate::constants::HEADER_SIZE;

/// The address-table header at the start of every container file: one
/// marker byte followed by four big-endian u32 fields locating the
/// image block and the G-code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    pub image_offset: u32,
    pub image_size: u32,
    pub stream_offset: u32,
    pub stream_size: u32,
}

impl ContainerHeader {
    pub const MARKER_SIZE: usize = 1;
    pub const FIELD_SIZE: usize = std::mem::size_of::<u32>();

    /// Builds the header for an image block of `image_size` bytes
    /// followed immediately by `stream_size` bytes of G-code.
    pub fn for_blocks(image_size: u32, stream_size: u32) -> Self {
        let image_offset = HEADER_SIZE as u32;
        Self {
            image_offset,
            image_size,
            stream_offset: image_offset + image_size,
            stream_size,
        }
    }
}
