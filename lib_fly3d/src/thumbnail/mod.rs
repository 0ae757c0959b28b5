pub mod packer;
pub mod unpacker;

pub use packer::{pack, pack_rgb565, PackError};
pub use unpacker::{unpack, unpack_rgb565, Thumbnail, UnpackError};
