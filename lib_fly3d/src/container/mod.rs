pub mod decoder;
pub mod encoder;
pub mod format;

pub use decoder::{decode, decode_header, Container, DecodeError};
pub use encoder::{build_container, encode, store, StoreError};
pub use format::ContainerHeader;
