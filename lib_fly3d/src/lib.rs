pub mod constants;
pub mod container;
pub mod thumbnail;

use log::*;
use std::io::Write;

pub use crate::container::{build_container, decode, store, Container, ContainerHeader};
pub use crate::thumbnail::{pack, unpack, Thumbnail};

pub fn init_logging() {
    env_logger::Builder::new()
        .filter(Some("lib_fly3d"), LevelFilter::Info)
        .filter(Some("fly3d_pack"), LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
