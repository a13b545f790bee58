pub mod config;
pub mod logging;

pub mod checksum;
pub mod generate;
pub mod manifest;
pub mod merge;
pub mod normalize;
pub mod verify;
