//! CLI command handlers, one file per command.

mod checksum;
mod generate;
mod verify;

pub use checksum::run_checksum;
pub use generate::run_generate;
pub use verify::{run_verify, VerifyArgs};
