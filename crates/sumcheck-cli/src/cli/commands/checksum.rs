//! `sumcheck checksum <path>` – digest of a single file.

use anyhow::Result;
use std::path::Path;
use sumcheck_core::checksum::{self, Algorithm};

/// Compute and print the digest of the given file.
pub fn run_checksum(path: &Path, algorithm: Algorithm) -> Result<()> {
    let digest = checksum::digest_path(path, algorithm)?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
