//! `sumcheck generate <dir>` – write a manifest for a directory tree.

use anyhow::Result;
use std::path::Path;
use sumcheck_core::checksum::Algorithm;
use sumcheck_core::config::SumcheckConfig;
use sumcheck_core::generate::{generate_manifest, GenerateOptions};
use sumcheck_core::manifest::write_manifest;

pub fn run_generate(
    cfg: &SumcheckConfig,
    dir: &Path,
    output: &Path,
    algorithm: Algorithm,
    include_hidden: bool,
) -> Result<()> {
    let manifest = generate_manifest(
        dir,
        &GenerateOptions {
            algorithm,
            include_hidden,
            exclude: Some(output.to_path_buf()),
        },
    )?;
    write_manifest(
        output,
        &manifest.entries,
        &cfg.columns(),
        cfg.delimiter_byte()?,
    )?;
    println!(
        "Wrote {} {} checksum(s) to {}",
        manifest.len(),
        algorithm.as_str(),
        output.display()
    );
    Ok(())
}
