use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::checksum::Algorithm;
use crate::manifest::ManifestColumns;
use crate::normalize::NormalizeOptions;

/// Global configuration loaded from `~/.config/sumcheck/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SumcheckConfig {
    /// Header of the filename column in both manifests.
    pub filename_column: String,
    /// Header of the checksum column in both manifests.
    pub checksum_column: String,
    /// Field delimiter, a single ASCII character.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Reduce filenames to their last path component before comparing.
    #[serde(default)]
    pub strip_directories: bool,
    /// Lowercase checksums before joining.
    #[serde(default)]
    pub fold_checksum_case: bool,
    /// Digest used by `generate` and `checksum` when no flag is given.
    #[serde(default)]
    pub algorithm: Algorithm,
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl Default for SumcheckConfig {
    fn default() -> Self {
        Self {
            filename_column: "FILENAME".to_string(),
            checksum_column: "MD5SUM".to_string(),
            delimiter: default_delimiter(),
            strip_directories: false,
            fold_checksum_case: false,
            algorithm: Algorithm::Md5,
        }
    }
}

impl SumcheckConfig {
    pub fn columns(&self) -> ManifestColumns {
        ManifestColumns {
            filename: self.filename_column.clone(),
            checksum: self.checksum_column.clone(),
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strip_directories: self.strip_directories,
            fold_checksum_case: self.fold_checksum_case,
        }
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => bail!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sumcheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SumcheckConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SumcheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SumcheckConfig = toml::from_str(&data)?;
    cfg.delimiter_byte()?;
    Ok(cfg)
}
