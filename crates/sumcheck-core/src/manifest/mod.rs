//! Checksum manifests: CSV files with a header row holding (at least) a
//! filename column and a checksum column.
//!
//! Columns are located by header name, so column order and any extra
//! columns in the file do not matter.

mod error;
mod read;
mod write;

use std::path::PathBuf;

pub use error::ManifestError;
pub use read::{read_manifest, read_manifest_from_reader};
pub use write::{write_manifest, write_manifest_to_writer};

/// Header names looked up in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestColumns {
    pub filename: String,
    pub checksum: String,
}

impl Default for ManifestColumns {
    fn default() -> Self {
        Self {
            filename: "FILENAME".to_string(),
            checksum: "MD5SUM".to_string(),
        }
    }
}

/// One manifest row. `filename` is kept exactly as found in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub filename: String,
    pub checksum: String,
}

#[derive(Debug, Clone)]
pub struct Manifest {
    /// Where the manifest was read from (or will be written to).
    pub source: PathBuf,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
