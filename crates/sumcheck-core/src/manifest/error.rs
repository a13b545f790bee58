//! Error type for manifest reading and writing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: missing column {column:?} in header", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("{}:{line}: empty {column:?} field", path.display())]
    EmptyField {
        path: PathBuf,
        line: u64,
        column: String,
    },

    /// A field ran across line breaks, which is what an unterminated quote
    /// looks like once the reader has consumed the rest of the file.
    #[error("{}:{line}: {column:?} field spans multiple lines (unterminated quote?)", path.display())]
    UnterminatedField {
        path: PathBuf,
        line: u64,
        column: String,
    },

    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
