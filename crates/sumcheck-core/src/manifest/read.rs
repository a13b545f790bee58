use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Manifest, ManifestColumns, ManifestEntry, ManifestError};

/// Read the manifest at `path`.
pub fn read_manifest(
    path: &Path,
    columns: &ManifestColumns,
    delimiter: u8,
) -> Result<Manifest, ManifestError> {
    let file = File::open(path).map_err(|source| ManifestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest = read_manifest_from_reader(file, path, columns, delimiter)?;
    tracing::debug!(
        path = %path.display(),
        rows = manifest.len(),
        "read manifest"
    );
    Ok(manifest)
}

/// Read a manifest from any reader; `source` labels errors and the result.
pub fn read_manifest_from_reader<R: Read>(
    reader: R,
    source: &Path,
    columns: &ManifestColumns,
    delimiter: u8,
) -> Result<Manifest, ManifestError> {
    let csv_err = |e: csv::Error| ManifestError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let filename_idx = column_index(&headers, &columns.filename, source)?;
    let checksum_idx = column_index(&headers, &columns.checksum, source)?;

    let mut entries = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Filenames may legitimately end in CR/LF; nothing else may span lines.
        let raw_filename = record.get(filename_idx).unwrap_or("");
        if spans_lines(raw_filename.trim_end_matches(&['\r', '\n'][..])) {
            return Err(unterminated(source, line, &columns.filename));
        }
        let filename = field(&record, filename_idx, &columns.filename, line, source)?;
        let checksum = field(&record, checksum_idx, &columns.checksum, line, source)?;
        if spans_lines(checksum.trim()) {
            return Err(unterminated(source, line, &columns.checksum));
        }
        entries.push(ManifestEntry {
            filename: filename.to_string(),
            checksum: checksum.trim().to_string(),
        });
    }

    Ok(Manifest {
        source: source.to_path_buf(),
        entries,
    })
}

fn column_index(
    headers: &StringRecord,
    column: &str,
    source: &Path,
) -> Result<usize, ManifestError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| ManifestError::MissingColumn {
            path: source.to_path_buf(),
            column: column.to_string(),
        })
}

fn spans_lines(value: &str) -> bool {
    value.contains(&['\r', '\n'][..])
}

fn unterminated(source: &Path, line: u64, column: &str) -> ManifestError {
    ManifestError::UnterminatedField {
        path: source.to_path_buf(),
        line,
        column: column.to_string(),
    }
}

fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    column: &str,
    line: u64,
    source: &Path,
) -> Result<&'r str, ManifestError> {
    match record.get(idx) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ManifestError::EmptyField {
            path: source.to_path_buf(),
            line,
            column: column.to_string(),
        }),
    }
}
