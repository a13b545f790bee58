use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

use super::{ManifestColumns, ManifestEntry, ManifestError};

/// Write `entries` to `path` as a manifest with a header row.
pub fn write_manifest(
    path: &Path,
    entries: &[ManifestEntry],
    columns: &ManifestColumns,
    delimiter: u8,
) -> Result<(), ManifestError> {
    let file = std::fs::File::create(path).map_err(|source| ManifestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_manifest_to_writer(file, path, entries, columns, delimiter)?;
    tracing::info!(path = %path.display(), rows = entries.len(), "wrote manifest");
    Ok(())
}

pub fn write_manifest_to_writer<W: Write>(
    writer: W,
    dest: &Path,
    entries: &[ManifestEntry],
    columns: &ManifestColumns,
    delimiter: u8,
) -> Result<(), ManifestError> {
    let write_err = |e: csv::Error| ManifestError::Write {
        path: dest.to_path_buf(),
        source: e,
    };

    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    wtr.write_record([columns.filename.as_str(), columns.checksum.as_str()])
        .map_err(write_err)?;
    for entry in entries {
        wtr.write_record([entry.filename.as_str(), entry.checksum.as_str()])
            .map_err(write_err)?;
    }
    wtr.flush()
        .map_err(|e| write_err(csv::Error::from(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::read_manifest;

    #[test]
    fn header_then_rows() {
        let entries = vec![
            ManifestEntry {
                filename: "a.txt".to_string(),
                checksum: "111".to_string(),
            },
            ManifestEntry {
                filename: "dir/b, c.txt".to_string(),
                checksum: "222".to_string(),
            },
        ];
        let mut out = Vec::new();
        write_manifest_to_writer(
            &mut out,
            Path::new("out.csv"),
            &entries,
            &ManifestColumns::default(),
            b',',
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "FILENAME,MD5SUM\na.txt,111\n\"dir/b, c.txt\",222\n");
    }

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.csv");
        let entries = vec![ManifestEntry {
            filename: "x.bin".to_string(),
            checksum: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        }];
        write_manifest(&path, &entries, &ManifestColumns::default(), b',').unwrap();
        let m = read_manifest(&path, &ManifestColumns::default(), b',').unwrap();
        assert_eq!(m.entries, entries);
    }
}
