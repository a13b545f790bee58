//! Filename and checksum normalization applied before joining manifests.

use crate::manifest::Manifest;

/// Options for turning a manifest into a [`NormalizedTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Keep only the last `/` or `\` separated component of each filename.
    pub strip_directories: bool,
    /// Lowercase checksums so hex digests in either case join.
    pub fold_checksum_case: bool,
}

/// Reduce a manifest filename to the name used for comparison.
///
/// Everything from the first `.` on is dropped (so `a.tar.gz` becomes `a`
/// and `.hidden` becomes the empty string), then trailing `\r` / `\n` are
/// stripped.
pub fn normalize_filename(raw: &str, strip_directories: bool) -> String {
    let name = if strip_directories {
        raw.rsplit(&['/', '\\'][..]).next().unwrap_or(raw)
    } else {
        raw
    };
    let stem = name.split('.').next().unwrap_or(name);
    stem.trim_end_matches(&['\r', '\n'][..]).to_string()
}

/// One (checksum, normalized filename) row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub checksum: String,
    pub filename: String,
}

/// Two-column table built from a manifest, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTable {
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    pub fn from_manifest(manifest: &Manifest, opts: &NormalizeOptions) -> Self {
        let rows = manifest
            .entries
            .iter()
            .map(|e| NormalizedRow {
                checksum: if opts.fold_checksum_case {
                    e.checksum.to_lowercase()
                } else {
                    e.checksum.clone()
                },
                filename: normalize_filename(&e.filename, opts.strip_directories),
            })
            .collect();
        Self { rows }
    }

    /// Build a table directly from `(checksum, filename)` pairs; filenames are
    /// normalized with default options.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rows = pairs
            .into_iter()
            .map(|(checksum, filename)| NormalizedRow {
                checksum: checksum.to_string(),
                filename: normalize_filename(filename, false),
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestEntry;
    use std::path::PathBuf;

    #[test]
    fn strips_extension() {
        assert_eq!(normalize_filename("scan_001.dcm", false), "scan_001");
    }

    #[test]
    fn keeps_text_before_first_dot() {
        assert_eq!(normalize_filename("archive.tar.gz", false), "archive");
        assert_eq!(normalize_filename(".hidden", false), "");
        assert_eq!(normalize_filename("noext", false), "noext");
    }

    #[test]
    fn strips_trailing_line_endings() {
        assert_eq!(normalize_filename("report\r\n", false), "report");
        assert_eq!(normalize_filename("report\n\r\n", false), "report");
    }

    #[test]
    fn directories_kept_unless_stripped() {
        assert_eq!(normalize_filename("batch1/img.png", false), "batch1/img");
        assert_eq!(normalize_filename("batch1/img.png", true), "img");
        assert_eq!(normalize_filename("C:\\data\\img.png", true), "img");
    }

    #[test]
    fn relative_dot_prefix_collapses_without_strip() {
        assert_eq!(normalize_filename("./img.png", false), "");
        assert_eq!(normalize_filename("./img.png", true), "img");
    }

    #[test]
    fn table_from_manifest_folds_case_on_request() {
        let manifest = Manifest {
            source: PathBuf::from("m.csv"),
            entries: vec![ManifestEntry {
                filename: "A.txt".to_string(),
                checksum: "ABCDEF".to_string(),
            }],
        };
        let plain = NormalizedTable::from_manifest(&manifest, &NormalizeOptions::default());
        assert_eq!(plain.rows[0].checksum, "ABCDEF");
        assert_eq!(plain.rows[0].filename, "A");

        let folded = NormalizedTable::from_manifest(
            &manifest,
            &NormalizeOptions {
                fold_checksum_case: true,
                ..NormalizeOptions::default()
            },
        );
        assert_eq!(folded.rows[0].checksum, "abcdef");
    }
}
