//! Build a manifest by hashing every file under a directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::checksum::{digest_path, Algorithm};
use crate::manifest::{Manifest, ManifestEntry};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub algorithm: Algorithm,
    /// Include files and directories whose name starts with `.`.
    pub include_hidden: bool,
    /// File never listed, normally the manifest being written. It may not exist yet.
    pub exclude: Option<PathBuf>,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// `path` relative to `root`, with `/` separators.
fn manifest_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .with_context(|| format!("{} is not under {}", path.display(), root.display()))?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let name = parts.join("/");
    if rel.to_str().is_none() {
        tracing::warn!(
            path = %path.display(),
            listed_as = %name,
            "file name is not valid UTF-8; listed with replacement characters"
        );
    }
    Ok(name)
}

/// Hash every regular file below `root` (sorted by name, symlinks not
/// followed) and return the entries as a manifest.
pub fn generate_manifest(root: &Path, opts: &GenerateOptions) -> Result<Manifest> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    let excluded = opts.exclude.as_deref().and_then(|p| p.canonicalize().ok());
    let is_excluded = |e: &DirEntry| match &excluded {
        Some(target) => {
            e.file_type().is_file()
                && Some(e.file_name()) == target.file_name()
                && e.path().canonicalize().ok().as_ref() == Some(target)
        }
        None => false,
    };

    let mut entries = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| (opts.include_hidden || !is_hidden(e)) && !is_excluded(e));

    for entry in walker {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let checksum = digest_path(entry.path(), opts.algorithm)?;
        let filename = manifest_name(root, entry.path())?;
        tracing::debug!(file = %filename, %checksum, "hashed");
        entries.push(ManifestEntry { filename, checksum });
    }

    tracing::info!(
        root = %root.display(),
        files = entries.len(),
        algorithm = opts.algorithm.as_str(),
        "generated manifest"
    );

    Ok(Manifest {
        source: PathBuf::from(root),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn hashes_nested_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), b"hello\n").unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        fs::write(dir.path().join("sub").join("c.bin"), b"hello\n").unwrap();

        let m = generate_manifest(dir.path(), &GenerateOptions::default()).unwrap();
        let names: Vec<&str> = m.entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub/c.bin"]);
        assert_eq!(m.entries[0].checksum, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(m.entries[1].checksum, "b1946ac92492d2347c6235b4d2611184");
        assert_eq!(m.entries[2].checksum, m.entries[1].checksum);
    }

    #[test]
    fn hidden_entries_skipped_by_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".secret"), b"x").unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join(".cache").join("f"), b"x").unwrap();
        fs::write(dir.path().join("visible"), b"x").unwrap();

        let m = generate_manifest(dir.path(), &GenerateOptions::default()).unwrap();
        assert_eq!(m.len(), 1);

        let all = generate_manifest(
            dir.path(),
            &GenerateOptions {
                include_hidden: true,
                ..GenerateOptions::default()
            },
        )
        .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn rerun_into_scanned_dir_skips_own_output() {
        use crate::manifest::{write_manifest, ManifestColumns};

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.dat"), b"hello\n").unwrap();
        let out = dir.path().join("generated_md5_checksums.csv");
        let opts = GenerateOptions {
            exclude: Some(out.clone()),
            ..GenerateOptions::default()
        };

        for _ in 0..2 {
            let m = generate_manifest(dir.path(), &opts).unwrap();
            let names: Vec<&str> = m.entries.iter().map(|e| e.filename.as_str()).collect();
            assert_eq!(names, vec!["a.dat"]);
            write_manifest(&out, &m.entries, &ManifestColumns::default(), b',').unwrap();
        }
    }

    #[test]
    fn exclude_only_matches_that_exact_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("out.csv"), b"x").unwrap();
        fs::write(dir.path().join("sub").join("out.csv"), b"x").unwrap();

        let m = generate_manifest(
            dir.path(),
            &GenerateOptions {
                exclude: Some(dir.path().join("out.csv")),
                ..GenerateOptions::default()
            },
        )
        .unwrap();
        let names: Vec<&str> = m.entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["sub/out.csv"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_still_listed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"bad\xffname.dat");
        // Some filesystems refuse non-UTF-8 names outright.
        if fs::write(dir.path().join(raw), b"").is_err() {
            return;
        }
        let m = generate_manifest(dir.path(), &GenerateOptions::default()).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.entries[0].filename, "bad\u{fffd}name.dat");
    }

    #[test]
    fn not_a_directory_is_error() {
        let f = tempfile::NamedTempFile::new().unwrap();
        assert!(generate_manifest(f.path(), &GenerateOptions::default()).is_err());
    }
}
