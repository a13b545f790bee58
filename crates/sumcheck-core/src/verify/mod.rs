//! Manifest verification: normalize both manifests, outer-join them on
//! checksum and collect every row whose filenames disagree.

mod report;

use anyhow::{Context, Result};
use std::path::Path;

use crate::manifest::{read_manifest, ManifestColumns};
use crate::merge::outer_join;
use crate::normalize::{NormalizeOptions, NormalizedTable};

pub use report::{Discrepancy, DiscrepancyKind, VerificationReport, Verdict};

/// Inputs for [`verify_manifests`] beyond the two paths.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub columns: ManifestColumns,
    pub delimiter: u8,
    pub normalize: NormalizeOptions,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            columns: ManifestColumns::default(),
            delimiter: b',',
            normalize: NormalizeOptions::default(),
        }
    }
}

/// Compare two normalized tables. The verdict is `AllMatch` iff no joined
/// row has disagreeing filenames.
pub fn verify_tables(
    reference: &NormalizedTable,
    generated: &NormalizedTable,
) -> VerificationReport {
    let joined = outer_join(reference, generated);
    let joined_rows = joined.len();

    let discrepancies = joined
        .into_iter()
        .filter(|row| !row.agrees())
        .map(|row| {
            let kind = match (&row.left, &row.right) {
                (Some(_), None) => DiscrepancyKind::MissingFromGenerated,
                (None, Some(_)) => DiscrepancyKind::NotInReference,
                _ => DiscrepancyKind::NameMismatch,
            };
            Discrepancy {
                checksum: row.checksum,
                kind,
                reference: row.left,
                generated: row.right,
            }
        })
        .collect();

    VerificationReport {
        reference_rows: reference.len(),
        generated_rows: generated.len(),
        joined_rows,
        discrepancies,
    }
}

/// Read both manifests from disk and verify them.
pub fn verify_manifests(
    reference_path: &Path,
    generated_path: &Path,
    opts: &VerifyOptions,
) -> Result<VerificationReport> {
    let reference = read_manifest(reference_path, &opts.columns, opts.delimiter)
        .context("reading reference manifest")?;
    let generated = read_manifest(generated_path, &opts.columns, opts.delimiter)
        .context("reading generated manifest")?;

    let report = verify_tables(
        &NormalizedTable::from_manifest(&reference, &opts.normalize),
        &NormalizedTable::from_manifest(&generated, &opts.normalize),
    );

    tracing::info!(
        reference = %reference_path.display(),
        generated = %generated_path.display(),
        reference_rows = report.reference_rows,
        generated_rows = report.generated_rows,
        joined_rows = report.joined_rows,
        discrepancies = report.discrepancies.len(),
        verdict = ?report.verdict(),
        "verified manifests"
    );
    for d in &report.discrepancies {
        tracing::debug!("{}", d);
    }

    Ok(report)
}
