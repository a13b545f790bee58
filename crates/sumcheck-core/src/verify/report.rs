//! Verification outcome types.

use serde::Serialize;
use std::fmt;

/// Overall result of comparing two manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    AllMatch,
    MissingOrInvalid,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::AllMatch => write!(f, "all files match and are accounted for"),
            Verdict::MissingOrInvalid => write!(f, "missing or invalid files"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Checksum listed in the reference manifest but absent from the generated one.
    MissingFromGenerated,
    /// Checksum in the generated manifest that the reference never listed.
    NotInReference,
    /// Same checksum on both sides under different filenames.
    NameMismatch,
}

impl DiscrepancyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscrepancyKind::MissingFromGenerated => "missing",
            DiscrepancyKind::NotInReference => "unexpected",
            DiscrepancyKind::NameMismatch => "renamed",
        }
    }
}

/// A joined row whose two filename columns disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    pub checksum: String,
    pub kind: DiscrepancyKind,
    pub reference: Option<String>,
    pub generated: Option<String>,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |s: &Option<String>| s.clone().unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{:<10} {}  reference={} generated={}",
            self.kind.as_str(),
            self.checksum,
            side(&self.reference),
            side(&self.generated)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub reference_rows: usize,
    pub generated_rows: usize,
    pub joined_rows: usize,
    pub discrepancies: Vec<Discrepancy>,
}

impl VerificationReport {
    pub fn verdict(&self) -> Verdict {
        if self.discrepancies.is_empty() {
            Verdict::AllMatch
        } else {
            Verdict::MissingOrInvalid
        }
    }

    pub fn count(&self, kind: DiscrepancyKind) -> usize {
        self.discrepancies.iter().filter(|d| d.kind == kind).count()
    }

    /// JSON document with the counts, the verdict and every discrepancy.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Doc<'a> {
            verdict: Verdict,
            message: String,
            #[serde(flatten)]
            report: &'a VerificationReport,
        }
        let verdict = self.verdict();
        serde_json::to_string_pretty(&Doc {
            verdict,
            message: verdict.to_string(),
            report: self,
        })
    }
}
