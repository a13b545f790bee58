//! `sumcheck verify <reference> <generated>` – compare two manifests.

use anyhow::Result;
use std::path::PathBuf;
use sumcheck_core::config::SumcheckConfig;
use sumcheck_core::verify::{verify_manifests, Verdict, VerifyOptions};

use crate::cli::{OutputFormat, EXIT_MISMATCH};

#[derive(Debug, Clone)]
pub struct VerifyArgs {
    pub reference: PathBuf,
    pub generated: PathBuf,
    pub details: bool,
    pub format: OutputFormat,
    pub filename_column: Option<String>,
    pub checksum_column: Option<String>,
    pub strip_directories: bool,
    pub fold_case: bool,
}

/// Merge config defaults with per-invocation flags.
pub(crate) fn verify_options(cfg: &SumcheckConfig, args: &VerifyArgs) -> Result<VerifyOptions> {
    let mut columns = cfg.columns();
    if let Some(name) = &args.filename_column {
        columns.filename = name.clone();
    }
    if let Some(name) = &args.checksum_column {
        columns.checksum = name.clone();
    }
    let mut normalize = cfg.normalize_options();
    normalize.strip_directories |= args.strip_directories;
    normalize.fold_checksum_case |= args.fold_case;

    Ok(VerifyOptions {
        columns,
        delimiter: cfg.delimiter_byte()?,
        normalize,
    })
}

pub fn run_verify(cfg: &SumcheckConfig, args: &VerifyArgs) -> Result<i32> {
    let opts = verify_options(cfg, args)?;
    let report = verify_manifests(&args.reference, &args.generated, &opts)?;

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => {
            println!("{}", report.verdict());
            if args.details {
                for d in &report.discrepancies {
                    println!("  {d}");
                }
            }
        }
    }

    Ok(match report.verdict() {
        Verdict::AllMatch => 0,
        Verdict::MissingOrInvalid => EXIT_MISMATCH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> VerifyArgs {
        VerifyArgs {
            reference: PathBuf::from("ref.csv"),
            generated: PathBuf::from("gen.csv"),
            details: false,
            format: OutputFormat::Text,
            filename_column: None,
            checksum_column: None,
            strip_directories: false,
            fold_case: false,
        }
    }

    #[test]
    fn config_defaults_used_without_flags() {
        let opts = verify_options(&SumcheckConfig::default(), &args()).unwrap();
        assert_eq!(opts.columns.filename, "FILENAME");
        assert_eq!(opts.columns.checksum, "MD5SUM");
        assert_eq!(opts.delimiter, b',');
        assert!(!opts.normalize.strip_directories);
    }

    #[test]
    fn flags_override_config() {
        let a = VerifyArgs {
            checksum_column: Some("SHA256".to_string()),
            strip_directories: true,
            fold_case: true,
            ..args()
        };
        let opts = verify_options(&SumcheckConfig::default(), &a).unwrap();
        assert_eq!(opts.columns.checksum, "SHA256");
        assert_eq!(opts.columns.filename, "FILENAME");
        assert!(opts.normalize.strip_directories);
        assert!(opts.normalize.fold_checksum_case);
    }

    #[test]
    fn mismatch_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("ref.csv");
        let generated = dir.path().join("gen.csv");
        std::fs::write(&reference, "FILENAME,MD5SUM\na.txt,11\nb.txt,22\n").unwrap();
        std::fs::write(&generated, "FILENAME,MD5SUM\na.dat,11\n").unwrap();

        let a = VerifyArgs {
            reference: reference.clone(),
            generated: generated.clone(),
            ..args()
        };
        assert_eq!(
            run_verify(&SumcheckConfig::default(), &a).unwrap(),
            EXIT_MISMATCH
        );

        std::fs::write(&generated, "FILENAME,MD5SUM\nb.bin,22\na.dat,11\n").unwrap();
        assert_eq!(run_verify(&SumcheckConfig::default(), &a).unwrap(), 0);
    }
}
