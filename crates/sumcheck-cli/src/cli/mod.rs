//! CLI for sumcheck.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;
use sumcheck_core::checksum::Algorithm;
use sumcheck_core::config;

use commands::{run_checksum, run_generate, run_verify, VerifyArgs};

/// Exit status on any error, including a bad invocation.
pub const EXIT_ERROR: i32 = 1;
/// Exit status when the manifests disagree.
pub const EXIT_MISMATCH: i32 = 2;

/// Top-level CLI for sumcheck.
#[derive(Debug, Parser)]
#[command(name = "sumcheck")]
#[command(about = "sumcheck: verify files against checksum manifests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Md5,
    Sha256,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(a: AlgorithmArg) -> Self {
        match a {
            AlgorithmArg::Md5 => Algorithm::Md5,
            AlgorithmArg::Sha256 => Algorithm::Sha256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check that every file in the reference manifest appears in the generated one with the same checksum.
    Verify {
        /// Manifest shipped with the data (e.g. by the provider).
        reference: PathBuf,
        /// Manifest computed locally (see `sumcheck generate`).
        generated: PathBuf,
        /// List every discrepancy after the verdict line.
        #[arg(long)]
        details: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Header of the filename column (overrides config).
        #[arg(long, value_name = "NAME")]
        filename_column: Option<String>,
        /// Header of the checksum column (overrides config).
        #[arg(long, value_name = "NAME")]
        checksum_column: Option<String>,
        /// Compare only the last path component of each filename.
        #[arg(long)]
        strip_directories: bool,
        /// Compare checksums case-insensitively.
        #[arg(long)]
        fold_case: bool,
    },

    /// Hash every file under a directory and write a manifest.
    Generate {
        /// Directory to scan.
        dir: PathBuf,
        /// Output manifest path.
        #[arg(long, short, default_value = "generated_md5_checksums.csv")]
        output: PathBuf,
        /// Digest algorithm (defaults to the configured one).
        #[arg(long, value_enum)]
        algorithm: Option<AlgorithmArg>,
        /// Include dotfiles and dot-directories.
        #[arg(long)]
        include_hidden: bool,
    },

    /// Compute the checksum of a single file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
        /// Digest algorithm (defaults to the configured one).
        #[arg(long, value_enum)]
        algorithm: Option<AlgorithmArg>,
    },
}

impl Cli {
    /// Parse `args`, printing clap's message on failure.
    ///
    /// `Err` carries the exit status: 0 for `--help`/`--version`, [`EXIT_ERROR`]
    /// for usage errors, so a bad invocation is never mistaken for a mismatch.
    pub fn parse_or_status<I, T>(args: I) -> Result<Cli, i32>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map_err(|e| {
            let _ = e.print();
            if e.use_stderr() {
                EXIT_ERROR
            } else {
                0
            }
        })
    }
}

impl CliCommand {
    /// Parse arguments, run the command and return the process exit status.
    pub fn run_from_args() -> Result<i32> {
        let cli = match Cli::parse_or_status(std::env::args_os()) {
            Ok(cli) => cli,
            Err(code) => return Ok(code),
        };
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Verify {
                reference,
                generated,
                details,
                format,
                filename_column,
                checksum_column,
                strip_directories,
                fold_case,
            } => run_verify(
                &cfg,
                &VerifyArgs {
                    reference,
                    generated,
                    details,
                    format,
                    filename_column,
                    checksum_column,
                    strip_directories,
                    fold_case,
                },
            ),
            CliCommand::Generate {
                dir,
                output,
                algorithm,
                include_hidden,
            } => {
                let algorithm = algorithm.map(Algorithm::from).unwrap_or(cfg.algorithm);
                run_generate(&cfg, &dir, &output, algorithm, include_hidden)?;
                Ok(0)
            }
            CliCommand::Checksum { path, algorithm } => {
                let algorithm = algorithm.map(Algorithm::from).unwrap_or(cfg.algorithm);
                run_checksum(&path, algorithm)?;
                Ok(0)
            }
        }
    }
}

#[cfg(test)]
mod tests;
