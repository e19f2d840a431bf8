//!
//! This module is the main entry point for the `snap-diff` command and wires the
//! command line, logging, and the runner together.

use std::{path::PathBuf, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{config::SnapDiffConfig, output, runner::SnapDiffRunner, SnapDiffError};

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "snap-diff",
    version,
    about = "Compare esbuild reference snapshots with rolldown artifacts and write compatibility reports."
)]
pub struct SnapDiffArgs {
    /// Snapshot file names to compare (e.g. `snapshots_default.txt`). Replaces the default list.
    pub include: Vec<String>,

    /// Compare every snapshot file in the snapshot directory.
    #[arg(long, conflicts_with = "include")]
    pub all: bool,

    /// Restrict processing to these case names. May be repeated.
    #[arg(long = "case", value_name = "NAME")]
    pub cases: Vec<String>,

    /// Log per-category and per-case progress.
    #[arg(long)]
    pub debug: bool,

    /// Log the outcome and differing sub-outputs of every case.
    #[arg(long)]
    pub verbose: bool,

    /// Workspace root the default directories resolve against.
    #[arg(long, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,

    /// YAML config file; flags given here override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SnapDiffArgs {
    /// Builds the effective config: defaults, then the config file, then flags.
    pub fn into_config(self) -> Result<SnapDiffConfig, SnapDiffError> {
        let mut config = match &self.config {
            Some(path) => SnapDiffConfig::from_yaml_file(path)?,
            None => SnapDiffConfig::default(),
        };

        if let Some(root) = self.workspace_root {
            config.workspace_root = root;
        }
        if self.all {
            config.include.clear();
        } else if !self.include.is_empty() {
            config.include = self.include;
        }
        if !self.cases.is_empty() {
            config.case_names = self.cases;
        }
        config.debug |= self.debug;
        config.verbose |= self.verbose;
        Ok(config)
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = SnapDiffArgs::parse();

    let config = args.into_config().unwrap_or_else(|e| exit_with(e));
    let runner = SnapDiffRunner::new(config);
    init_logging(runner.config());

    match runner.run() {
        Ok(report) => output::print_summary(&report),
        Err(e) => exit_with(e),
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over the flags.
pub fn init_logging(config: &SnapDiffConfig) {
    let level = if config.verbose {
        "trace"
    } else if config.debug {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("snap_diff={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn exit_with(e: SnapDiffError) -> ! {
    eprintln!("{:?}", miette::Report::new(e));
    process::exit(1);
}
