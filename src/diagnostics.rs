//! # Overview
//!
//! This module defines the `miette`-based diagnostic type for the snap-diff pipeline.
//! Every failure the pipeline can surface is a variant of [`SnapDiffError`].
//!
//! Two severities exist:
//!
//! - **Fatal** variants (filesystem, config, tree walk) abort the run. The binary
//!   renders them through `miette::Report` and exits with status 1.
//! - **Warning** variants (`MalformedSnapshot`, `MalformedReasonDocument`) are built,
//!   logged, and then absorbed by the caller. A malformed snapshot is treated as an
//!   empty category and a malformed reason document contributes no reasons.
//!
//! A case without an `artifacts.snap` is not an error at all: it is the
//! [`DiffOutcome::Missing`](crate::diff::DiffOutcome::Missing) outcome.
//!
//! # Construction
//!
//! - Use `io_err!` for the filesystem variants: `io_err!(Read, path, err)`.
//! - Build the warning variants directly; they carry only the data needed for the log line.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for every snap-diff failure mode.
#[derive(Debug, Error, Diagnostic)]
pub enum SnapDiffError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(
        code(snap_diff::io::read),
        help("snapshot inputs are required; check the workspace root and snapshot directory")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list directory {}", path.display())]
    #[diagnostic(code(snap_diff::io::list_dir))]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(
        code(snap_diff::io::write),
        help("the test tree may now be partially updated; rerun once the path is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {}", path.display())]
    #[diagnostic(code(snap_diff::io::remove))]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    #[diagnostic(code(snap_diff::io::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk test tree {}", root.display())]
    #[diagnostic(code(snap_diff::io::walk))]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid config file {}", path.display())]
    #[diagnostic(
        code(snap_diff::config),
        help("see `SnapDiffConfig` for the accepted keys")
    )]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("snapshot `{category}` has no recognizable case boundary")]
    #[diagnostic(
        code(snap_diff::snapshot::malformed),
        severity(Warning),
        help("cases are separated by a line of 80 `=` characters")
    )]
    MalformedSnapshot { category: String },

    #[error("{}: {reason}", path.display())]
    #[diagnostic(code(snap_diff::reason::malformed), severity(Warning))]
    MalformedReasonDocument {
        path: PathBuf,
        reason: ReasonDocumentIssue,
    },
}

/// Why a case report yielded no reasons.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReasonDocumentIssue {
    /// No level-1 `Reason` heading.
    #[error("no `# Reason` heading")]
    NoReasonHeading,
    /// A `Reason` heading exists but no list follows it.
    #[error("`# Reason` heading without a list")]
    NoReasonList,
}

impl SnapDiffError {
    /// True for variants the pipeline logs and absorbs instead of aborting on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SnapDiffError::MalformedSnapshot { .. } | SnapDiffError::MalformedReasonDocument { .. }
        )
    }
}

/// Constructs a filesystem `SnapDiffError` variant from a path and an `io::Error`.
///
/// `io_err!(Write, &path, e)` expands to `SnapDiffError::Write { path, source: e }`.
#[macro_export]
macro_rules! io_err {
    ($variant:ident, $path:expr, $err:expr) => {
        $crate::SnapDiffError::$variant {
            path: ::std::path::PathBuf::from($path),
            source: $err,
        }
    };
}
