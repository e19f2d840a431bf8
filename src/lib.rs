pub use crate::diagnostics::SnapDiffError;

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod diff;
pub mod files;
pub mod output;
pub mod paths;
pub mod reason;
pub mod report;
pub mod runner;
pub mod snapshot;
pub mod stats;
