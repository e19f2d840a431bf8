//! # Snapshot Model
//!
//! Both sides of the comparison decode into the same shape: an ordered list of
//! named [`SubOutput`]s. The reference side groups them into [`TestCase`]s inside a
//! [`SnapshotCategory`]; the actual side produces one [`ActualRecord`] per case.
//!
//! - [`reference`] decodes the aggregated esbuild snapshot files.
//! - [`artifact`] decodes a single rolldown `artifacts.snap`.

use std::path::Path;

pub mod artifact;
pub mod reference;

pub use artifact::parse_actual_snapshot;
pub use reference::{parse_reference_snapshot, render_reference_snapshot, try_parse_reference_snapshot};

/// One named unit of text within a case, e.g. one emitted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubOutput {
    pub name: String,
    pub content: String,
}

impl SubOutput {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A named reference case with its recorded sub-outputs, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub outputs: Vec<SubOutput>,
}

/// The other bundler's recorded outputs for one case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActualRecord {
    pub outputs: Vec<SubOutput>,
}

impl ActualRecord {
    pub fn get(&self, name: &str) -> Option<&SubOutput> {
        self.outputs.iter().find(|o| o.name == name)
    }
}

/// One aggregated reference snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotCategory {
    /// Name with the ordering prefix stripped (`snapshots_dce.txt` -> `dce`).
    pub name: String,
    /// The file name as found on disk.
    pub file_name: String,
    pub content: String,
}

impl SnapshotCategory {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            name: category_name(&file_name),
            file_name,
            content: content.into(),
        }
    }
}

/// Derives the category name from a snapshot file name: the extension and the
/// first `_`-separated segment are dropped.
///
/// ```
/// use snap_diff::snapshot::category_name;
/// assert_eq!(category_name("snapshots_importstar_ts.txt"), "importstar_ts");
/// ```
pub fn category_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.split_once('_') {
        Some((_, rest)) => rest.to_string(),
        None => String::new(),
    }
}
