//! Run configuration: where inputs live, where reports go, and what to select.
//!
//! Values come from [`SnapDiffConfig::default`], optionally overlaid by a YAML file,
//! then by command-line flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{files, SnapDiffError};

/// Snapshot files compared when no include list is given on the command line.
pub const DEFAULT_INCLUDE_LIST: [&str; 10] = [
    "snapshots_importstar.txt",
    "snapshots_default.txt",
    "snapshots_packagejson.txt",
    "snapshots_dce.txt",
    "snapshots_splitting.txt",
    "snapshots_lower.txt",
    "snapshots_glob.txt",
    "snapshots_importstar_ts.txt",
    "snapshots_ts.txt",
    "snapshots_loader.txt",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapDiffConfig {
    /// Root every relative directory below resolves against.
    pub workspace_root: PathBuf,
    /// Directory holding the aggregated reference snapshots.
    pub snapshot_dir: PathBuf,
    /// Root of the per-case test tree (`<category>/<case>/artifacts.snap`).
    pub test_root: PathBuf,
    pub summary_dir: PathBuf,
    pub stats_dir: PathBuf,
    /// Snapshot file names to process; empty means every file.
    pub include: Vec<String>,
    /// Case names to process within each category; empty means every case.
    pub case_names: Vec<String>,
    pub debug: bool,
    pub verbose: bool,
}

impl Default for SnapDiffConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            snapshot_dir: PathBuf::from("scripts/snap-diff/esbuild-snapshots"),
            test_root: PathBuf::from("crates/rolldown/tests/esbuild"),
            summary_dir: PathBuf::from("scripts/snap-diff/summary"),
            stats_dir: PathBuf::from("scripts/snap-diff/stats"),
            include: DEFAULT_INCLUDE_LIST.iter().map(|s| s.to_string()).collect(),
            case_names: Vec::new(),
            debug: false,
            verbose: false,
        }
    }
}

impl SnapDiffConfig {
    /// Loads a YAML config file; keys left out keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self, SnapDiffError> {
        let content = files::read_required(path)?;
        Self::from_yaml_str(&content).map_err(|e| SnapDiffError::Config {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// A config rooted at `workspace_root` with every other value defaulted.
    pub fn for_workspace(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            ..Self::default()
        }
    }

    fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.workspace_root.join(dir)
        }
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        self.resolve(&self.snapshot_dir)
    }

    pub fn test_root(&self) -> PathBuf {
        self.resolve(&self.test_root)
    }

    pub fn summary_dir(&self) -> PathBuf {
        self.resolve(&self.summary_dir)
    }

    pub fn stats_dir(&self) -> PathBuf {
        self.resolve(&self.stats_dir)
    }

    /// Directory of one case: `<test_root>/<category>/<case>`.
    pub fn case_dir(&self, category: &str, case: &str) -> PathBuf {
        self.test_root().join(category).join(case)
    }

    /// Whether `case` passes the case-name filter.
    pub fn selects_case(&self, case: &str) -> bool {
        self.case_names.is_empty() || self.case_names.iter().any(|c| c == case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_only_given_keys() {
        let config = SnapDiffConfig::from_yaml_str("include: []\ncase_names: [TestA]\n").unwrap();
        assert!(config.include.is_empty());
        assert_eq!(config.case_names, vec!["TestA".to_string()]);
        assert_eq!(config.test_root, PathBuf::from("crates/rolldown/tests/esbuild"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SnapDiffConfig::from_yaml_str("includes: []\n").is_err());
    }

    #[test]
    fn absolute_dirs_ignore_workspace_root() {
        let mut config = SnapDiffConfig::for_workspace("/ws");
        config.stats_dir = PathBuf::from("/tmp/stats");
        assert_eq!(config.stats_dir(), PathBuf::from("/tmp/stats"));
        assert_eq!(config.summary_dir(), PathBuf::from("/ws/scripts/snap-diff/summary"));
    }
}
