//! # Snap-diff Test Fixtures
//!
//! Builds throwaway workspaces laid out the way the runner expects:
//! reference snapshots under `scripts/snap-diff/esbuild-snapshots` and case
//! directories under `crates/rolldown/tests/esbuild/<category>/<case>`.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use snap_diff::config::SnapDiffConfig;
use snap_diff::snapshot::{render_reference_snapshot, SubOutput, TestCase};
use tempfile::TempDir;
use walkdir::WalkDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// A config rooted here that processes every snapshot file.
    pub fn config(&self) -> SnapDiffConfig {
        let mut config = SnapDiffConfig::for_workspace(self.root());
        config.include.clear();
        config
    }

    pub fn write_snapshot(&self, file_name: &str, cases: &[TestCase]) {
        self.write_raw_snapshot(file_name, &render_reference_snapshot(cases));
    }

    pub fn write_raw_snapshot(&self, file_name: &str, text: &str) {
        let dir = self.root().join("scripts/snap-diff/esbuild-snapshots");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), text).unwrap();
    }

    pub fn case_dir(&self, category: &str, case: &str) -> PathBuf {
        self.root()
            .join("crates/rolldown/tests/esbuild")
            .join(category)
            .join(case)
    }

    pub fn write_case_file(&self, category: &str, case: &str, file: &str, content: &str) {
        let dir = self.case_dir(category, case);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    pub fn write_artifact(&self, category: &str, case: &str, outputs: &[(&str, &str)]) {
        self.write_case_file(category, case, "artifacts.snap", &artifact_text(outputs));
    }

    pub fn case_file(&self, category: &str, case: &str, file: &str) -> PathBuf {
        self.case_dir(category, case).join(file)
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).unwrap()
    }

    /// Every file under the workspace, keyed by relative path.
    pub fn tree(&self) -> BTreeMap<String, String> {
        WalkDir::new(self.root())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(self.root()).unwrap();
                (
                    rel.to_string_lossy().replace('\\', "/"),
                    fs::read_to_string(e.path()).unwrap(),
                )
            })
            .collect()
    }
}

pub fn case(name: &str, outputs: &[(&str, &str)]) -> TestCase {
    TestCase {
        name: name.to_string(),
        outputs: outputs
            .iter()
            .map(|(n, c)| SubOutput::new(*n, *c))
            .collect(),
    }
}

/// Renders outputs the way rolldown writes `artifacts.snap`.
pub fn artifact_text(outputs: &[(&str, &str)]) -> String {
    let mut text = String::from(
        "---\nsource: crates/rolldown_testing/src/integration_test.rs\nsnapshot_kind: text\n---\n# Assets\n\n",
    );
    for (name, content) in outputs {
        text.push_str(&format!("## {}\n\n```js\n{}\n```\n\n", name, content));
    }
    text
}
