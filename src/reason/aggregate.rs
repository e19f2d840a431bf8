use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use super::extract::try_extract_reasons;
use crate::{files, paths, SnapDiffError};

/// Case report file names scanned for reasons.
pub const CASE_REPORT_FILES: [&str; 2] = ["diff.md", "bypass.md"];

/// One distinct reason and the case directories citing it, sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonEntry {
    pub reason: String,
    pub case_dirs: Vec<String>,
}

/// Finds every case report beneath `test_root`, in sorted walk order.
pub fn collect_case_reports(test_root: &Path) -> Result<Vec<PathBuf>, SnapDiffError> {
    if !test_root.exists() {
        return Ok(Vec::new());
    }

    let mut reports = Vec::new();
    for entry in WalkDir::new(test_root).sort_by_file_name() {
        let entry = entry.map_err(|e| SnapDiffError::Walk {
            root: test_root.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_report = entry
            .file_name()
            .to_str()
            .is_some_and(|name| CASE_REPORT_FILES.contains(&name));
        if is_report {
            reports.push(entry.into_path());
        }
    }
    Ok(reports)
}

/// Scans all case reports under `test_root` and groups their case directories,
/// relative to `workspace_root`, by reason text.
pub fn aggregate_reasons(
    workspace_root: &Path,
    test_root: &Path,
) -> Result<Vec<ReasonEntry>, SnapDiffError> {
    let mut cited = Vec::new();
    for report in collect_case_reports(test_root)? {
        let content = files::read_required(&report)?;
        let case_dir = report.parent().unwrap_or(test_root);
        let rel = paths::to_posix(&paths::relative_to(workspace_root, case_dir));

        match try_extract_reasons(&content) {
            Ok(reasons) => cited.push((rel, reasons)),
            Err(issue) => {
                let err = SnapDiffError::MalformedReasonDocument {
                    path: report.clone(),
                    reason: issue,
                };
                debug!("{}", err);
            }
        }
    }
    Ok(group_reasons(cited))
}

/// Groups `(case_dir, markdown)` documents by identical reason text.
///
/// Each directory list is sorted and deduplicated. Entries are ordered by
/// descending directory count; ties keep the order in which the reason was
/// first encountered.
pub fn aggregate_documents<I>(documents: I) -> Vec<ReasonEntry>
where
    I: IntoIterator<Item = (String, String)>,
{
    group_reasons(
        documents
            .into_iter()
            .map(|(case_dir, content)| (case_dir, super::extract_reasons(&content))),
    )
}

/// Groups already-extracted `(case_dir, reasons)` pairs; ordering as in
/// [`aggregate_documents`].
fn group_reasons<I>(cited: I) -> Vec<ReasonEntry>
where
    I: IntoIterator<Item = (String, Vec<String>)>,
{
    let mut entries: Vec<ReasonEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (case_dir, reasons) in cited {
        for reason in reasons {
            let slot = *index.entry(reason.clone()).or_insert_with(|| {
                entries.push(ReasonEntry {
                    reason,
                    case_dirs: Vec::new(),
                });
                entries.len() - 1
            });
            entries[slot].case_dirs.push(case_dir.clone());
        }
    }

    for entry in &mut entries {
        entry.case_dirs.sort();
        entry.case_dirs.dedup();
    }
    entries.sort_by(|a, b| b.case_dirs.len().cmp(&a.case_dirs.len()));
    entries
}
