//! # Orchestrator
//!
//! Drives the comparison in a fixed order:
//!
//! 1. **Categories** are processed in include-list order (directory order when the
//!    list is empty).
//! 2. **Cases** are processed in reference-snapshot order; each one is diffed, its
//!    report files are updated, and its disposition is recorded.
//! 3. **Summaries** are written per category once all of its cases are done.
//! 4. **Global documents** (stats, aggregated reasons) are written last.
//!
//! The on-disk state of a case is decided by [`plan_case`], a decision table keyed on
//! whether `bypass.md` exists and on the kind of [`DiffOutcome`].

use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use crate::{
    config::SnapDiffConfig,
    diff::{diff_case, DiffOutcome},
    files, paths,
    reason::{aggregate_reasons, ReasonEntry},
    report,
    snapshot::{parse_actual_snapshot, try_parse_reference_snapshot, SnapshotCategory, TestCase},
    stats::{CaseResult, Disposition, Stats},
    SnapDiffError,
};

/// The other bundler's per-case artifact file.
pub const ARTIFACT_FILE: &str = "artifacts.snap";
pub const DIFF_FILE: &str = "diff.md";
pub const BYPASS_FILE: &str = "bypass.md";
pub const STATS_FILE: &str = "stats.md";
pub const AGGREGATED_REASON_FILE: &str = "aggregated-reason.md";

// ============================================================================
// CASE STATE TRANSITIONS
// ============================================================================

/// What happens to a case's report files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Remove `diff.md` and replace the `# Diff` section of `bypass.md`.
    UpdateBypass,
    /// Remove both `diff.md` and `bypass.md`.
    CleanUp,
    /// Replace the `# Diff` section of `diff.md`, creating it if needed.
    WriteDiff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasePlan {
    pub transition: Transition,
    pub disposition: Disposition,
}

/// The decision table for one case.
///
/// | bypass.md | outcome | transition   | disposition |
/// |-----------|---------|--------------|-------------|
/// | any       | Same    | CleanUp      | pass        |
/// | yes       | Differs | UpdateBypass | bypass      |
/// | yes       | Missing | UpdateBypass | missing     |
/// | no        | Differs | WriteDiff    | failed      |
/// | no        | Missing | WriteDiff    | missing     |
pub fn plan_case(bypass_exists: bool, outcome: &DiffOutcome) -> CasePlan {
    let (transition, disposition) = match (bypass_exists, outcome) {
        (_, DiffOutcome::Same) => (Transition::CleanUp, Disposition::Pass),
        (true, DiffOutcome::Differs(_)) => (Transition::UpdateBypass, Disposition::Bypass),
        (true, DiffOutcome::Missing) => (Transition::UpdateBypass, Disposition::Missing),
        (false, DiffOutcome::Differs(_)) => (Transition::WriteDiff, Disposition::Failed),
        (false, DiffOutcome::Missing) => (Transition::WriteDiff, Disposition::Missing),
    };
    CasePlan {
        transition,
        disposition,
    }
}

/// The two report files a case directory may hold.
#[derive(Debug, Clone)]
pub struct CaseReportPaths {
    pub case_dir: PathBuf,
    pub diff: PathBuf,
    pub bypass: PathBuf,
}

impl CaseReportPaths {
    pub fn new(case_dir: &Path) -> Self {
        Self {
            case_dir: case_dir.to_path_buf(),
            diff: case_dir.join(DIFF_FILE),
            bypass: case_dir.join(BYPASS_FILE),
        }
    }
}

/// Applies a plan to the case's report files.
///
/// A `WriteDiff` for a case whose directory does not exist yet writes nothing.
pub fn apply_plan(
    plan: &CasePlan,
    reports: &CaseReportPaths,
    outcome: &DiffOutcome,
) -> Result<(), SnapDiffError> {
    let body = report::render_case_report(outcome).unwrap_or_default();
    match plan.transition {
        Transition::CleanUp => {
            files::remove_if_exists(&reports.bypass)?;
            files::remove_if_exists(&reports.diff)?;
        }
        Transition::UpdateBypass => {
            files::remove_if_exists(&reports.diff)?;
            let existing = files::read_optional(&reports.bypass)?.unwrap_or_default();
            files::write(&reports.bypass, &report::splice_diff_section(&existing, &body))?;
        }
        Transition::WriteDiff => {
            if !reports.case_dir.is_dir() {
                return Ok(());
            }
            let existing = files::read_optional(&reports.diff)?.unwrap_or_default();
            files::write(&reports.diff, &report::splice_diff_section(&existing, &body))?;
        }
    }
    Ok(())
}

// ============================================================================
// RUN RESULTS
// ============================================================================

/// Sorted case results and counters for one category.
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub name: String,
    pub results: Vec<CaseResult>,
    pub stats: Stats,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub categories: Vec<CategoryReport>,
    pub global: Stats,
    pub reasons: Vec<ReasonEntry>,
}

impl RunReport {
    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.name == name)
    }
}

// ============================================================================
// RUNNER
// ============================================================================

pub struct SnapDiffRunner {
    config: SnapDiffConfig,
}

impl SnapDiffRunner {
    pub fn new(config: SnapDiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnapDiffConfig {
        &self.config
    }

    /// Runs every selected category, then writes the global documents.
    pub fn run(&self) -> Result<RunReport, SnapDiffError> {
        let mut global = Stats::default();
        let mut categories = Vec::new();

        for category in self.load_categories()? {
            let report = self.process_category(&category)?;
            global.absorb(&report.stats);
            categories.push(report);
        }

        self.write_stats(&global, &categories)?;
        let reasons = self.write_aggregated_reasons()?;

        Ok(RunReport {
            categories,
            global,
            reasons,
        })
    }

    /// Reads the selected snapshot files.
    pub fn load_categories(&self) -> Result<Vec<SnapshotCategory>, SnapDiffError> {
        let dir = self.config.snapshot_dir();
        let available = files::list_file_names(&dir)?;

        let selected: Vec<String> = if self.config.include.is_empty() {
            available
        } else {
            self.config
                .include
                .iter()
                .filter(|name| {
                    let present = available.contains(name);
                    if !present {
                        warn!(file = %name, dir = %dir.display(), "included snapshot file not found");
                    }
                    present
                })
                .cloned()
                .collect()
        };

        let mut categories = Vec::with_capacity(selected.len());
        for file_name in selected {
            let content = files::read_required(&dir.join(&file_name))?;
            categories.push(SnapshotCategory::new(file_name, content));
        }
        Ok(categories)
    }

    /// Processes every selected case of a category and writes its summary.
    pub fn process_category(
        &self,
        category: &SnapshotCategory,
    ) -> Result<CategoryReport, SnapDiffError> {
        debug!(category = %category.name, file = %category.file_name, "processing category");

        let cases = match try_parse_reference_snapshot(&category.name, &category.content) {
            Ok(cases) => cases,
            Err(e) if e.is_recoverable() => {
                warn!("{}", e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let mut results = Vec::new();
        for case in cases.iter().filter(|c| self.config.selects_case(&c.name)) {
            let disposition = self.process_case(&category.name, case)?;
            results.push(CaseResult::new(&case.name, disposition));
        }
        results.sort_by(|a, b| a.name.cmp(&b.name));

        let stats = Stats::from_dispositions(results.iter().map(|r| r.disposition));
        self.write_summary(&category.name, &results)?;

        info!(
            category = %category.name,
            pass = stats.pass,
            bypass = stats.bypass,
            failed = stats.failed,
            total = stats.total,
            "category done"
        );

        Ok(CategoryReport {
            name: category.name.clone(),
            results,
            stats,
        })
    }

    /// Diffs one case, updates its report files, and returns its disposition.
    pub fn process_case(
        &self,
        category: &str,
        case: &TestCase,
    ) -> Result<Disposition, SnapDiffError> {
        debug!(category, case = %case.name, "processing case");

        let case_dir = self.config.case_dir(category, &case.name);
        let artifact = files::read_optional(&case_dir.join(ARTIFACT_FILE))?;
        let actual = parse_actual_snapshot(artifact.as_deref());
        let outcome = diff_case(case, actual.as_ref());

        let reports = CaseReportPaths::new(&case_dir);
        let plan = plan_case(reports.bypass.is_file(), &outcome);
        apply_plan(&plan, &reports, &outcome)?;

        if let DiffOutcome::Differs(entries) = &outcome {
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            trace!(category, case = %case.name, entries = ?names, "sub-outputs differ");
        }
        trace!(
            category,
            case = %case.name,
            outcome = outcome.kind(),
            disposition = %plan.disposition,
            "case done"
        );

        Ok(plan.disposition)
    }

    fn write_summary(&self, category: &str, results: &[CaseResult]) -> Result<(), SnapDiffError> {
        let summary_dir = self.config.summary_dir();
        let category_dir = self.config.test_root().join(category);
        let link_prefix = paths::to_posix(&paths::relative_to(&summary_dir, &category_dir));

        let markdown = report::render_category_summary(results, &link_prefix);
        files::write(&summary_dir.join(format!("{}.md", category)), &markdown)
    }

    fn write_stats(
        &self,
        global: &Stats,
        categories: &[CategoryReport],
    ) -> Result<(), SnapDiffError> {
        let details: Vec<(String, Stats)> = categories
            .iter()
            .map(|c| (c.name.clone(), c.stats))
            .collect();
        let markdown = report::render_stats(global, &details);
        files::write(&self.config.stats_dir().join(STATS_FILE), &markdown)
    }

    fn write_aggregated_reasons(&self) -> Result<Vec<ReasonEntry>, SnapDiffError> {
        let entries = aggregate_reasons(&self.config.workspace_root, &self.config.test_root())?;
        let markdown = report::render_aggregated_reasons(&entries);
        files::write(
            &self.config.stats_dir().join(AGGREGATED_REASON_FILE),
            &markdown,
        )?;
        Ok(entries)
    }
}
