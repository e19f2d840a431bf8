//! # Report Rendering
//!
//! Pure string renderers for every markdown document the pipeline writes:
//!
//! - the per-case `# Diff` section (shared by `diff.md` and `bypass.md`),
//! - the per-category summary,
//! - the global stats document,
//! - the aggregated-reason document.
//!
//! Nothing here touches the filesystem; the runner decides where output lands.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    diff::{DiffEntry, DiffOutcome},
    reason::ReasonEntry,
    stats::{CaseResult, Disposition, Stats},
};

/// Heading that starts the system-owned part of a case report.
pub const DIFF_HEADING: &str = "# Diff";

/// Body written for a case with no actual record.
pub const MISSING_MARKER: &str = "missing";

static DIFF_HEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# Diff[ \t]*\r?$").expect("diff heading regex"));

// ============================================================================
// CASE REPORTS
// ============================================================================

/// Renders one subsection per entry: reference text, actual text, unified diff.
pub fn render_case_section(entries: &[DiffEntry]) -> String {
    let mut md = String::new();
    for entry in entries {
        let _ = writeln!(md, "## {}", entry.name);
        let _ = writeln!(
            md,
            "### esbuild\n```js\n{}\n```",
            entry.reference.as_deref().unwrap_or("")
        );
        let _ = writeln!(
            md,
            "### rolldown\n```js\n{}\n```",
            entry.actual.as_deref().unwrap_or("")
        );
        let _ = writeln!(md, "### diff\n```diff\n{}\n```", entry.unified_diff);
    }
    md
}

/// The body placed under `# Diff` for an outcome; `None` for `Same`.
pub fn render_case_report(outcome: &DiffOutcome) -> Option<String> {
    match outcome {
        DiffOutcome::Same => None,
        DiffOutcome::Missing => Some(MISSING_MARKER.to_string()),
        DiffOutcome::Differs(entries) => Some(render_case_section(entries)),
    }
}

/// Replaces the `# Diff` section of an existing report with `section`.
///
/// Text before the first line that is exactly `# Diff` is kept; everything from
/// that line on is discarded. The result is trimmed of surrounding whitespace.
pub fn splice_diff_section(existing: &str, section: &str) -> String {
    let prefix = match DIFF_HEADING_LINE.find(existing) {
        Some(m) => &existing[..m.start()],
        None => existing,
    };
    let mut out = prefix.trim_end().to_string();
    out.push('\n');
    out.push_str(DIFF_HEADING);
    out.push('\n');
    out.push_str(section);
    out.trim().to_string()
}

// ============================================================================
// CATEGORY SUMMARY
// ============================================================================

/// Renders the failed/passed/bypassed lists for one category.
///
/// `results` must already be sorted by name. `link_prefix` is the path from the
/// summary file's directory to the category's case tree, `/`-separated.
pub fn render_category_summary(results: &[CaseResult], link_prefix: &str) -> String {
    let link = |name: &str| -> String {
        if link_prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", link_prefix.trim_end_matches('/'), name)
        }
    };

    let mut md = String::from("# Failed Cases\n");
    for result in results {
        match result.disposition {
            Disposition::Missing => {
                let _ = writeln!(md, "## {}\n  {}", result.name, MISSING_MARKER);
            }
            Disposition::Failed => {
                let _ = writeln!(md, "## [{}]({}/diff.md)\n  diff", result.name, link(&result.name));
            }
            _ => {}
        }
    }

    md.push_str("# Passed Cases\n");
    for result in results.iter().filter(|r| r.disposition == Disposition::Pass) {
        let _ = writeln!(md, "## [{}]({})", result.name, link(&result.name));
    }

    md.push_str("# Bypassed Cases\n");
    for result in results.iter().filter(|r| r.disposition == Disposition::Bypass) {
        let _ = writeln!(md, "## [{}]({}/bypass.md)", result.name, link(&result.name));
    }

    md
}

// ============================================================================
// GLOBAL DOCUMENTS
// ============================================================================

/// Renders overall and per-category totals, pass counts, and pass ratios.
pub fn render_stats(global: &Stats, categories: &[(String, Stats)]) -> String {
    let mut md = String::from("# Compatibility metric\n");
    write_stats_lines(&mut md, global);
    md.push_str("# Compatibility metric details\n");
    for (category, stats) in categories {
        let _ = writeln!(md, "## {}", category);
        write_stats_lines(&mut md, stats);
    }
    md
}

fn write_stats_lines(md: &mut String, stats: &Stats) {
    let _ = writeln!(md, "- total: {}", stats.total);
    let _ = writeln!(md, "- passed: {}", stats.passed());
    let _ = writeln!(md, "- passed ratio: {}%", stats.passed_ratio());
}

/// Renders one heading per reason followed by its citing case directories.
pub fn render_aggregated_reasons(entries: &[ReasonEntry]) -> String {
    let mut md = String::from("# Aggregate Reason\n");
    for entry in entries {
        let _ = writeln!(md, "## {}", entry.reason);
        for dir in &entry.case_dirs {
            let _ = writeln!(md, "- {}", dir);
        }
    }
    md
}
