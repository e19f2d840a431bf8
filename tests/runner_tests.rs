// tests/runner_tests.rs

mod common;

use common::{case, Workspace};
use snap_diff::diff::DiffOutcome;
use snap_diff::runner::{plan_case, SnapDiffRunner, Transition};
use snap_diff::stats::{CaseResult, Disposition, Stats};

/// Category `X` with a passing case `A` and a failing case `B`.
fn scenario_x(ws: &Workspace) {
    ws.write_snapshot(
        "snapshots_X.txt",
        &[
            case("A", &[("main.js", "same")]),
            case("B", &[("main.js", "foo")]),
        ],
    );
    ws.write_artifact("X", "A", &[("main.js", "same")]);
    ws.write_artifact("X", "B", &[("main.js", "bar")]);
}

// ---
// Decision table
// ---

#[test]
fn test_plan_case_table() {
    let differs = DiffOutcome::Differs(Vec::new());
    let rows = [
        (false, DiffOutcome::Same, Transition::CleanUp, Disposition::Pass),
        (true, DiffOutcome::Same, Transition::CleanUp, Disposition::Pass),
        (true, differs.clone(), Transition::UpdateBypass, Disposition::Bypass),
        (true, DiffOutcome::Missing, Transition::UpdateBypass, Disposition::Missing),
        (false, differs, Transition::WriteDiff, Disposition::Failed),
        (false, DiffOutcome::Missing, Transition::WriteDiff, Disposition::Missing),
    ];
    for (bypass, outcome, transition, disposition) in rows {
        let plan = plan_case(bypass, &outcome);
        assert_eq!(plan.transition, transition, "bypass={} outcome={:?}", bypass, outcome);
        assert_eq!(plan.disposition, disposition, "bypass={} outcome={:?}", bypass, outcome);
    }
}

// ---
// Scenarios
// ---

#[test]
fn test_pass_and_fail_in_one_category() {
    let ws = Workspace::new();
    scenario_x(&ws);

    let report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let x = report.category("X").unwrap();

    assert_eq!(
        x.results,
        vec![
            CaseResult::new("A", Disposition::Pass),
            CaseResult::new("B", Disposition::Failed),
        ]
    );
    assert_eq!(
        x.stats,
        Stats {
            pass: 1,
            bypass: 0,
            failed: 1,
            total: 2
        }
    );
    assert_eq!(report.global, x.stats);

    assert!(!ws.case_file("X", "A", "diff.md").exists());
    assert!(!ws.case_file("X", "A", "bypass.md").exists());

    let diff = std::fs::read_to_string(ws.case_file("X", "B", "diff.md")).unwrap();
    assert!(diff.starts_with("# Diff\n## main.js\n"));
    assert!(diff.contains("### esbuild\n```js\nfoo\n```"));
    assert!(diff.contains("### rolldown\n```js\nbar\n```"));
    assert!(diff.contains("-foo\n+bar"));
    assert!(!ws.case_file("X", "B", "bypass.md").exists());
}

#[test]
fn test_category_summary_and_stats_documents() {
    let ws = Workspace::new();
    scenario_x(&ws);
    SnapDiffRunner::new(ws.config()).run().unwrap();

    assert_eq!(
        ws.read("scripts/snap-diff/summary/X.md"),
        "# Failed Cases\n\
         ## [B](../../../crates/rolldown/tests/esbuild/X/B/diff.md)\n  diff\n\
         # Passed Cases\n\
         ## [A](../../../crates/rolldown/tests/esbuild/X/A)\n\
         # Bypassed Cases\n"
    );
    assert_eq!(
        ws.read("scripts/snap-diff/stats/stats.md"),
        "# Compatibility metric\n- total: 2\n- passed: 1\n- passed ratio: 50.00%\n\
         # Compatibility metric details\n## X\n- total: 2\n- passed: 1\n- passed ratio: 50.00%\n"
    );
    assert_eq!(
        ws.read("scripts/snap-diff/stats/aggregated-reason.md"),
        "# Aggregate Reason\n"
    );
}

#[test]
fn test_bypass_gains_diff_section_and_reason_is_aggregated() {
    let ws = Workspace::new();
    ws.write_snapshot("snapshots_X.txt", &[case("C", &[("main.js", "a();\nb();")])]);
    ws.write_artifact("X", "C", &[("main.js", "b();\na();")]);
    ws.write_case_file(
        "X",
        "C",
        "bypass.md",
        "# Reason\n- intentional ordering change\n",
    );
    ws.write_case_file("X", "C", "diff.md", "# Diff\nstale");

    let report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let x = report.category("X").unwrap();
    assert_eq!(x.results, vec![CaseResult::new("C", Disposition::Bypass)]);
    assert_eq!(x.stats.bypass, 1);
    assert_eq!(x.stats.failed, 0);

    assert!(!ws.case_file("X", "C", "diff.md").exists());
    let bypass = std::fs::read_to_string(ws.case_file("X", "C", "bypass.md")).unwrap();
    assert!(bypass.starts_with("# Reason\n- intentional ordering change\n# Diff\n## main.js\n"));

    assert_eq!(report.reasons.len(), 1);
    assert_eq!(report.reasons[0].reason, "intentional ordering change");
    assert_eq!(
        report.reasons[0].case_dirs,
        vec!["crates/rolldown/tests/esbuild/X/C".to_string()]
    );
    assert_eq!(
        ws.read("scripts/snap-diff/stats/aggregated-reason.md"),
        "# Aggregate Reason\n## intentional ordering change\n- crates/rolldown/tests/esbuild/X/C\n"
    );
    assert!(ws
        .read("scripts/snap-diff/summary/X.md")
        .contains("## [C](../../../crates/rolldown/tests/esbuild/X/C/bypass.md)\n"));
}

#[test]
fn test_existing_diff_section_in_bypass_is_replaced() {
    let ws = Workspace::new();
    ws.write_snapshot("snapshots_X.txt", &[case("C", &[("main.js", "foo")])]);
    ws.write_artifact("X", "C", &[("main.js", "bar")]);
    ws.write_case_file(
        "X",
        "C",
        "bypass.md",
        "# Reason\n- renamed\n\n# Diff\n## old.js\nstale content\n",
    );

    SnapDiffRunner::new(ws.config()).run().unwrap();
    let bypass = std::fs::read_to_string(ws.case_file("X", "C", "bypass.md")).unwrap();
    assert!(!bypass.contains("old.js"));
    assert!(!bypass.contains("stale content"));
    assert_eq!(bypass.matches("# Diff\n").count(), 1);
    assert!(bypass.starts_with("# Reason\n- renamed\n# Diff\n## main.js"));
}

#[test]
fn test_bypassed_case_without_artifact_is_missing() {
    let ws = Workspace::new();
    ws.write_snapshot("snapshots_X.txt", &[case("C", &[("main.js", "foo")])]);
    ws.write_case_file("X", "C", "bypass.md", "# Reason\n- r\n# Diff\n## main.js\nold\n");
    ws.write_case_file("X", "C", "diff.md", "# Diff\nstale");

    let report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let x = report.category("X").unwrap();
    assert_eq!(x.results, vec![CaseResult::new("C", Disposition::Missing)]);
    assert_eq!(x.stats.failed, 1);

    assert!(!ws.case_file("X", "C", "diff.md").exists());
    assert_eq!(
        std::fs::read_to_string(ws.case_file("X", "C", "bypass.md")).unwrap(),
        "# Reason\n- r\n# Diff\nmissing"
    );
    assert!(ws
        .read("scripts/snap-diff/summary/X.md")
        .starts_with("# Failed Cases\n## C\n  missing\n"));
    assert_eq!(report.reasons[0].reason, "r");
}

#[test]
fn test_case_back_to_same_removes_reports() {
    let ws = Workspace::new();
    ws.write_snapshot("snapshots_X.txt", &[case("D", &[("main.js", "ok")])]);
    ws.write_artifact("X", "D", &[("main.js", "ok")]);
    ws.write_case_file("X", "D", "bypass.md", "# Reason\n- was different\n# Diff\nold");
    ws.write_case_file("X", "D", "diff.md", "# Diff\nold");

    let report = SnapDiffRunner::new(ws.config()).run().unwrap();
    assert_eq!(
        report.category("X").unwrap().results,
        vec![CaseResult::new("D", Disposition::Pass)]
    );
    assert!(!ws.case_file("X", "D", "bypass.md").exists());
    assert!(!ws.case_file("X", "D", "diff.md").exists());
    assert!(report.reasons.is_empty());
}

#[test]
fn test_missing_artifact_counts_as_failed() {
    let ws = Workspace::new();
    ws.write_snapshot(
        "snapshots_X.txt",
        &[
            case("Unported", &[("main.js", "x")]),
            case("Empty", &[("main.js", "y")]),
        ],
    );
    ws.write_case_file("X", "Empty", "_config.json", "{}");

    let report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let x = report.category("X").unwrap();
    assert_eq!(
        x.results,
        vec![
            CaseResult::new("Empty", Disposition::Missing),
            CaseResult::new("Unported", Disposition::Missing),
        ]
    );
    assert_eq!(x.stats.failed, 2);

    assert!(!ws.case_dir("X", "Unported").exists());
    assert_eq!(
        std::fs::read_to_string(ws.case_file("X", "Empty", "diff.md")).unwrap(),
        "# Diff\nmissing"
    );
    assert!(ws
        .read("scripts/snap-diff/summary/X.md")
        .starts_with("# Failed Cases\n## Empty\n  missing\n## Unported\n  missing\n"));
}

#[test]
fn test_diff_md_keeps_maintainer_prefix() {
    let ws = Workspace::new();
    scenario_x(&ws);
    ws.write_case_file("X", "B", "diff.md", "# Reason\n- not yet triaged\n# Diff\nold");

    let report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let diff = std::fs::read_to_string(ws.case_file("X", "B", "diff.md")).unwrap();
    assert!(diff.starts_with("# Reason\n- not yet triaged\n# Diff\n## main.js"));
    assert_eq!(report.reasons[0].reason, "not yet triaged");
}

#[test]
fn test_case_filter_and_include_list() {
    let ws = Workspace::new();
    scenario_x(&ws);
    ws.write_snapshot("snapshots_Y.txt", &[case("Z", &[("main.js", "z")])]);

    let mut config = ws.config();
    config.include = vec!["snapshots_X.txt".to_string(), "snapshots_nope.txt".to_string()];
    config.case_names = vec!["B".to_string()];

    let report = SnapDiffRunner::new(config).run().unwrap();
    assert_eq!(report.categories.len(), 1);
    assert_eq!(
        report.categories[0].results,
        vec![CaseResult::new("B", Disposition::Failed)]
    );
    assert!(!ws.root().join("scripts/snap-diff/summary/Y.md").exists());
}

#[test]
fn test_malformed_snapshot_is_an_empty_category() {
    let ws = Workspace::new();
    ws.write_raw_snapshot("snapshots_broken.txt", "no separators here\n");
    scenario_x(&ws);

    let report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let broken = report.category("broken").unwrap();
    assert_eq!(broken.stats, Stats::default());
    assert_eq!(report.global.total, 2);
    assert!(ws
        .read("scripts/snap-diff/stats/stats.md")
        .contains("## broken\n- total: 0\n- passed: 0\n- passed ratio: 0.00%\n"));
}

#[test]
fn test_missing_snapshot_dir_is_fatal() {
    let ws = Workspace::new();
    let err = SnapDiffRunner::new(ws.config()).run().unwrap_err();
    assert!(!err.is_recoverable());
    assert!(err.to_string().contains("esbuild-snapshots"));
}

#[test]
fn test_second_run_is_byte_identical() {
    let ws = Workspace::new();
    scenario_x(&ws);
    ws.write_snapshot(
        "snapshots_Y.txt",
        &[
            case("C", &[("main.js", "a")]),
            case("D", &[("main.js", "ok")]),
        ],
    );
    ws.write_artifact("Y", "C", &[("main.js", "b")]);
    ws.write_artifact("Y", "D", &[("main.js", "ok")]);
    ws.write_case_file("Y", "C", "bypass.md", "# Reason\n- renamed\n- reordered\n");
    ws.write_case_file("X", "B", "diff.md", "# Reason\n- reordered\n");

    let first_report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let first = ws.tree();
    let second_report = SnapDiffRunner::new(ws.config()).run().unwrap();
    let second = ws.tree();

    assert_eq!(first, second);
    assert_eq!(first_report.global, second_report.global);
    assert_eq!(first_report.reasons, second_report.reasons);
    assert_eq!(first_report.reasons[0].reason, "reordered");
    assert_eq!(first_report.reasons[0].case_dirs.len(), 2);
}
