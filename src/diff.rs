//! # Diff Engine
//!
//! Compares one reference [`TestCase`] against its [`ActualRecord`], sub-output by
//! sub-output, keyed by name. Line diffs come from `difference::Changeset` and are
//! rendered as a unified patch.

use std::collections::HashSet;

use difference::{Changeset, Difference};

use crate::snapshot::{ActualRecord, TestCase};

/// Lines of unchanged context around each hunk.
pub const CONTEXT_LINES: usize = 3;

/// One sub-output whose text (or presence) differs between the two sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub name: String,
    /// `None` when only the actual side has this sub-output.
    pub reference: Option<String>,
    /// `None` when only the reference side has this sub-output.
    pub actual: Option<String>,
    pub unified_diff: String,
}

/// Result of comparing a reference case with its actual record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// No actual record exists for the case.
    Missing,
    /// Every sub-output matches.
    Same,
    /// At least one sub-output differs; entries are never empty.
    Differs(Vec<DiffEntry>),
}

impl DiffOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            DiffOutcome::Missing => "missing",
            DiffOutcome::Same => "same",
            DiffOutcome::Differs(_) => "differs",
        }
    }
}

/// Compares a reference case against the actual record, if any.
///
/// Entries follow reference order, then actual-only sub-outputs in actual order.
pub fn diff_case(case: &TestCase, actual: Option<&ActualRecord>) -> DiffOutcome {
    let Some(actual) = actual else {
        return DiffOutcome::Missing;
    };

    let mut entries = Vec::new();
    for expected in &case.outputs {
        let found = actual.get(&expected.name).map(|o| o.content.as_str());
        if found == Some(expected.content.as_str()) {
            continue;
        }
        entries.push(make_entry(&expected.name, Some(&expected.content), found));
    }

    let reference_names: HashSet<&str> = case.outputs.iter().map(|o| o.name.as_str()).collect();
    let mut seen_actual = HashSet::new();
    for extra in &actual.outputs {
        if reference_names.contains(extra.name.as_str()) || !seen_actual.insert(&extra.name) {
            continue;
        }
        entries.push(make_entry(&extra.name, None, Some(&extra.content)));
    }

    if entries.is_empty() {
        DiffOutcome::Same
    } else {
        DiffOutcome::Differs(entries)
    }
}

fn make_entry(name: &str, reference: Option<&str>, actual: Option<&str>) -> DiffEntry {
    DiffEntry {
        name: name.to_string(),
        reference: reference.map(str::to_string),
        actual: actual.map(str::to_string),
        unified_diff: unified_diff(name, reference.unwrap_or(""), actual.unwrap_or("")),
    }
}

// ============================================================================
// UNIFIED DIFF RENDERING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineOp {
    Same(String),
    Rem(String),
    Add(String),
}

impl LineOp {
    fn is_change(&self) -> bool {
        !matches!(self, LineOp::Same(_))
    }

    fn in_old(&self) -> bool {
        !matches!(self, LineOp::Add(_))
    }

    fn in_new(&self) -> bool {
        !matches!(self, LineOp::Rem(_))
    }

    fn render(&self) -> String {
        match self {
            LineOp::Same(x) => format!(" {}", x),
            LineOp::Rem(x) => format!("-{}", x),
            LineOp::Add(x) => format!("+{}", x),
        }
    }
}

/// Renders a unified patch from `reference` to `actual`. Returns an empty string
/// when the texts are equal.
pub fn unified_diff(name: &str, reference: &str, actual: &str) -> String {
    let ops = line_ops(reference, actual);
    let changes: Vec<usize> = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_change())
        .map(|(i, _)| i)
        .collect();
    if changes.is_empty() {
        return String::new();
    }

    // old_pos[i] / new_pos[i]: lines of each side consumed before op i.
    let mut old_pos = Vec::with_capacity(ops.len() + 1);
    let mut new_pos = Vec::with_capacity(ops.len() + 1);
    let (mut o, mut n) = (0usize, 0usize);
    for op in &ops {
        old_pos.push(o);
        new_pos.push(n);
        o += op.in_old() as usize;
        n += op.in_new() as usize;
    }
    old_pos.push(o);
    new_pos.push(n);

    let mut groups: Vec<(usize, usize)> = Vec::new();
    for i in changes {
        if let Some((_, end)) = groups.last_mut() {
            if i - *end <= 2 * CONTEXT_LINES + 1 {
                *end = i;
                continue;
            }
        }
        groups.push((i, i));
    }

    let mut out = vec![
        format!("--- esbuild\t{}", name),
        format!("+++ rolldown\t{}", name),
    ];
    for (first, last) in groups {
        let start = first.saturating_sub(CONTEXT_LINES);
        let stop = (last + CONTEXT_LINES + 1).min(ops.len());
        let old_count = old_pos[stop] - old_pos[start];
        let new_count = new_pos[stop] - new_pos[start];
        out.push(format!(
            "@@ -{} +{} @@",
            hunk_range(old_pos[start], old_count),
            hunk_range(new_pos[start], new_count)
        ));
        out.extend(ops[start..stop].iter().map(LineOp::render));
    }
    out.join("\n")
}

fn hunk_range(pos: usize, count: usize) -> String {
    let start = if count == 0 { pos } else { pos + 1 };
    format!("{},{}", start, count)
}

fn line_ops(old: &str, new: &str) -> Vec<LineOp> {
    if old.is_empty() && new.is_empty() {
        return Vec::new();
    }
    if old.is_empty() {
        return split_lines(new).map(LineOp::Add).collect();
    }
    if new.is_empty() {
        return split_lines(old).map(LineOp::Rem).collect();
    }

    let changeset = Changeset::new(old, new, "\n");
    let mut ops = Vec::new();
    for diff in changeset.diffs {
        match diff {
            Difference::Same(ref x) => ops.extend(split_lines(x).map(LineOp::Same)),
            Difference::Rem(ref x) => ops.extend(split_lines(x).map(LineOp::Rem)),
            Difference::Add(ref x) => ops.extend(split_lines(x).map(LineOp::Add)),
        }
    }
    ops
}

fn split_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split('\n').map(str::to_string)
}
