//! Decoder for the aggregated esbuild snapshot format.
//!
//! ```text
//! ================================================================================
//! TestCaseName
//! ---------- /out/entry.js ----------
//! console.log(1);
//!
//! ---------- /out/other.js ----------
//! ...
//! ```
//!
//! Text before the first separator is ignored. Payloads are trimmed.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::{SubOutput, TestCase};
use crate::SnapDiffError;

/// A line of exactly 80 `=` characters separates cases.
pub const CASE_SEPARATOR: &str =
    "================================================================================";

static SUB_OUTPUT_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-{10}\s*(.+?)\s*-{10}$").expect("sub-output header regex"));

/// Parses a reference snapshot, yielding an empty list when no case boundary is found.
pub fn parse_reference_snapshot(text: &str) -> Vec<TestCase> {
    try_parse_reference_snapshot("", text).unwrap_or_default()
}

/// Parses a reference snapshot, reporting `MalformedSnapshot` when the document
/// has no case separator at all.
pub fn try_parse_reference_snapshot(
    category: &str,
    text: &str,
) -> Result<Vec<TestCase>, SnapDiffError> {
    let Some(blocks) = split_blocks(text) else {
        return Err(SnapDiffError::MalformedSnapshot {
            category: category.to_string(),
        });
    };

    let mut seen = HashSet::new();
    let mut cases = Vec::with_capacity(blocks.len());
    for block in blocks {
        let Some(case) = parse_block(&block) else {
            continue;
        };
        if !seen.insert(case.name.clone()) {
            warn!(category, case = %case.name, "duplicate case name, keeping the first block");
            continue;
        }
        cases.push(case);
    }
    Ok(cases)
}

/// Writes cases back in the reference format.
pub fn render_reference_snapshot(cases: &[TestCase]) -> String {
    let mut out = String::new();
    for case in cases {
        out.push_str(CASE_SEPARATOR);
        out.push('\n');
        out.push_str(&case.name);
        out.push('\n');
        for output in &case.outputs {
            out.push_str(&format!("---------- {} ----------\n", output.name));
            out.push_str(&output.content);
            out.push_str("\n\n");
        }
        if case.outputs.is_empty() {
            out.push('\n');
        }
    }
    out
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn split_blocks(text: &str) -> Option<Vec<Vec<&str>>> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in text.lines() {
        if line.trim_end() == CASE_SEPARATOR {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(Vec::new());
            continue;
        }
        if let Some(block) = current.as_mut() {
            block.push(line);
        }
    }

    let last = current?;
    blocks.push(last);
    Some(blocks)
}

fn parse_block(lines: &[&str]) -> Option<TestCase> {
    let mut rest = lines.iter().skip_while(|l| l.trim().is_empty());
    let name = rest.next()?.trim().to_string();
    if name.is_empty() {
        return None;
    }

    let mut outputs = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    for line in rest {
        if let Some(caps) = SUB_OUTPUT_HEADER.captures(line.trim_end()) {
            if let Some((name, body)) = current.take() {
                outputs.push(SubOutput::new(name, body.join("\n").trim()));
            }
            current = Some((caps[1].to_string(), Vec::new()));
            continue;
        }
        if let Some((_, body)) = current.as_mut() {
            body.push(*line);
        }
    }
    if let Some((name, body)) = current {
        outputs.push(SubOutput::new(name, body.join("\n").trim()));
    }

    Some(TestCase { name, outputs })
}
