//! Decoder for rolldown's per-case `artifacts.snap`.
//!
//! The file is an insta snapshot whose body is markdown:
//!
//! ````text
//! ---
//! source: crates/rolldown_testing/src/integration_test.rs
//! ---
//! # Assets
//!
//! ## entry_js.mjs
//!
//! ```js
//! console.log(1);
//! ```
//! ````
//!
//! Only the `# Assets` section is read when it exists. Every `## <name>` heading
//! followed by a fenced block becomes one sub-output.

use super::{ActualRecord, SubOutput};

/// Parses an artifact file. `None` means the case has no artifact yet.
pub fn parse_actual_snapshot(text: Option<&str>) -> Option<ActualRecord> {
    text.map(parse_artifact)
}

pub fn parse_artifact(text: &str) -> ActualRecord {
    let lines: Vec<&str> = skip_front_matter(text).lines().collect();
    let has_assets = scan(&lines).any(|(fenced, line)| !fenced && is_assets_heading(line));

    let mut outputs = Vec::new();
    let mut in_section = !has_assets;
    let mut pending_name: Option<String> = None;
    let mut fence: Option<OpenFence> = None;

    for line in lines.iter().copied() {
        if let Some(mut open) = fence.take() {
            if closes(&open.marker, line) {
                if let Some(name) = open.name {
                    outputs.push(SubOutput::new(name, open.body.join("\n").trim()));
                }
            } else {
                open.body.push(line);
                fence = Some(open);
            }
            continue;
        }

        if let Some(marker) = fence_marker(line) {
            let name = if in_section { pending_name.take() } else { None };
            fence = Some(OpenFence {
                marker,
                name,
                body: Vec::new(),
            });
            continue;
        }

        if let Some(title) = line.strip_prefix("# ") {
            in_section = !has_assets || title.trim() == "Assets";
            pending_name = None;
        } else if let Some(title) = line.strip_prefix("## ") {
            pending_name = Some(title.trim().to_string());
        }
    }

    ActualRecord { outputs }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

struct OpenFence<'a> {
    marker: String,
    name: Option<String>,
    body: Vec<&'a str>,
}

fn skip_front_matter(text: &str) -> &str {
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return text;
    };
    if first.trim_end() != "---" {
        return text;
    }
    offset += first.len();
    for line in lines {
        offset += line.len();
        if line.trim_end() == "---" {
            return &text[offset..];
        }
    }
    text
}

fn is_assets_heading(line: &str) -> bool {
    line.strip_prefix("# ")
        .is_some_and(|title| title.trim() == "Assets")
}

fn fence_marker(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let ch = trimmed.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }
    let run = trimmed.chars().take_while(|c| *c == ch).count();
    (run >= 3).then(|| ch.to_string().repeat(run))
}

fn closes(marker: &str, line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(marker) && trimmed.trim_start_matches(marker.as_bytes()[0] as char).is_empty()
}

/// Yields each line with whether it sits inside (or delimits) a fenced block.
fn scan<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = (bool, &'a str)> + 'a {
    let mut open: Option<String> = None;
    lines.iter().map(move |line| {
        if let Some(marker) = open.as_ref() {
            if closes(marker, line) {
                open = None;
            }
            return (true, *line);
        }
        if let Some(marker) = fence_marker(line) {
            open = Some(marker);
            return (true, *line);
        }
        (false, *line)
    })
}
