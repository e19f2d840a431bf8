use super::markdown::{top_level_blocks, Block};
use crate::diagnostics::ReasonDocumentIssue;

/// Heading text that opens a reason section.
pub const REASON_HEADING: &str = "Reason";

/// Returns the verbatim source of every item in the document's reason lists.
///
/// A level-1 heading whose source reads `# Reason` opens the section and any other
/// level-1 heading closes it. The heading is compared as written, so emphasis or a
/// setext underline does not count. Top-level lists inside the section contribute one string per item:
/// the source slice of the item's first child, markup included.
pub fn extract_reasons(source: &str) -> Vec<String> {
    scan(source).reasons
}

/// Like [`extract_reasons`], but reports why a document yielded nothing.
pub fn try_extract_reasons(source: &str) -> Result<Vec<String>, ReasonDocumentIssue> {
    let scan = scan(source);
    if !scan.saw_heading {
        return Err(ReasonDocumentIssue::NoReasonHeading);
    }
    if !scan.saw_list {
        return Err(ReasonDocumentIssue::NoReasonList);
    }
    Ok(scan.reasons)
}

struct ReasonScan {
    reasons: Vec<String>,
    saw_heading: bool,
    saw_list: bool,
}

fn scan(source: &str) -> ReasonScan {
    let mut in_reason = false;
    let mut out = ReasonScan {
        reasons: Vec::new(),
        saw_heading: false,
        saw_list: false,
    };

    for block in top_level_blocks(source) {
        match block {
            Block::Heading { level: 1, span } => {
                in_reason = heading_text(&source[span]) == REASON_HEADING;
                out.saw_heading |= in_reason;
            }
            Block::List { items } if in_reason => {
                out.saw_list = true;
                out.reasons.extend(
                    items
                        .into_iter()
                        .map(|span| source[span].trim_end().to_string()),
                );
            }
            _ => {}
        }
    }

    out
}

/// Drops the leading marker character of a heading's trimmed source.
fn heading_text(raw: &str) -> &str {
    let mut chars = raw.trim().chars();
    chars.next();
    chars.as_str().trim()
}
