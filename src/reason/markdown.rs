//! Flattens a markdown document into its ordered top-level blocks.
//!
//! Only what reason extraction needs survives: level-1..6 headings with their source
//! span, and lists with the source span of each item's first child. Everything else is
//! [`Block::Other`].

use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};

/// One top-level block of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `span` covers the raw heading source, markers included.
    Heading { level: u8, span: Range<usize> },
    /// Source span of each item's first child, in item order. Items with no
    /// content are omitted.
    List { items: Vec<Range<usize>> },
    Other,
}

/// Parses `source` and returns its top-level blocks in document order.
pub fn top_level_blocks(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut current: Option<BlockBuilder> = None;

    for (event, range) in Parser::new(source).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    current = Some(BlockBuilder::open(&tag, range));
                } else if let Some(BlockBuilder::List { item, .. }) = current.as_mut() {
                    if depth == 1 {
                        *item = Some(ItemSpan::default());
                    } else if depth == 2 {
                        if let Some(item) = item.as_mut() {
                            item.observe(range, !is_inline(&tag));
                        }
                    }
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some(builder) = current.take() {
                        blocks.push(builder.finish());
                    }
                } else if depth == 1 {
                    if let Some(BlockBuilder::List { items, item }) = current.as_mut() {
                        if let Some(span) = item.take().and_then(|i| i.span) {
                            items.push(span);
                        }
                    }
                }
            }
            _ => {
                if depth == 0 {
                    blocks.push(Block::Other);
                    continue;
                }
                if let Some(BlockBuilder::List {
                    item: Some(item), ..
                }) = current.as_mut()
                {
                    if depth == 2 {
                        item.observe(range, false);
                    }
                }
            }
        }
    }

    blocks
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

enum BlockBuilder {
    Heading {
        level: u8,
        span: Range<usize>,
    },
    List {
        items: Vec<Range<usize>>,
        item: Option<ItemSpan>,
    },
    Other,
}

impl BlockBuilder {
    fn open(tag: &Tag<'_>, range: Range<usize>) -> Self {
        match tag {
            Tag::Heading { level, .. } => BlockBuilder::Heading {
                level: heading_depth(*level),
                span: range,
            },
            Tag::List(_) => BlockBuilder::List {
                items: Vec::new(),
                item: None,
            },
            _ => BlockBuilder::Other,
        }
    }

    fn finish(self) -> Block {
        match self {
            BlockBuilder::Heading { level, span } => Block::Heading { level, span },
            BlockBuilder::List { items, .. } => Block::List { items },
            BlockBuilder::Other => Block::Other,
        }
    }
}

/// Tracks the first child of a list item.
///
/// Loose items open with a paragraph (or another block) whose span is taken whole.
/// Tight items carry inline events directly; their span runs from the first inline
/// event to the last one before a nested block or the end of the item.
#[derive(Debug, Default)]
struct ItemSpan {
    span: Option<Range<usize>>,
    done: bool,
}

impl ItemSpan {
    fn observe(&mut self, range: Range<usize>, is_block: bool) {
        if self.done {
            return;
        }
        match (self.span.as_mut(), is_block) {
            (None, true) => {
                self.span = Some(range);
                self.done = true;
            }
            (None, false) => self.span = Some(range),
            (Some(_), true) => self.done = true,
            (Some(span), false) => span.end = span.end.max(range.end),
        }
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}
