//! # Reason Mining
//!
//! Maintainers explain tolerated divergences in a case report's `# Reason` section:
//!
//! ```markdown
//! # Reason
//! 1. different chunk naming
//! 2. `require` is kept as is
//! # Diff
//! ...
//! ```
//!
//! - [`markdown`] flattens a document into its top-level blocks.
//! - [`extract`] recovers the list items of the `Reason` section verbatim.
//! - [`aggregate`] groups case directories by identical reason text across the test tree.

pub mod aggregate;
pub mod extract;
pub mod markdown;

pub use aggregate::{aggregate_documents, aggregate_reasons, ReasonEntry};
pub use extract::{extract_reasons, try_extract_reasons};
