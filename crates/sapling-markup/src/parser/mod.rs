//! Markup parser module for tree construction.

/// Parser state, options and the node-sequence/element/attribute productions.
pub mod core;
/// Parse errors and recorded issues.
pub mod error;
/// Cursor and scanning primitives.
mod helpers;

pub use self::core::{DEFAULT_MAX_DEPTH, MarkupParser, ParserOptions};
pub use self::error::{IssueKind, ParseError, ParseIssue};
