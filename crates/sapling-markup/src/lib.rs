//! Markup parser and tree printer for Sapling.
//!
//! # Scope
//!
//! This crate implements:
//! - **Parser** - a single forward pass over an in-memory buffer that builds
//!   an owned [`Node`] tree under a synthetic `root` element
//!   - Start and closing tags, double-quoted attributes, trimmed text runs
//!   - Closing tags checked against an explicit stack of open elements
//!   - Bounded nesting depth
//!   - Lenient recovery with recorded [`ParseIssue`]s, or strict failure
//!
//! - **Serializer** - renders a tree back to indented text, two spaces per
//!   level, one node per line
//!
//! # Not Implemented
//!
//! - Character references (`&amp;` and friends are left as written)
//! - Comments, DOCTYPE, CDATA
//! - Raw text elements (`script`, `style`)
//! - Void and self-closing elements
//! - Unquoted or single-quoted attribute values

/// Markup parser and tree construction.
pub mod parser;
/// Tree pretty-printer.
pub mod serializer;

pub use parser::{
    DEFAULT_MAX_DEPTH, IssueKind, MarkupParser, ParseError, ParseIssue, ParserOptions,
};
pub use sapling_dom::Node;
pub use serializer::{print_tree, render, write_tree};

/// Parse `input` with default options.
///
/// # Errors
///
/// Returns [`ParseError::NestingTooDeep`] if elements nest deeper than
/// [`DEFAULT_MAX_DEPTH`]. Other irregularities are absorbed into the tree.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    MarkupParser::new(input).run()
}

/// Parse `input` with default options, also returning recorded issues.
///
/// # Errors
///
/// Same as [`parse`].
pub fn parse_with_issues(input: &str) -> Result<(Node, Vec<ParseIssue>), ParseError> {
    MarkupParser::new(input).run_with_issues()
}
