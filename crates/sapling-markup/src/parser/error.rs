//! Parse failures and recorded parse issues.

use strum_macros::Display;
use thiserror::Error;

/// A malformed-input condition detected while scanning.
///
/// Every variant carries the byte offset into the input where the
/// offending construct starts. In lenient mode these are recorded as
/// [`ParseIssue`]s and parsing continues with a degraded tree; in strict
/// mode the first one is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// End of input before the `>` of a start or closing tag.
    #[error("unterminated tag <{tag_name}> at {position}")]
    UnterminatedTag {
        /// Name read so far (possibly empty).
        tag_name: String,
        /// Offset of the tag's `<`.
        position: usize,
    },

    /// End of input before the closing `"` of an attribute value.
    #[error("unterminated value for attribute \"{name}\" at {position}")]
    UnterminatedAttributeValue {
        /// Attribute whose value was being read.
        name: String,
        /// Offset of the opening quote.
        position: usize,
    },

    /// A character inside a tag that cannot start an attribute name, or
    /// anything after the name in a closing tag.
    #[error("stray character '{found}' in tag at {position}")]
    StrayCharacter {
        /// The skipped character.
        found: char,
        /// Offset of the character.
        position: usize,
    },

    /// `<` not followed by a tag name; the `<` is kept as text.
    #[error("expected a tag name after '<' at {position}")]
    MissingTagName {
        /// Offset of the `<`.
        position: usize,
    },

    /// Closing tag whose name differs from the innermost open element.
    #[error("expected \"</{expected}>\", found \"</{found}>\" at {position}")]
    MismatchedClosingTag {
        /// Name of the innermost open element.
        expected: String,
        /// Name in the closing tag.
        found: String,
        /// Offset of the closing tag's `<`.
        position: usize,
    },

    /// Closing tag with no element open.
    #[error("closing tag \"</{found}>\" has no open element at {position}")]
    UnmatchedClosingTag {
        /// Name in the closing tag.
        found: String,
        /// Offset of the closing tag's `<`.
        position: usize,
    },

    /// End of input reached while an element was still open.
    #[error("element <{tag_name}> is never closed at {position}")]
    UnclosedElement {
        /// Name of the open element.
        tag_name: String,
        /// Offset of the end of input.
        position: usize,
    },

    /// More elements open at once than the configured limit.
    #[error("nesting deeper than {limit} elements at {position}")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
        /// Offset of the start tag that exceeded it.
        position: usize,
    },
}

impl ParseError {
    /// The category of this error.
    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        match self {
            Self::UnterminatedTag { .. } => IssueKind::UnterminatedTag,
            Self::UnterminatedAttributeValue { .. } => IssueKind::UnterminatedAttributeValue,
            Self::StrayCharacter { .. } => IssueKind::StrayCharacter,
            Self::MissingTagName { .. } => IssueKind::MissingTagName,
            Self::MismatchedClosingTag { .. } => IssueKind::MismatchedClosingTag,
            Self::UnmatchedClosingTag { .. } => IssueKind::UnmatchedClosingTag,
            Self::UnclosedElement { .. } => IssueKind::UnclosedElement,
            Self::NestingTooDeep { .. } => IssueKind::NestingTooDeep,
        }
    }

    /// Byte offset into the input where the problem was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnterminatedTag { position, .. }
            | Self::UnterminatedAttributeValue { position, .. }
            | Self::StrayCharacter { position, .. }
            | Self::MissingTagName { position }
            | Self::MismatchedClosingTag { position, .. }
            | Self::UnmatchedClosingTag { position, .. }
            | Self::UnclosedElement { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }

    /// The message without its trailing position.
    ///
    /// Problems of the same shape at different offsets share a summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let message = self.to_string();
        let suffix = format!(" at {}", self.position());
        message
            .strip_suffix(suffix.as_str())
            .map_or_else(|| message.clone(), str::to_string)
    }
}

/// Category of a [`ParseError`] or [`ParseIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum IssueKind {
    /// See [`ParseError::UnterminatedTag`].
    UnterminatedTag,
    /// See [`ParseError::UnterminatedAttributeValue`].
    UnterminatedAttributeValue,
    /// See [`ParseError::StrayCharacter`].
    StrayCharacter,
    /// See [`ParseError::MissingTagName`].
    MissingTagName,
    /// See [`ParseError::MismatchedClosingTag`].
    MismatchedClosingTag,
    /// See [`ParseError::UnmatchedClosingTag`].
    UnmatchedClosingTag,
    /// See [`ParseError::UnclosedElement`].
    UnclosedElement,
    /// See [`ParseError::NestingTooDeep`].
    NestingTooDeep,
}

/// A recoverable irregularity recorded while building a degraded tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What went wrong.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Byte offset into the input.
    pub position: usize,
}

impl From<ParseError> for ParseIssue {
    fn from(error: ParseError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
            position: error.position(),
        }
    }
}
