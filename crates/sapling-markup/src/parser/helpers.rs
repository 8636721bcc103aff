//! Scanning primitives for the markup parser.
//!
//! This module contains the cursor operations the productions in
//! [`super::core`] are composed from:
//! - Lookahead ("is the next character...")
//! - Consumption (single characters, conditional characters, runs)
//! - Identifier and quoted-value reads
//!
//! The cursor is a byte offset into the input that only ever moves forward
//! and always rests on a `char` boundary.

use super::core::MarkupParser;

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<'a> MarkupParser<'a> {
    /// Peek at the character under the cursor without consuming it.
    pub(super) fn peek(&self) -> Option<char> {
        self.input[self.current_pos..].chars().next()
    }

    /// Peek at the character `offset` characters past the cursor.
    pub(super) fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Whether the cursor has reached the end of input.
    pub(super) const fn is_eof(&self) -> bool {
        self.current_pos >= self.input.len()
    }

    /// Consume the character under the cursor.
    ///
    /// Returns `None` (and does not move) at end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Consume `expected` if the cursor sits on it.
    pub(super) fn consume_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current_pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume the maximal run of characters matching `predicate` and
    /// return it as a slice of the input.
    pub(super) fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.current_pos;
        let rest = &input[start..];
        let len = rest
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(rest.len(), |(i, _)| i);
        self.current_pos += len;
        &input[start..self.current_pos]
    }

    /// Advance over any run of whitespace. Never moves past end of input.
    pub(super) fn skip_whitespace(&mut self) {
        let _ = self.consume_while(char::is_whitespace);
    }
}

// =============================================================================
// Token Helpers
// =============================================================================

impl MarkupParser<'_> {
    /// Consume a maximal run of alphanumeric characters.
    ///
    /// Returns an empty string, without moving, when the cursor is not on an
    /// identifier character. Callers must handle that case to guarantee
    /// forward progress.
    pub(super) fn parse_tag_name(&mut self) -> String {
        self.consume_while(char::is_alphanumeric).to_string()
    }

    /// Read a double-quoted value.
    ///
    /// Returns the empty string without moving unless the cursor sits on `"`.
    /// The second element is `false` when input ended before the closing quote,
    /// in which case the value runs to end of input.
    pub(super) fn parse_quoted_value(&mut self) -> (String, bool) {
        if !self.consume_if('"') {
            return (String::new(), true);
        }
        let value = self.consume_while(|c| c != '"').to_string();
        let terminated = self.consume_if('"');
        (value, terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_steps_over_multibyte_characters() {
        let mut parser = MarkupParser::new("é<");
        assert_eq!(parser.consume(), Some('é'));
        assert_eq!(parser.current_pos, 2);
        assert_eq!(parser.peek(), Some('<'));
        assert_eq!(parser.consume(), Some('<'));
        assert_eq!(parser.consume(), None);
        assert!(parser.is_eof());
    }

    #[test]
    fn peek_at_looks_ahead_by_characters() {
        let parser = MarkupParser::new("</a>");
        assert_eq!(parser.peek_at(1), Some('/'));
        assert_eq!(parser.peek_at(4), None);
    }

    #[test]
    fn skip_whitespace_stops_at_end_of_input() {
        let mut parser = MarkupParser::new(" \t\r\n ");
        parser.skip_whitespace();
        assert!(parser.is_eof());
        parser.skip_whitespace();
        assert_eq!(parser.current_pos, 5);
    }

    #[test]
    fn tag_name_is_alphanumeric_run() {
        let mut parser = MarkupParser::new("h1 class");
        assert_eq!(parser.parse_tag_name(), "h1");
        assert_eq!(parser.peek(), Some(' '));
    }

    #[test]
    fn tag_name_on_non_identifier_does_not_move() {
        let mut parser = MarkupParser::new("/>");
        assert_eq!(parser.parse_tag_name(), "");
        assert_eq!(parser.current_pos, 0);
    }

    #[test]
    fn quoted_value_requires_opening_quote() {
        let mut parser = MarkupParser::new("bare>");
        assert_eq!(parser.parse_quoted_value(), (String::new(), true));
        assert_eq!(parser.current_pos, 0);
    }

    #[test]
    fn quoted_value_consumes_both_quotes() {
        let mut parser = MarkupParser::new("\"a logo\">");
        assert_eq!(parser.parse_quoted_value(), ("a logo".to_string(), true));
        assert_eq!(parser.peek(), Some('>'));
    }

    #[test]
    fn unterminated_quoted_value_runs_to_end_of_input() {
        let mut parser = MarkupParser::new("\"x.png>");
        assert_eq!(parser.parse_quoted_value(), ("x.png>".to_string(), false));
        assert!(parser.is_eof());
    }
}
