use sapling_common::warning::warn_once;
use sapling_dom::{AttributesMap, ElementData, Node, ROOT_TAG_NAME};

use super::error::{ParseError, ParseIssue};

/// Default limit on simultaneously open elements.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Knobs for a [`MarkupParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of elements open at once. Exceeding it always fails.
    pub max_depth: usize,
    /// Fail on the first irregularity instead of recording it.
    pub strict: bool,
    /// Echo recorded issues through the shared warning system.
    pub emit_warnings: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
            emit_warnings: false,
        }
    }
}

/// Single-pass markup parser.
///
/// Scans the input once, left to right, with one forward-only cursor, and
/// builds an owned tree under a synthetic `root` element. Nesting is tracked
/// with an explicit stack of open elements rather than recursion, so input
/// depth is bounded by [`ParserOptions::max_depth`] instead of the call stack.
///
/// A parser is consumed by [`run`](Self::run); parse another buffer with a
/// fresh instance.
pub struct MarkupParser<'a> {
    /// The buffer being parsed. Never modified.
    pub(super) input: &'a str,

    /// Byte offset of the next unread character.
    pub(super) current_pos: usize,

    /// The synthetic container every top-level node is appended to.
    root: ElementData,

    /// Elements whose start tag has been read but whose closing tag has not.
    /// The innermost element is last.
    stack_of_open_elements: Vec<ElementData>,

    /// Irregularities recorded so far (lenient mode only).
    issues: Vec<ParseIssue>,

    options: ParserOptions,
}

impl<'a> MarkupParser<'a> {
    /// Create a parser over `input` with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            current_pos: 0,
            root: ElementData::new(ROOT_TAG_NAME),
            stack_of_open_elements: Vec::new(),
            issues: Vec::new(),
            options: ParserOptions::default(),
        }
    }

    /// Replace all options at once.
    #[must_use]
    pub const fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable strict mode - the first irregularity becomes an error.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.options.strict = true;
        self
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Echo issues to stderr through `sapling_common::warning`.
    #[must_use]
    pub const fn with_warnings(mut self) -> Self {
        self.options.emit_warnings = true;
        self
    }
}

impl MarkupParser<'_> {
    /// Run the parser and return the synthetic root.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NestingTooDeep`] when the depth limit is
    /// exceeded. In strict mode, returns the first irregularity found.
    pub fn run(self) -> Result<Node, ParseError> {
        self.run_with_issues().map(|(root, _)| root)
    }

    /// Run the parser and return both the root and any recorded issues.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with_issues(mut self) -> Result<(Node, Vec<ParseIssue>), ParseError> {
        self.parse_node_sequence()?;
        self.close_all_open_elements()?;
        Ok((Node::Element(self.root), self.issues))
    }

    /// Record a recoverable irregularity, or fail with it in strict mode.
    fn parse_error(&mut self, error: ParseError) -> Result<(), ParseError> {
        if self.options.strict {
            return Err(error);
        }
        if self.options.emit_warnings {
            warn_once(
                "Markup Parser",
                &format!("{}: {}", error.kind(), error.summary()),
            );
        }
        self.issues.push(error.into());
        Ok(())
    }

    /// Append a finished node to the innermost open element.
    fn insert_node(&mut self, node: Node) {
        match self.stack_of_open_elements.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.children.push(node),
        }
    }

    // =========================================================================
    // Productions
    // =========================================================================

    /// Node sequence: whitespace, then a closing tag, an element, or text,
    /// until end of input.
    ///
    /// Every iteration consumes at least one character: whitespace is skipped
    /// up front, and each branch starts by consuming `<` or a non-`<` text run.
    fn parse_node_sequence(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.is_eof() {
                return Ok(());
            }
            if self.peek() == Some('<') {
                if self.peek_at(1) == Some('/') {
                    self.parse_closing_tag()?;
                } else {
                    self.parse_element()?;
                }
            } else {
                let start = self.current_pos;
                self.parse_text(start);
            }
        }
    }

    /// Start tag: `<`, name, attributes, `>`.
    ///
    /// On `>` the element is pushed onto the stack of open elements and its
    /// children are collected by the surrounding node sequence. Without `>`
    /// (end of input) it is inserted as-is with no children.
    fn parse_element(&mut self) -> Result<(), ParseError> {
        let position = self.current_pos;
        let _ = self.consume_if('<');

        let tag_name = self.parse_tag_name();
        if tag_name.is_empty() {
            // Not a tag: keep the '<' as the start of a text run.
            self.parse_error(ParseError::MissingTagName { position })?;
            self.parse_text(position);
            return Ok(());
        }

        let attrs = self.parse_attributes(&tag_name)?;
        let element = ElementData {
            tag_name,
            attrs,
            children: Vec::new(),
        };

        if self.consume_if('>') {
            if self.stack_of_open_elements.len() >= self.options.max_depth {
                return Err(ParseError::NestingTooDeep {
                    limit: self.options.max_depth,
                    position,
                });
            }
            self.stack_of_open_elements.push(element);
        } else {
            self.parse_error(ParseError::UnterminatedTag {
                tag_name: element.tag_name.clone(),
                position,
            })?;
            self.insert_node(Node::Element(element));
        }
        Ok(())
    }

    /// Closing tag: `</`, name, `>`. Closes the innermost open element.
    ///
    /// The name is checked against the innermost open element. On mismatch
    /// that element is closed anyway; a closing tag with nothing open is
    /// dropped. Content between the name and `>` is skipped.
    fn parse_closing_tag(&mut self) -> Result<(), ParseError> {
        let position = self.current_pos;
        let _ = self.consume_if('<');
        let _ = self.consume_if('/');
        let found = self.parse_tag_name();
        self.skip_whitespace();

        // Anything else before '>' is dropped; a '<' starts the next token.
        let extra_start = self.current_pos;
        if let Some(stray) = self.consume_while(|c| c != '>' && c != '<').chars().next() {
            self.parse_error(ParseError::StrayCharacter {
                found: stray,
                position: extra_start,
            })?;
        }

        if !self.consume_if('>') {
            self.parse_error(ParseError::UnterminatedTag {
                tag_name: found.clone(),
                position,
            })?;
        }

        let Some(element) = self.stack_of_open_elements.pop() else {
            return self.parse_error(ParseError::UnmatchedClosingTag { found, position });
        };

        if element.tag_name != found {
            self.parse_error(ParseError::MismatchedClosingTag {
                expected: element.tag_name.clone(),
                found,
                position,
            })?;
        }
        self.insert_node(Node::Element(element));
        Ok(())
    }

    /// Attribute list, up to (not including) `>` or end of input.
    ///
    /// A character that cannot start a name is skipped, so the loop always
    /// advances. Repeated names keep their first position and last value.
    fn parse_attributes(&mut self, tag_name: &str) -> Result<AttributesMap, ParseError> {
        let mut attrs = AttributesMap::new();
        loop {
            self.skip_whitespace();
            let position = self.current_pos;
            if matches!(self.peek(), None | Some('>')) {
                return Ok(attrs);
            }

            let name = self.parse_tag_name();
            if name.is_empty() {
                if let Some(found) = self.consume() {
                    self.parse_error(ParseError::StrayCharacter { found, position })?;
                }
                continue;
            }

            self.skip_whitespace();
            let value = if self.consume_if('=') {
                self.skip_whitespace();
                self.parse_attribute_value(&name)?
            } else {
                String::new()
            };
            let _ = attrs.insert(name, value);

            debug_assert!(
                self.current_pos > position,
                "attribute scan in <{tag_name}> made no progress"
            );
        }
    }

    /// Attribute value after `=`. Only double-quoted values are recognised;
    /// anything else yields the empty string and leaves the cursor alone.
    fn parse_attribute_value(&mut self, name: &str) -> Result<String, ParseError> {
        let position = self.current_pos;
        let (value, terminated) = self.parse_quoted_value();
        if !terminated {
            self.parse_error(ParseError::UnterminatedAttributeValue {
                name: name.to_string(),
                position,
            })?;
        }
        Ok(value)
    }

    /// Text run from `start` to the next `<` (or end of input), trimmed.
    /// Pure whitespace produces no node.
    fn parse_text(&mut self, start: usize) {
        let input = self.input;
        let _ = self.consume_while(|c| c != '<');
        let content = input[start..self.current_pos].trim();
        if !content.is_empty() {
            self.insert_node(Node::text(content));
        }
    }

    /// End of input: every element still open is closed implicitly, innermost
    /// first.
    fn close_all_open_elements(&mut self) -> Result<(), ParseError> {
        while let Some(element) = self.stack_of_open_elements.pop() {
            self.parse_error(ParseError::UnclosedElement {
                tag_name: element.tag_name.clone(),
                position: self.current_pos,
            })?;
            self.insert_node(Node::Element(element));
        }
        Ok(())
    }
}
