//! Element/text tree for the Sapling markup parser.
//!
//! # Design
//!
//! The tree is a strict forest of owned values: every [`ElementData`] owns its
//! `children` vector, so dropping a node drops its whole subtree. There is no
//! parent pointer and no sharing, which keeps the tree trivially acyclic.
//! Dropping and [`Node::descendants`] both walk the tree with an explicit
//! stack, so nesting depth is not limited by the call stack.
//!
//! A node's kind is the enum variant it was built as and cannot change. Text
//! nodes have no place to store children or attributes, and elements have no
//! place to store text.

use std::mem;

use indexmap::IndexMap;
use serde::Serialize;
use strum_macros::Display;

/// Map of attribute names to values for an element.
///
/// Iteration follows source order (first occurrence of each name).
/// Equality compares as a mapping and ignores order.
pub type AttributesMap = IndexMap<String, String>;

/// Tag name of the synthetic container returned by a top-level parse.
///
/// It corresponds to no token in the input. Note that a document may still
/// contain a literal `<root>` element of its own.
pub const ROOT_TAG_NAME: &str = "root";

/// The kind of a [`Node`], fixed when the node is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A tagged construct with a name, attributes and children.
    Element,
    /// Trimmed character content between tags.
    Text,
}

/// A node of the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// An element node.
    Element(ElementData),
    /// A text node holding its trimmed content.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementData {
    /// The identifier between the angle brackets, as written.
    pub tag_name: String,
    /// Attributes in source order.
    pub attrs: AttributesMap,
    /// Child nodes in document order. Empty, never absent, for a leaf element.
    pub children: Vec<Node>,
}

impl ElementData {
    /// Create an element with no attributes and no children.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
            children: Vec::new(),
        }
    }

    /// Returns the value of the named attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

impl Drop for ElementData {
    fn drop(&mut self) {
        // Flatten the subtree so each element drops with no children left.
        let mut pending = mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut data) = node {
                pending.append(&mut data.children);
            }
        }
    }
}

impl Node {
    /// Create an empty element node.
    #[must_use]
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::Element(ElementData::new(tag_name))
    }

    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create the synthetic root container.
    #[must_use]
    pub fn root() -> Self {
        Self::element(ROOT_TAG_NAME)
    }

    /// The kind this node was built as.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) => Some(data),
            Self::Text(_) => None,
        }
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(content),
            Self::Element(_) => None,
        }
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|data| data.tag_name.as_str())
    }

    /// Attribute lookup on an element node. Always `None` for text.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|data| data.attr(name))
    }

    /// Children of an element; text nodes have none.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element(data) => &data.children,
            Self::Text(_) => &[],
        }
    }

    /// Concatenated content of every text node in this subtree, in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.descendants()
            .filter_map(Self::as_text)
            .collect()
    }

    /// First element with the given tag name, depth-first, starting with `self`.
    #[must_use]
    pub fn find_element(&self, tag_name: &str) -> Option<&Self> {
        self.descendants()
            .find(|node| node.tag_name() == Some(tag_name))
    }

    /// Pre-order iterator over this node and everything below it.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree, see [`Node::descendants`].
///
/// Uses an explicit stack so deep trees cannot overflow the call stack.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
