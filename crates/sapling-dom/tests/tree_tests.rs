//! Tests for tree construction, accessors and traversal.

use sapling_dom::{ElementData, Node, NodeKind, ROOT_TAG_NAME};

/// Helper to build an element with the given children.
fn element_with(tag: &str, children: Vec<Node>) -> Node {
    let mut data = ElementData::new(tag);
    data.children = children;
    Node::Element(data)
}

/// `<div><p>Hello</p><span>World</span></div>`
fn sample_tree() -> Node {
    element_with(
        "div",
        vec![
            element_with("p", vec![Node::text("Hello")]),
            element_with("span", vec![Node::text("World")]),
        ],
    )
}

// ========== kinds and accessors ==========

#[test]
fn test_kind_is_fixed_by_variant() {
    assert_eq!(Node::element("a").kind(), NodeKind::Element);
    assert_eq!(Node::text("hi").kind(), NodeKind::Text);
    assert_eq!(NodeKind::Element.to_string(), "element");
    assert_eq!(NodeKind::Text.to_string(), "text");
}

#[test]
fn test_root_uses_reserved_tag_name() {
    let root = Node::root();
    assert_eq!(root.tag_name(), Some(ROOT_TAG_NAME));
    assert!(root.children().is_empty());
}

#[test]
fn test_text_node_has_no_children_or_attributes() {
    let text = Node::text("content");
    assert!(text.children().is_empty());
    assert_eq!(text.attr("id"), None);
    assert_eq!(text.tag_name(), None);
    assert_eq!(text.as_text(), Some("content"));
    assert!(text.as_element().is_none());
}

#[test]
fn test_attribute_lookup() {
    let mut data = ElementData::new("img");
    let _ = data.attrs.insert("src".to_string(), "x.png".to_string());
    let node = Node::Element(data);

    assert_eq!(node.attr("src"), Some("x.png"));
    assert_eq!(node.attr("alt"), None);
}

#[test]
fn test_attribute_equality_ignores_order() {
    let mut first = ElementData::new("img");
    let _ = first.attrs.insert("src".to_string(), "x.png".to_string());
    let _ = first.attrs.insert("alt".to_string(), "a logo".to_string());

    let mut second = ElementData::new("img");
    let _ = second.attrs.insert("alt".to_string(), "a logo".to_string());
    let _ = second.attrs.insert("src".to_string(), "x.png".to_string());

    assert_eq!(first, second);
    // Iteration still follows insertion order.
    assert_eq!(first.attrs.keys().next().map(String::as_str), Some("src"));
}

// ========== traversal ==========

#[test]
fn test_descendants_are_pre_order() {
    let tree = sample_tree();
    let order: Vec<String> = tree
        .descendants()
        .map(|node| match node {
            Node::Element(data) => data.tag_name.clone(),
            Node::Text(content) => format!("\"{content}\""),
        })
        .collect();

    assert_eq!(order, ["div", "p", "\"Hello\"", "span", "\"World\""]);
}

#[test]
fn test_text_content_concatenates_in_document_order() {
    assert_eq!(sample_tree().text_content(), "HelloWorld");
}

#[test]
fn test_find_element_depth_first() {
    let tree = sample_tree();
    let span = tree.find_element("span").unwrap();
    assert_eq!(span.text_content(), "World");
    assert_eq!(tree.find_element("div"), Some(&tree));
    assert!(tree.find_element("table").is_none());
}

#[test]
fn test_deep_tree_traversal_does_not_recurse() {
    let mut node = Node::text("leaf");
    for _ in 0..10_000 {
        node = element_with("d", vec![node]);
    }
    assert_eq!(node.descendants().count(), 10_001);
    assert_eq!(node.text_content(), "leaf");
}

#[test]
fn test_dropping_deep_tree_does_not_recurse() {
    let mut node = Node::text("leaf");
    for _ in 0..200_000 {
        node = element_with("d", vec![node, Node::text("x")]);
    }
    drop(node);
}

// ========== serialization ==========

#[test]
fn test_json_shape() {
    let json = serde_json::to_value(sample_tree()).unwrap();
    assert_eq!(json["element"]["tag_name"], "div");
    assert_eq!(json["element"]["children"][0]["element"]["tag_name"], "p");
    assert_eq!(
        json["element"]["children"][0]["element"]["children"][0]["text"],
        "Hello"
    );
}
