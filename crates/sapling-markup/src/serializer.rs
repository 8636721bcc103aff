//! Indented text rendering of a parsed tree.
//!
//! Output shape, two spaces per level:
//!
//! ```text
//! <tag attr="value">
//!   <child>
//!     text content
//!   </child>
//! </tag>
//! ```
//!
//! Attributes are printed in source order. Values are written verbatim;
//! no character references are produced.

use std::io::{self, Write};

use sapling_dom::{ElementData, Node};

/// Render `node` and its subtree, starting at indentation level `depth`.
#[must_use]
pub fn render(node: &Node, depth: usize) -> String {
    let mut out = String::new();
    render_into(&mut out, node, depth);
    out
}

/// Write the rendering of `node` to `out`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_tree<W: Write>(out: &mut W, node: &Node, depth: usize) -> io::Result<()> {
    out.write_all(render(node, depth).as_bytes())
}

/// Print a tree to stdout for debugging.
pub fn print_tree(node: &Node, indent: usize) {
    print!("{}", render(node, indent));
}

/// One unit of rendering work: print a node, or close an element whose
/// children have all been printed.
enum Step<'a> {
    Enter(&'a Node, usize),
    Leave(&'a ElementData, usize),
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Pre-order walk with an explicit stack, so output depth is not limited by
/// the call stack.
fn render_into(out: &mut String, node: &Node, depth: usize) {
    let mut stack = vec![Step::Enter(node, depth)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(Node::Element(data), depth) => {
                push_indent(out, depth);
                out.push('<');
                out.push_str(&data.tag_name);
                for (name, value) in &data.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                out.push_str(">\n");

                stack.push(Step::Leave(data, depth));
                stack.extend(
                    data.children
                        .iter()
                        .rev()
                        .map(|child| Step::Enter(child, depth + 1)),
                );
            }
            Step::Enter(Node::Text(content), depth) => {
                push_indent(out, depth);
                out.push_str(content);
                out.push('\n');
            }
            Step::Leave(data, depth) => {
                push_indent(out, depth);
                out.push_str("</");
                out.push_str(&data.tag_name);
                out.push_str(">\n");
            }
        }
    }
}
