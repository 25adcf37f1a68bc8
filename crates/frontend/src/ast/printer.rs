use std::fmt::Write;

use super::{Function, Node, NodeRef};

const INDENT: &str = "  ";

// One line per node: the label, then its text if there is one. Children are
// indented under their parent.
pub fn render_tree(root: &dyn Node) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut Vec::new(), &mut out);
    out
}

// `callees` holds the functions expanded above the current node. A recursive
// call lists its callee without expanding it a second time.
fn render_node(
    node: &dyn Node,
    depth: usize,
    callees: &mut Vec<*const Function>,
    out: &mut String,
) {
    render_line(node, depth, out);

    for child in node.children() {
        match child {
            NodeRef::Function(function) => {
                let callee: *const Function = function;

                if callees.contains(&callee) {
                    render_line(&child, depth + 1, out);
                    continue;
                }

                callees.push(callee);
                render_node(&child, depth + 1, callees, out);
                callees.pop();
            }
            _ => render_node(&child, depth + 1, callees, out),
        }
    }
}

fn render_line(node: &dyn Node, depth: usize, out: &mut String) {
    let text = node.text();

    out.push_str(&INDENT.repeat(depth));
    out.push_str(node.label());
    if !text.is_empty() {
        // Writing to a String can't fail
        let _ = write!(out, " {text}");
    }
    out.push('\n');
}
