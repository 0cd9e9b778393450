//! Forest rendering
//!
//! Walks each tree depth first, child before sibling, and renders it back
//! to source-like text: exactly one space between adjacent atoms, no space
//! immediately after an opening bracket or immediately before a closing
//! one. Closing brackets are real nodes at the end of each child chain, so
//! every depth closes with its matching character.

use crate::forest::Forest;
use crate::lexer::{NodeId, NodeKind};
use crate::storage::GrowArray;

/// Renders the tree rooted at `root` as a single line of text
pub fn render_tree(forest: &Forest, root: NodeId) -> String {
    let mut out = String::new();
    let mut parents: GrowArray<NodeId> = GrowArray::new();
    let mut after_open = false;
    let mut cursor = Some(root);

    while let Some(id) = cursor {
        let Some(node) = forest.node(id) else {
            break;
        };
        let is_close = matches!(node.kind, NodeKind::Close(_));
        if !out.is_empty() && !after_open && !is_close {
            out.push(' ');
        }
        out.push_str(&node.kind.to_string());
        after_open = matches!(node.kind, NodeKind::Open(_));

        if let Some(child) = node.child {
            // Stack pushes can only fail on allocation failure; rendering
            // then stops at the text produced so far.
            if parents.push(id).is_err() {
                break;
            }
            cursor = Some(child);
        } else {
            cursor = node.sibling;
            while cursor.is_none() {
                match parents.pop() {
                    Some(parent) => cursor = forest.node(parent).and_then(|n| n.sibling),
                    None => break,
                }
            }
        }
    }
    out
}

/// Renders the whole forest, one tree per line
pub fn render(forest: &Forest) -> String {
    let mut out = String::new();
    for root in forest.roots() {
        out.push_str(&render_tree(forest, root));
        out.push('\n');
    }
    out
}
