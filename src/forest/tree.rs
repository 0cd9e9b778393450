use serde::{Deserialize, Serialize};

use crate::lexer::{Node, NodeId};
use crate::storage::GrowArray;

/// An ordered sequence of trees built from one input line
///
/// The forest exclusively owns every node: trees are encoded as
/// first-child/next-sibling links indexing into a single node arena, so
/// there is no aliasing and no cycle to manage. Dropping the forest
/// releases the arena and every owned symbol buffer exactly once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Forest {
    nodes: GrowArray<Node>,
    roots: GrowArray<NodeId>,
}

impl Forest {
    pub(crate) fn new(nodes: GrowArray<Node>, roots: GrowArray<NodeId>) -> Self {
        Forest { nodes, roots }
    }

    /// Borrows the node at `id`, or `None` for a foreign id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Root ids in encounter order, one per top-level expression
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().copied()
    }

    /// Number of top-level expressions
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Total number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when the line held no expression at all
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Maximum bracket-nesting depth of the tree rooted at `root`
    ///
    /// An atom is depth 1; a bracketed expression is one deeper than its
    /// deepest member.
    pub fn depth(&self, root: NodeId) -> usize {
        let Some(node) = self.node(root) else {
            return 0;
        };
        let mut deepest = 0;
        let mut cursor = node.child;
        while let Some(id) = cursor {
            deepest = deepest.max(self.depth(id));
            cursor = self.node(id).and_then(|n| n.sibling);
        }
        1 + deepest
    }
}
