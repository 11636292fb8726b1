//! # Element Paths
//!
//! A path addresses one element as a sequence of child indices from the root
//! container (the document body), counting element children only. Paths are
//! valid for exactly one synchronous operation: sibling indices shift on
//! every insert/delete/move, so callers re-resolve immediately before use
//! and never cache the result across a mutation. Resolution of a stale path
//! is a normal outcome, not an error.

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// Child-element index path from the root container. The empty path is the
/// root container itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The root container (document body).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of the parent element; `None` for the root container.
    pub fn parent(&self) -> Option<NodePath> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Index among the parent's element children; `None` for the root.
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the sibling at `index` under the same parent.
    pub fn sibling(&self, index: usize) -> Option<NodePath> {
        self.parent().map(|p| p.child(index))
    }

    /// Resolve against the current tree. Returns `None` when any step is out
    /// of bounds — stale paths are expected and never panic.
    pub fn resolve<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        let mut current = root;
        for &index in &self.0 {
            current = current.element_children().nth(index)?;
        }
        Some(current)
    }

    pub fn resolve_mut<'a>(&self, root: &'a mut Node) -> Option<&'a mut Node> {
        let mut current = root;
        for &index in &self.0 {
            current = current
                .children_mut()?
                .iter_mut()
                .filter(|c| c.is_element())
                .nth(index)?;
        }
        Some(current)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Enumerate every element reachable from `root` together with its path,
/// in document order. The root itself is yielded first with the empty path.
pub fn walk(root: &Node) -> Vec<(NodePath, &Node)> {
    let mut out = Vec::new();
    fn descend<'a>(node: &'a Node, path: NodePath, out: &mut Vec<(NodePath, &'a Node)>) {
        out.push((path.clone(), node));
        for (index, child) in node.element_children().enumerate() {
            descend(child, path.child(index), out);
        }
    }
    descend(root, NodePath::root(), &mut out);
    out
}
