//! The syntax tree the resolution engine consumes.
//!
//! Parsers are external collaborators: they lower whatever concrete syntax they produce into this
//! arena-based tree. Nodes are addressed by [`NodeId`]; child links live inside [`NodeKind`] and
//! the parent of every node is recorded in a separate table, filled exactly once when the parent
//! is allocated. A finished [`Ast`] is immutable.

mod builder;
mod node;

pub use builder::{AstBuilder, AstError};
pub use node::{BinaryOp, ClassKind, Literal, NodeKind, TypeRef, UnaryOp};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use groovy_core::{Position, Range};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Process-unique identity of one parsed compilation unit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AstId(u64);

impl AstId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        AstId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for AstId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AstId({})", self.0)
    }
}

/// Identity of a node across all compilation units; the key of node-keyed caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub ast: AstId,
    pub node: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range,
}

#[derive(Debug, Clone)]
pub struct Ast {
    id: AstId,
    root: NodeId,
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
}

impl Ast {
    #[must_use]
    pub fn id(&self) -> AstId {
        self.id
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn key(&self, node: NodeId) -> NodeKey {
        NodeKey { ast: self.id, node }
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.idx())
    }

    /// # Panics
    ///
    /// Panics if `node` does not belong to this tree.
    #[must_use]
    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node.idx()]
    }

    #[must_use]
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.node(node).kind
    }

    #[must_use]
    pub fn range(&self, node: NodeId) -> Range {
        self.node(node).range
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node.idx()).copied().flatten()
    }

    /// Strict ancestors of `node`, innermost first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&current| self.parent(current))
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.kind(node).children()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId::from_raw)
    }

    /// The declared package of the compilation unit, if the root is a module node.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        match self.kind(self.root) {
            NodeKind::Module { package, .. } => package.as_deref(),
            _ => None,
        }
    }

    /// The innermost node whose range contains `pos`.
    #[must_use]
    pub fn node_at(&self, pos: Position) -> Option<NodeId> {
        if !self.range(self.root).contains(pos) {
            return None;
        }
        let mut current = self.root;
        'descend: loop {
            for child in self.children(current) {
                if self.range(child).contains(pos) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }
}
