// Strongly-typed IR for codegen. Only well-formed trees exist here.

use crate::typename::TypeCode;

/// Index into [`TypeTree::nodes`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNode {
    Primitive(TypeCode),
    Array(NodeId),
    /// `a{kv}`; the key is always a basic type.
    MapEntry { key: TypeCode, value: NodeId },
}

/// Arena of one complete type.
///
/// Nodes are stored in completion order: every child precedes its parent and
/// the root is the last node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTree {
    pub nodes: Vec<TypeNode>,
}

impl TypeTree {
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.len().checked_sub(1)
    }

    /// Longest chain of `Array`/`MapEntry` wrappers from the root.
    pub fn depth(&self) -> usize {
        let mut depths: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let d = match *node {
                TypeNode::Primitive(_) => 0,
                TypeNode::Array(child) => depths[child] + 1,
                TypeNode::MapEntry { value, .. } => depths[value] + 1,
            };
            depths.push(d);
        }
        depths.last().copied().unwrap_or(0)
    }
}
