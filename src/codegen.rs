//! Render a [`TypeTree`] as a C++ typename.
use crate::ir::{NodeId, TypeNode, TypeTree};
use crate::typename::{TypeCode, TypenameConfig};

pub const ARRAY_TEMPLATE: &str = "std::vector";
pub const MAP_TEMPLATE: &str = "std::map";

pub struct Codegen<'a> {
    config: &'a TypenameConfig,
}

impl<'a> Codegen<'a> {
    pub fn new(config: &'a TypenameConfig) -> Self {
        Self { config }
    }

    /// Walks from the root with an explicit work list and writes into one
    /// buffer, so output cost is linear in its length at any nesting depth.
    pub fn emit(&self, tree: &TypeTree) -> String {
        let mut out = String::new();
        let Some(root) = tree.root() else {
            return out;
        };
        let mut work = vec![Step::Node(root)];
        while let Some(step) = work.pop() {
            match step {
                Step::Close => out.push('>'),
                Step::Node(id) => match tree.nodes[id] {
                    TypeNode::Primitive(code) => out.push_str(self.primitive(code)),
                    TypeNode::Array(item) => {
                        out.push_str(ARRAY_TEMPLATE);
                        out.push('<');
                        work.push(Step::Close);
                        work.push(Step::Node(item));
                    }
                    TypeNode::MapEntry { key, value } => {
                        out.push_str(MAP_TEMPLATE);
                        out.push('<');
                        out.push_str(self.primitive(key));
                        out.push(',');
                        work.push(Step::Close);
                        work.push(Step::Node(value));
                    }
                },
            }
        }
        out
    }

    /// Table entry for a primitive, via the character-keyed lookup.
    fn primitive(&self, code: TypeCode) -> &'a str {
        // every TypeCode round-trips through its character
        self.config
            .lookup(code.as_char())
            .unwrap_or_else(|| code.default_typename())
    }
}

enum Step {
    Node(NodeId),
    Close,
}
