use crate::error::SignatureError;
use crate::ir::{NodeId, TypeNode, TypeTree};
use crate::scan::{RawKind, Shape};
use crate::typename::TypeCode;

/// Validate dict entries and lower the raw shape to the typed IR.
///
/// Entries are judged outermost first, so `a{sa{i}u}` reports the extra
/// member of the outer entry rather than the missing value of the inner one.
pub fn lower_to_ir(shape: &Shape) -> Result<TypeTree, SignatureError> {
    // Pre-order walk decides which error is reported.
    let mut pending: Vec<NodeId> = vec![shape.root()];
    while let Some(id) = pending.pop() {
        match &shape.nodes[id].kind {
            RawKind::Primitive(_) => {}
            RawKind::Array(child) => pending.push(*child),
            RawKind::DictEntry { members, close } => {
                let (_, value) = dict_entry(shape, members, *close)?;
                pending.push(value);
            }
        }
    }

    let nodes = shape
        .nodes
        .iter()
        .map(|node| {
            Ok(match &node.kind {
                RawKind::Primitive(code) => TypeNode::Primitive(*code),
                RawKind::Array(child) => TypeNode::Array(*child),
                RawKind::DictEntry { members, close } => {
                    let (key, value) = dict_entry(shape, members, *close)?;
                    TypeNode::MapEntry { key, value }
                }
            })
        })
        .collect::<Result<Vec<_>, SignatureError>>()?;
    Ok(TypeTree { nodes })
}

/// A basic-type key, then exactly one value. The key is judged before the
/// arity, so `a{ay}` is an orphan rather than a short entry.
fn dict_entry(shape: &Shape, members: &[NodeId], close: usize) -> Result<(TypeCode, NodeId), SignatureError> {
    let [key, rest @ ..] = members else {
        return Err(SignatureError::TooFewMembers { offset: close });
    };
    let RawKind::Primitive(code) = shape.nodes[*key].kind else {
        return Err(SignatureError::OrphanMapEntry { offset: shape.nodes[*key].offset });
    };
    match rest {
        [value] => Ok((code, *value)),
        [] => Err(SignatureError::TooFewMembers { offset: close }),
        [_, extra, ..] => Err(SignatureError::TooManyMembers { offset: shape.nodes[*extra].offset }),
    }
}
