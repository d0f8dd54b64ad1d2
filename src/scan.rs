//! Delimit one complete type expression.
//!
//! The scanner walks the input once with an explicit stack of open frames
//! (an `a` awaiting its element, or a dict entry collecting members) instead
//! of recursing, so nesting depth is bounded by the heap rather than the call
//! stack. It only checks what can be decided locally: known codes, where `{`
//! and `}` may appear, whether the input ends early, and whether a dict entry
//! takes a third member. Missing members and key kind are judged by
//! [`crate::lower`] once the whole expression is delimited.

use crate::error::SignatureError;
use crate::ir::NodeId;
use crate::typename::{ARRAY_CODE, DICT_ENTRY_BEGIN, DICT_ENTRY_END, TypeCode};

// ------------------------------ Raw shape --------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawKind {
    Primitive(TypeCode),
    Array(NodeId),
    DictEntry {
        members: Vec<NodeId>,
        /// Offset of the closing `}`.
        close: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    /// Offset of the first character of this expression.
    pub offset: usize,
    pub kind: RawKind,
}

/// Result of a successful scan: nodes in completion order, root last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub nodes: Vec<RawNode>,
    /// Offset one past the last character of the expression.
    pub end: usize,
}

impl Shape {
    pub fn root(&self) -> NodeId {
        self.nodes.len() - 1
    }
}

enum Frame {
    Array { offset: usize },
    DictEntry { offset: usize, members: Vec<NodeId> },
}

// -------------------------------- Scanner --------------------------------- //

/// Scan one complete type starting at byte offset `start` of `input`.
///
/// `start` must lie on a char boundary. Offsets in the result and in errors
/// are relative to `input`, not to `start`.
pub fn scan(input: &str, start: usize) -> Result<Shape, SignatureError> {
    let mut nodes: Vec<RawNode> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut open_entries: usize = 0;
    let mut chars = input[start..].char_indices().map(|(i, c)| (start + i, c));

    loop {
        let Some((offset, c)) = chars.next() else {
            return Err(match stack.last() {
                None => SignatureError::EmptyInput,
                Some(Frame::Array { offset }) => SignatureError::MissingArrayElement { offset: *offset },
                Some(Frame::DictEntry { offset, .. }) => {
                    // report the `{`, which sits right after the `a`
                    SignatureError::UnclosedMapEntry { offset: offset + 1 }
                }
            });
        };

        let complete = match c {
            ARRAY_CODE => {
                stack.push(Frame::Array { offset });
                continue;
            }
            DICT_ENTRY_BEGIN => match stack.pop() {
                Some(Frame::Array { offset: array_at }) => {
                    stack.push(Frame::DictEntry { offset: array_at, members: Vec::new() });
                    open_entries += 1;
                    continue;
                }
                _ => return Err(SignatureError::OrphanMapEntry { offset }),
            },
            DICT_ENTRY_END => match stack.pop() {
                Some(Frame::DictEntry { offset: entry_at, members }) => {
                    open_entries -= 1;
                    RawNode {
                        offset: entry_at,
                        kind: RawKind::DictEntry { members, close: offset },
                    }
                }
                Some(Frame::Array { offset: array_at }) if open_entries > 0 => {
                    return Err(SignatureError::MissingArrayElement { offset: array_at });
                }
                _ => return Err(SignatureError::UnexpectedClose { offset }),
            },
            _ => match TypeCode::from_char(c) {
                Some(code) => RawNode { offset, kind: RawKind::Primitive(code) },
                None => return Err(SignatureError::UnknownTypeCode { offset, found: c }),
            },
        };

        // Fold the finished expression into the frames above it.
        nodes.push(complete);
        loop {
            let done = nodes.len() - 1;
            match stack.pop() {
                None => {
                    debug_assert_eq!(open_entries, 0);
                    return Ok(Shape { nodes, end: offset + c.len_utf8() });
                }
                Some(Frame::Array { offset }) => {
                    nodes.push(RawNode { offset, kind: RawKind::Array(done) });
                }
                Some(Frame::DictEntry { offset, mut members }) => {
                    if members.len() == 2 {
                        return Err(SignatureError::TooManyMembers { offset: nodes[done].offset });
                    }
                    members.push(done);
                    stack.push(Frame::DictEntry { offset, members });
                    break;
                }
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
