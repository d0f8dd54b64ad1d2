//! Error types for signature parsing.

use serde::Serialize;
use thiserror::Error;

/// The first structural problem found in a signature.
///
/// Offsets are byte offsets into the string handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Signature string has zero length.
    #[error("empty signature")]
    EmptyInput,

    /// `a` with nothing usable after it.
    #[error("array at offset {offset} has no element type")]
    MissingArrayElement { offset: usize },

    /// `{` not directly after `a`, or a dict entry keyed by a container.
    #[error("misplaced dict entry at offset {offset}: entries must follow 'a' and have a basic key")]
    OrphanMapEntry { offset: usize },

    /// Dict entry closed before both key and value were seen.
    #[error("dict entry closed at offset {offset} with fewer than two members")]
    TooFewMembers { offset: usize },

    /// Dict entry with a third member before its `}`.
    #[error("dict entry has an extra member at offset {offset}")]
    TooManyMembers { offset: usize },

    /// Input ended with a dict entry still open.
    #[error("dict entry opened at offset {offset} is never closed")]
    UnclosedMapEntry { offset: usize },

    /// `}` with no open dict entry.
    #[error("unexpected '}}' at offset {offset}")]
    UnexpectedClose { offset: usize },

    #[error("unknown type code {found:?} at offset {offset}")]
    UnknownTypeCode { offset: usize, found: char },

    /// Strict parsing only: input left over after one complete type.
    #[error("trailing {found:?} at offset {offset} after a complete type")]
    TrailingCharacters { offset: usize, found: char },
}

/// Payload-free discriminant of [`SignatureError`], used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    EmptyInput,
    MissingArrayElement,
    OrphanMapEntry,
    TooFewMembers,
    TooManyMembers,
    UnclosedMapEntry,
    UnexpectedClose,
    UnknownTypeCode,
    TrailingCharacters,
}

impl SignatureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignatureError::EmptyInput => ErrorKind::EmptyInput,
            SignatureError::MissingArrayElement { .. } => ErrorKind::MissingArrayElement,
            SignatureError::OrphanMapEntry { .. } => ErrorKind::OrphanMapEntry,
            SignatureError::TooFewMembers { .. } => ErrorKind::TooFewMembers,
            SignatureError::TooManyMembers { .. } => ErrorKind::TooManyMembers,
            SignatureError::UnclosedMapEntry { .. } => ErrorKind::UnclosedMapEntry,
            SignatureError::UnexpectedClose { .. } => ErrorKind::UnexpectedClose,
            SignatureError::UnknownTypeCode { .. } => ErrorKind::UnknownTypeCode,
            SignatureError::TrailingCharacters { .. } => ErrorKind::TrailingCharacters,
        }
    }

    /// `None` only for [`SignatureError::EmptyInput`].
    pub fn offset(&self) -> Option<usize> {
        match *self {
            SignatureError::EmptyInput => None,
            SignatureError::MissingArrayElement { offset }
            | SignatureError::OrphanMapEntry { offset }
            | SignatureError::TooFewMembers { offset }
            | SignatureError::TooManyMembers { offset }
            | SignatureError::UnclosedMapEntry { offset }
            | SignatureError::UnexpectedClose { offset }
            | SignatureError::UnknownTypeCode { offset, .. }
            | SignatureError::TrailingCharacters { offset, .. } => Some(offset),
        }
    }
}
