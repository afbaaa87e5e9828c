//! Error types for datastore encoding/decoding and dataset resolution.

use thiserror::Error;

/// Error classes every codec failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// E101: A number does not fit the wire representation
    Range,
    /// E102: A value has a kind the wire format cannot carry
    Type,
    /// E103: A key or message is malformed
    Structure,
    /// E104: Annotations within one list property disagree
    Consistency,
}

impl ErrorKind {
    /// Returns the error code string (e.g., "E101").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Range => "E101",
            ErrorKind::Type => "E102",
            ErrorKind::Structure => "E103",
            ErrorKind::Consistency => "E104",
        }
    }
}

/// A key violates the path invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("[E103] key path is empty")]
    EmptyPath,

    #[error("[E103] key path element {index} has no kind")]
    MissingKind { index: usize },

    #[error("[E103] key path element {index} has no id or name but is not the last element")]
    IncompleteAncestor { index: usize },
}

/// Error while turning application values into wire messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("[E101] integer {value} is outside the signed 64-bit range")]
    IntegerOutOfRange { value: i128 },

    #[error("[E102] unsupported value: a list may not contain another list")]
    NestedList,

    #[error(transparent)]
    InvalidKey(#[from] KeyError),
}

impl EncodeError {
    /// Returns the error kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::IntegerOutOfRange { .. } => ErrorKind::Range,
            EncodeError::NestedList => ErrorKind::Type,
            EncodeError::InvalidKey(_) => ErrorKind::Structure,
        }
    }
}

/// Error while turning wire messages into application values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    #[error("[E102] list value inside a list value")]
    NestedList,

    #[error("[E101] timestamp of {micros} microseconds is outside the representable range")]
    TimestampOutOfRange { micros: i64 },

    #[error("[E103] entity nesting exceeds maximum depth {max}")]
    NestingTooDeep { max: usize },

    #[error("[E104] list property {property:?} mixes indexed and unindexed values")]
    MixedListIndexing { property: String },

    #[error("[E104] values within a list carry different meanings")]
    MixedListMeaning,

    #[error("[E103] malformed protobuf: {0}")]
    Protobuf(#[from] prost::DecodeError),
}

impl DecodeError {
    /// Returns the error kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::TimestampOutOfRange { .. } => ErrorKind::Range,
            DecodeError::NestedList => ErrorKind::Type,
            DecodeError::InvalidKey(_)
            | DecodeError::NestingTooDeep { .. }
            | DecodeError::Protobuf(_) => ErrorKind::Structure,
            DecodeError::MixedListIndexing { .. } | DecodeError::MixedListMeaning => {
                ErrorKind::Consistency
            }
        }
    }
}

/// Error while resolving a dataset id.
///
/// Transport failures are passed through as-is.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    #[error(transparent)]
    Transport(E),

    #[error("probe lookup returned {count} results, expected exactly one")]
    UnexpectedResultCount { count: usize },

    #[error("probe lookup result carries no dataset id")]
    MissingDatasetId,
}
