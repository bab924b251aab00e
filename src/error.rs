//! Error types for put-blocks decoding and block inspection

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// The part of the wire message being read when decoding failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The batch array header, or bytes after the last record
    Batch,
    /// A record's map header
    Record,
    /// A map key
    Key,
    /// The `height` value
    Height,
    /// The `block` value
    Block,
    /// The value of a key the decoder does not know and skips
    Unknown,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Batch => write!(f, "batch header"),
            Field::Record => write!(f, "record header"),
            Field::Key => write!(f, "field name"),
            Field::Height => write!(f, "height"),
            Field::Block => write!(f, "block"),
            Field::Unknown => write!(f, "unknown field"),
        }
    }
}

/// Fieldless discriminant of [`DecodeError`], handy for matching in callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    Truncated,
    TypeMismatch,
    Malformed,
}

fn location(record: &Option<usize>) -> Cow<'static, str> {
    match record {
        Some(index) => Cow::Owned(format!("record {index}")),
        None => Cow::Borrowed("batch"),
    }
}

/// Failure to decode a put-blocks batch
///
/// `record` is `None` while the batch header (or the tail after the last
/// record) is being read.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("Truncated input at {}: ran out of bytes reading {field}", location(.record))]
    Truncated { record: Option<usize>, field: Field },

    #[error(
        "Type mismatch at {}: {field} expected {expected}, found marker 0x{marker:02x}",
        location(.record)
    )]
    TypeMismatch {
        record: Option<usize>,
        field: Field,
        expected: &'static str,
        marker: u8,
    },

    #[error("Malformed input at {}: {field}: {reason}", location(.record))]
    Malformed {
        record: Option<usize>,
        field: Field,
        reason: Cow<'static, str>,
    },
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::Truncated { .. } => DecodeErrorKind::Truncated,
            DecodeError::TypeMismatch { .. } => DecodeErrorKind::TypeMismatch,
            DecodeError::Malformed { .. } => DecodeErrorKind::Malformed,
        }
    }

    /// Index of the record being decoded, `None` for the batch header
    pub fn record(&self) -> Option<usize> {
        match self {
            DecodeError::Truncated { record, .. }
            | DecodeError::TypeMismatch { record, .. }
            | DecodeError::Malformed { record, .. } => *record,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            DecodeError::Truncated { field, .. }
            | DecodeError::TypeMismatch { field, .. }
            | DecodeError::Malformed { field, .. } => *field,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failure to parse the Bitcoin block carried in a record
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum BlockParseError {
    #[error("Insufficient bytes to parse {0}")]
    InsufficientBytes(Cow<'static, str>),

    #[error("Non-canonical VarInt encoding")]
    InvalidVarInt,

    #[error("Invalid transaction count: {0}")]
    InvalidTransactionCount(u64),
}
