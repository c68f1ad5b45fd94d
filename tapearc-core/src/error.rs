//! Error types for tapearc operations.
//!
//! This module provides one error type covering the three failure classes of
//! the codec: format errors (the archive bytes are malformed), usage errors
//! (the caller violated an API contract), and transport errors (the
//! underlying byte stream failed or ended early). Transport truncation is a
//! dedicated variant so callers can tell a short stream apart from corrupt
//! content.

use std::io;
use thiserror::Error;

/// The main error type for tapearc operations.
#[derive(Debug, Error)]
pub enum TapeArcError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The byte source ended in the middle of a 512-byte record.
    #[error("stream ended inside a record: got {read} of 512 bytes")]
    TruncatedRecord {
        /// Number of bytes obtained before the source ran dry.
        read: usize,
    },

    /// The stored header checksum matches neither the unsigned nor the
    /// signed byte sum.
    #[error("header checksum mismatch: stored {stored}")]
    ChecksumMismatch {
        /// Checksum value stored in the header.
        stored: u32,
    },

    /// A header field is not framed or encoded the way its format requires.
    #[error("invalid {field} field")]
    InvalidField {
        /// Name of the offending header field.
        field: &'static str,
    },

    /// A numeric header field holds more than 21 octal digits.
    #[error("{field} field overflows")]
    FieldOverflow {
        /// Name of the offending header field.
        field: &'static str,
    },

    /// A value does not fit into its header field.
    #[error("{field} does not fit its header field")]
    ValueTooLarge {
        /// Name of the offending header field.
        field: &'static str,
    },

    /// A `ustar`-prefixed magic with an unrecognized variant byte.
    #[error("unknown ustar variant")]
    UnknownMagic,

    /// A recognized magic combined with an unrecognized version.
    #[error("unknown {variant} version")]
    UnknownVersion {
        /// Human-readable name of the detected variant.
        variant: &'static str,
    },

    /// A type flag naming a member of the TAR family this codec rejects.
    #[error("{kind} is not supported (type flag {flag:#04x})")]
    UnsupportedType {
        /// Raw type flag byte.
        flag: u8,
        /// What the flag stands for.
        kind: &'static str,
    },

    /// A type flag that is not valid for the Version-7 layout.
    #[error("unknown type flag {flag:#04x}")]
    UnknownType {
        /// Raw type flag byte.
        flag: u8,
    },

    /// An entry name that cannot fit the header name field(s).
    #[error("name of {len} bytes is too long")]
    NameTooLong {
        /// Rendered length of the name in bytes.
        len: usize,
    },

    /// A long ustar name with no `/` that yields a valid prefix/name split.
    #[error("name cannot be split into prefix and name fields")]
    NameUnsplittable,

    /// A single all-zero record that is not followed by a second one.
    #[error("lone zero record is not a valid end-of-archive marker")]
    LoneZeroRecord,

    /// An archive path that violates the path rules.
    #[error("invalid archive path: {reason}")]
    InvalidPath {
        /// What rule the path violates.
        reason: &'static str,
    },

    /// A modification time before the Unix epoch.
    #[error("modification time is before the Unix epoch")]
    TimeBeforeEpoch,

    /// A write or completion attempt on an already-completed archive.
    #[error("the archive is already completed")]
    ArchiveCompleted,

    /// Completion requested while a partial record is still buffered.
    #[error("cannot complete with {buffered} unflushed bytes pending")]
    UnflushedData {
        /// Number of bytes sitting in the partial record.
        buffered: usize,
    },

    /// A path segment that the local filesystem cannot represent.
    #[error("segment {segment:?} is not representable on this file system")]
    UnsupportedSegment {
        /// The offending segment.
        segment: String,
    },
}

/// Result type alias for tapearc operations.
pub type Result<T> = std::result::Result<T, TapeArcError>;

impl TapeArcError {
    /// Create an invalid field error.
    pub fn invalid_field(field: &'static str) -> Self {
        Self::InvalidField { field }
    }

    /// Create a field overflow error.
    pub fn field_overflow(field: &'static str) -> Self {
        Self::FieldOverflow { field }
    }

    /// Create a value too large error.
    pub fn value_too_large(field: &'static str) -> Self {
        Self::ValueTooLarge { field }
    }

    /// Create an unsupported type error.
    pub fn unsupported_type(flag: u8, kind: &'static str) -> Self {
        Self::UnsupportedType { flag, kind }
    }

    /// Create an invalid path error.
    pub fn invalid_path(reason: &'static str) -> Self {
        Self::InvalidPath { reason }
    }

    /// Create an unsupported segment error.
    pub fn unsupported_segment(segment: impl Into<String>) -> Self {
        Self::UnsupportedSegment {
            segment: segment.into(),
        }
    }
}

impl From<TapeArcError> for io::Error {
    fn from(err: TapeArcError) -> Self {
        match err {
            TapeArcError::Io(err) => err,
            err @ TapeArcError::TruncatedRecord { .. } => {
                io::Error::new(io::ErrorKind::UnexpectedEof, err)
            }
            err => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}
