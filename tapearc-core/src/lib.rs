//! # tapearc Core
//!
//! Core components for the tapearc TAR library.
//!
//! This crate provides the building blocks the container layer is assembled
//! from:
//!
//! - [`record`]: fixed 512-byte record I/O over any `Read`/`Write` transport
//! - [`octal`]: octal field codec and the header checksum
//! - [`path`]: the validated archive path model
//! - [`perm`]: POSIX permission bit constants
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! tapearc is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Container (tapearc-archive)                         │
//! │     V7 / pre-POSIX / ustar headers, reader, builder     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Entry model (tapearc-archive)                       │
//! │     type flags, metadata, parent synthesis              │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Records and fields (this crate)                     │
//! │     RecordReader/RecordWriter, octal codec, checksum,   │
//! │     ArchivePath                                         │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tapearc_core::octal::{parse_octal, write_octal};
//! use tapearc_core::path::ArchivePath;
//!
//! let mut field = [0u8; 8];
//! assert!(write_octal(&mut field[..7], 0o644, b'0'));
//! let value = parse_octal(&field, "mode", |b| b == b'0', |f| {
//!     (f[f.len() - 1] == 0).then_some(1)
//! });
//! assert_eq!(value.unwrap(), 0o644);
//!
//! let path = ArchivePath::parse("./docs/readme").unwrap();
//! assert_eq!(path.parent().unwrap().to_string(), "./docs/");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod octal;
pub mod path;
pub mod perm;
pub mod record;

// Re-exports for convenience
pub use error::{Result, TapeArcError};
pub use octal::{header_checksum, parse_octal, write_octal};
pub use path::ArchivePath;
pub use record::{RECORD_LEN, RecordReader, RecordWriter};
