//! # tapearc Archive
//!
//! TAR container support for tapearc.
//!
//! This crate reads and writes the classic TAR family:
//!
//! - **V7**: the original layout shipped with Version 7 AT&T UNIX
//! - **Pre-POSIX**: the early POSIX.1 draft (`"ustar "` magic), also written
//!   by GNU tar's oldgnu mode
//! - **Ustar**: POSIX.1-1988, with prefix splitting for names up to 255
//!   bytes
//!
//! Hard links, symbolic links, device nodes, FIFOs, custom extension types
//! and GNU/PAX extended headers are rejected with explicit errors.
//!
//! ## Reading
//!
//! Entries come out of [`Archive::next_entry`] lazily, in stream order.
//! Each [`EntryReader`] reads its own content, bounded by the declared
//! size; unread content is skipped automatically when the next entry is
//! requested.
//!
//! ## Writing
//!
//! [`ArchiveBuilder::write_entry`] writes one entry and auto-creates any
//! missing parent directories. [`ArchiveBuilder::complete`] terminates the
//! archive.
//!
//! ## Example
//!
//! ```rust
//! use std::io::{Cursor, Read};
//! use tapearc_archive::{Archive, ArchiveBuilder, Entry, Format, TypeFlag};
//! use tapearc_core::path::ArchivePath;
//!
//! let mut output = Vec::new();
//! {
//!     let mut builder = ArchiveBuilder::new(&mut output);
//!     let path = ArchivePath::parse("./docs/readme").unwrap();
//!     let mut entry = Entry::new(Format::Ustar, TypeFlag::REGULAR_FILE, path).with_size(14);
//!     builder
//!         .write_entry(&mut entry, &mut &b"Hello, world!\n"[..])
//!         .unwrap();
//!     builder.complete().unwrap();
//! }
//!
//! let mut archive = Archive::new(Cursor::new(output));
//! // "./" and "./docs/" were synthesized in front of the file.
//! while let Some(mut entry) = archive.next_entry().unwrap() {
//!     let mut content = String::new();
//!     entry.read_to_string(&mut content).unwrap();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod entry;
pub mod header;
pub mod reader;

// Re-exports
pub use builder::ArchiveBuilder;
pub use entry::{Entry, ParentOverride, TypeFlag};
pub use header::Format;
pub use reader::{Archive, EntryReader};
pub use tapearc_core::error::{Result, TapeArcError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::ArchiveBuilder;
    pub use crate::entry::{Entry, ParentOverride, TypeFlag};
    pub use crate::header::Format;
    pub use crate::reader::{Archive, EntryReader};
    pub use tapearc_core::error::{Result, TapeArcError};
    pub use tapearc_core::path::ArchivePath;
}
