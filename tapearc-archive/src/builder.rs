//! Sequential archive writing.
//!
//! [`ArchiveBuilder`] writes entries to a byte sink in stream order,
//! synthesizing any missing parent directories on the way, and terminates
//! the archive with two zero records on [`ArchiveBuilder::complete`] (or on
//! drop, when nothing is left half-written).
//!
//! # Example
//!
//! ```
//! use tapearc_archive::{ArchiveBuilder, Entry, Format, TypeFlag};
//! use tapearc_core::path::ArchivePath;
//!
//! let mut output = Vec::new();
//! let mut builder = ArchiveBuilder::new(&mut output);
//!
//! let path = ArchivePath::parse("./hello.txt").unwrap();
//! let mut entry = Entry::new(Format::Ustar, TypeFlag::REGULAR_FILE, path).with_size(5);
//!
//! builder.write_entry(&mut entry, &mut &b"hello"[..]).unwrap();
//! builder.complete().unwrap();
//! drop(builder);
//!
//! // A synthesized "./" header, the file header, one content record and
//! // two terminator records.
//! assert_eq!(output.len(), 5 * 512);
//! ```

use crate::entry::{Entry, ParentOverride};
use std::collections::HashSet;
use std::io::{self, Read, Write};
use std::mem::ManuallyDrop;
use tapearc_core::error::{Result, TapeArcError};
use tapearc_core::path::ArchivePath;
use tapearc_core::record::{RECORD_LEN, RecordWriter};

/// A TAR archive being written to a byte sink.
///
/// Entries are written in call order. Writing an entry whose parent
/// directory was never written emits a synthesized directory entry first,
/// so in most cases empty directories need no explicit entry of their own.
#[derive(Debug)]
pub struct ArchiveBuilder<W: Write> {
    writer: RecordWriter<W>,
    directories: HashSet<ArchivePath>,
    completed: bool,
}

impl<W: Write> ArchiveBuilder<W> {
    /// Create a new `ArchiveBuilder` writing to the given sink.
    pub fn new(output: W) -> Self {
        Self {
            writer: RecordWriter::new(output),
            directories: HashSet::new(),
            completed: false,
        }
    }

    /// Get a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Get a mutable reference to the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        self.writer.get_mut()
    }

    /// Write one entry: missing ancestors first, then the header, then
    /// exactly `entry.size` bytes of `content`, then the record padding.
    ///
    /// The entry's checksum is recorded on success. Streaming more or fewer
    /// bytes than `entry.size` is not detected and corrupts the archive.
    ///
    /// # Errors
    ///
    /// [`TapeArcError::ArchiveCompleted`] after [`complete`], any header
    /// encoding error, and transport errors from the sink.
    ///
    /// [`complete`]: ArchiveBuilder::complete
    pub fn write_entry(&mut self, entry: &mut Entry, content: &mut dyn Read) -> Result<()> {
        self.write_entry_with(entry, content, None)
    }

    /// Like [`write_entry`](ArchiveBuilder::write_entry), with overrides for
    /// any parent directories synthesized along the way.
    pub fn write_entry_with(
        &mut self,
        entry: &mut Entry,
        content: &mut dyn Read,
        overrides: Option<&ParentOverride>,
    ) -> Result<()> {
        if self.completed {
            return Err(TapeArcError::ArchiveCompleted);
        }

        // Create the parent chain if it does not exist yet.
        if let Some(parent) = entry.path.parent() {
            if !self.directories.contains(&parent) {
                let mut parent_entry = entry.derive_parent(parent, overrides)?;
                self.write_entry_with(&mut parent_entry, &mut io::empty(), overrides)?;
            }
        }

        let mut header = vec![0u8; entry.format.header_blocks(entry) * RECORD_LEN];
        entry.checksum = Some(entry.format.encode(entry, &mut header)?);

        self.writer.write(&header)?;
        io::copy(content, &mut self.writer)?;
        self.writer.flush_record()?;

        if entry.path.is_directory() {
            self.directories.insert(entry.path.clone());
        }

        Ok(())
    }

    /// Write the archive terminator and refuse any further writes.
    ///
    /// # Errors
    ///
    /// [`TapeArcError::ArchiveCompleted`] when called twice,
    /// [`TapeArcError::UnflushedData`] when a partial record is pending.
    pub fn complete(&mut self) -> Result<()> {
        if self.completed {
            return Err(TapeArcError::ArchiveCompleted);
        }

        self.writer.complete()?;
        self.completed = true;

        Ok(())
    }

    /// Consume the builder and return the sink, completing the archive
    /// first when necessary.
    pub fn into_inner(self) -> Result<W> {
        let mut this = ManuallyDrop::new(self);

        if !this.completed {
            this.writer.complete()?;
        }

        // SAFETY: `self` is wrapped in ManuallyDrop, so the writer is read
        // out exactly once and `drop` never runs on it.
        let writer = unsafe { std::ptr::read(&this.writer) };
        let directories = unsafe { std::ptr::read(&this.directories) };
        drop(directories);

        Ok(writer.into_inner())
    }
}

impl<W: Write> Drop for ArchiveBuilder<W> {
    fn drop(&mut self) {
        // Best effort only; a pending partial record means the archive is
        // already malformed and gets no terminator.
        if !self.completed && self.writer.buffered() == 0 {
            let _ = self.writer.complete();
        }
    }
}
