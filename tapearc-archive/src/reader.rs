//! Sequential archive reading.
//!
//! [`Archive`] turns a byte source into a lazy, forward-only, single-pass
//! sequence of entries. Each call to [`Archive::next_entry`] yields an
//! [`EntryReader`] that exposes the decoded metadata and reads the entry's
//! content; position in the record stream is shared, so the handle must be
//! released (read to the end, dropped, or [`EntryReader::skip`]ped) before
//! the next entry can be located. The borrow checker enforces that order.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::Read;
//! use tapearc_archive::Archive;
//!
//! let file = File::open("archive.tar").unwrap();
//! let mut archive = Archive::new(file);
//!
//! while let Some(mut entry) = archive.next_entry().unwrap() {
//!     println!("{} ({} bytes)", entry.entry().path, entry.entry().size);
//!     let mut content = Vec::new();
//!     entry.read_to_end(&mut content).unwrap();
//! }
//! ```

use crate::entry::Entry;
use crate::header::Format;
use std::io::{self, Read};
use tapearc_core::error::{Result, TapeArcError};
use tapearc_core::record::RecordReader;

/// A TAR archive being read from a byte source.
///
/// The sequence is not restartable. After a format or transport error the
/// stream position is undefined and the archive must be discarded.
#[derive(Debug)]
pub struct Archive<R: Read> {
    reader: RecordReader<R>,
    /// Unread content bytes of the entry handed out last.
    remaining: u64,
    done: bool,
}

impl<R: Read> Archive<R> {
    /// Create a new `Archive` reading from the given source.
    pub fn new(source: R) -> Self {
        Self {
            reader: RecordReader::new(source),
            remaining: 0,
            done: false,
        }
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Get a mutable reference to the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        self.reader.get_mut()
    }

    /// Consume this `Archive` and return the underlying source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Advance to the next entry, discarding whatever the previous entry's
    /// content stream left unread.
    ///
    /// Returns `Ok(None)` once the two-record end-of-archive marker has been
    /// consumed; later calls keep returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Any format error of the header codec, [`TapeArcError::LoneZeroRecord`]
    /// when a zero record is not followed by a second one, and transport
    /// errors from the underlying source.
    pub fn next_entry(&mut self) -> Result<Option<EntryReader<'_, R>>> {
        if self.done {
            return Ok(None);
        }

        let remaining = std::mem::take(&mut self.remaining);

        if remaining > 0 {
            self.reader.advance(remaining)?;
        }

        self.reader.next_record()?;

        let format = match Format::detect(self.reader.record())? {
            Some(format) => format,
            None => {
                self.reader.next_record()?;

                if self.reader.record()[0] == 0 {
                    // Two consecutive blank records.
                    self.done = true;
                    return Ok(None);
                }

                return Err(TapeArcError::LoneZeroRecord);
            }
        };

        let entry = format.decode(self.reader.record())?;

        if entry.size > 0 {
            // Prime the first content record; sub-record reads start there.
            self.reader.next_record()?;
            self.remaining = entry.size;
        }

        Ok(Some(EntryReader {
            archive: self,
            entry,
        }))
    }
}

/// One decoded entry together with its bounded content stream.
///
/// Reads never go past the declared entry size. Content left unread when the
/// handle is released is skipped before the next header is located.
#[derive(Debug)]
pub struct EntryReader<'a, R: Read> {
    archive: &'a mut Archive<R>,
    entry: Entry,
}

impl<R: Read> EntryReader<'_, R> {
    /// The decoded entry metadata.
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Give up the borrow on the archive and keep only the metadata.
    pub fn into_entry(self) -> Entry {
        self.entry
    }

    /// Number of content bytes not read yet.
    pub fn remaining(&self) -> u64 {
        self.archive.remaining
    }

    /// Release this entry, skipping all unread content immediately.
    ///
    /// Dropping the handle without calling this defers the skip to the next
    /// [`Archive::next_entry`] call.
    pub fn skip(self) -> Result<()> {
        let EntryReader { archive, entry: _ } = self;
        let remaining = std::mem::take(&mut archive.remaining);

        if remaining > 0 {
            archive.reader.advance(remaining)?;
        }

        Ok(())
    }
}

impl<R: Read> Read for EntryReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let cap = u64::min(buf.len() as u64, self.archive.remaining) as usize;

        if cap == 0 {
            return Ok(0);
        }

        let read = self.archive.reader.read(&mut buf[..cap])?;
        self.archive.remaining -= read as u64;

        Ok(read)
    }
}
