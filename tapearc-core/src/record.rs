//! Fixed 512-byte record I/O.
//!
//! TAR streams are sequences of 512-byte records. [`RecordReader`] buffers
//! exactly one record from a byte source and serves sub-record reads and
//! boundary-crossing skips; [`RecordWriter`] buffers writes into records,
//! flushes full records zero-padded, and emits the two-record archive
//! terminator.
//!
//! # Example
//!
//! ```
//! use tapearc_core::record::{RECORD_LEN, RecordReader, RecordWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = RecordWriter::new(&mut output);
//!     writer.write(b"hello").unwrap();
//!     writer.flush_record().unwrap();
//!     writer.complete().unwrap();
//! }
//! assert_eq!(output.len(), 3 * RECORD_LEN);
//!
//! let mut reader = RecordReader::new(Cursor::new(output));
//! reader.next_record().unwrap();
//! assert_eq!(&reader.record()[..5], b"hello");
//! ```

use crate::error::{Result, TapeArcError};
use std::io::{self, Read, Write};

/// Length of one record, the archive's atomic I/O unit.
pub const RECORD_LEN: usize = 512;

/// A reader that serves one 512-byte record at a time from a byte source.
///
/// The internal cursor never crosses a record boundary on its own: a fresh
/// record is only loaded by [`next_record`], by [`read`] once the current
/// record is exhausted, or by [`advance`].
///
/// [`next_record`]: RecordReader::next_record
/// [`read`]: RecordReader::read
/// [`advance`]: RecordReader::advance
#[derive(Debug)]
pub struct RecordReader<R: Read> {
    source: R,
    buffer: [u8; RECORD_LEN],
    position: usize,
}

impl<R: Read> RecordReader<R> {
    /// Create a new `RecordReader` wrapping the given source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: [0; RECORD_LEN],
            position: RECORD_LEN,
        }
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Consume this `RecordReader` and return the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// The currently buffered record.
    pub fn record(&self) -> &[u8; RECORD_LEN] {
        &self.buffer
    }

    /// Discard the rest of the current record and load the next one,
    /// resetting the cursor to its start.
    ///
    /// # Errors
    ///
    /// [`TapeArcError::TruncatedRecord`] when the source ends before a full
    /// record is accumulated, [`TapeArcError::Io`] on transport failure.
    pub fn next_record(&mut self) -> Result<()> {
        let mut total = 0;

        while total < RECORD_LEN {
            match self.source.read(&mut self.buffer[total..]) {
                Ok(0) => return Err(TapeArcError::TruncatedRecord { read: total }),
                Ok(read) => total += read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }

        self.position = 0;
        Ok(())
    }

    /// Copy bytes from the current record into `output`, loading the next
    /// record first when the current one is exhausted.
    ///
    /// At most the remainder of one record is served per call; callers loop
    /// to cross boundaries.
    pub fn read(&mut self, output: &mut [u8]) -> Result<usize> {
        if self.position == RECORD_LEN {
            self.next_record()?;
        }

        let start = self.position;
        let end = (start + output.len()).min(RECORD_LEN);

        output[..end - start].copy_from_slice(&self.buffer[start..end]);
        self.position = end;

        Ok(end - start)
    }

    /// Skip at least `count` bytes, in whole remaining-record chunks,
    /// loading records as needed.
    ///
    /// Always lands on a record boundary, which is what discards the
    /// zero-padding that follows entry content.
    pub fn advance(&mut self, count: u64) -> Result<()> {
        let mut advanced = 0u64;

        while advanced < count {
            if self.position == RECORD_LEN {
                self.next_record()?;
            }

            advanced += (RECORD_LEN - self.position) as u64;
            self.position = RECORD_LEN;
        }

        Ok(())
    }
}

/// A writer that buffers bytes into 512-byte records for a byte sink.
///
/// Full records are flushed as they fill; a partial record is only written
/// by [`flush_record`], zero-padded to full length. [`complete`] emits the
/// two zero records that terminate an archive and requires an empty buffer.
///
/// [`flush_record`]: RecordWriter::flush_record
/// [`complete`]: RecordWriter::complete
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    sink: W,
    buffer: [u8; RECORD_LEN],
    buffered: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Create a new `RecordWriter` wrapping the given sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            buffer: [0; RECORD_LEN],
            buffered: 0,
        }
    }

    /// Get a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Get a mutable reference to the underlying sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume this `RecordWriter` and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Number of bytes sitting in the current partial record.
    pub fn buffered(&self) -> usize {
        self.buffered
    }

    /// Copy all of `input` into the record buffer, flushing each record to
    /// the sink as it fills.
    pub fn write(&mut self, mut input: &[u8]) -> Result<()> {
        while !input.is_empty() {
            let amount = input.len().min(RECORD_LEN - self.buffered);

            self.buffer[self.buffered..self.buffered + amount]
                .copy_from_slice(&input[..amount]);
            self.buffered += amount;
            input = &input[amount..];

            if self.buffered == RECORD_LEN {
                self.sink.write_all(&self.buffer)?;
                self.buffer.fill(0);
                self.buffered = 0;
            }
        }

        Ok(())
    }

    /// Write a partially filled buffer to the sink as one zero-padded full
    /// record. Does nothing when the buffer is empty.
    pub fn flush_record(&mut self) -> Result<()> {
        if self.buffered > 0 {
            // Bytes past the fill count are still zero.
            self.sink.write_all(&self.buffer)?;
            self.buffer.fill(0);
            self.buffered = 0;
        }

        Ok(())
    }

    /// Write the archive terminator (two zero records) and flush the sink.
    ///
    /// # Errors
    ///
    /// [`TapeArcError::UnflushedData`] when a partial record is pending; the
    /// terminator is not written in that case.
    pub fn complete(&mut self) -> Result<()> {
        if self.buffered != 0 {
            return Err(TapeArcError::UnflushedData {
                buffered: self.buffered,
            });
        }

        self.buffer.fill(0);
        self.sink.write_all(&self.buffer)?;
        self.sink.write_all(&self.buffer)?;
        self.sink.flush()?;

        Ok(())
    }
}

impl<W: Write> Write for RecordWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        RecordWriter::write(self, buf)?;
        Ok(buf.len())
    }

    // Record flushing stays explicit; see `flush_record`.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_next_record_truncation() {
        let mut reader = RecordReader::new(Cursor::new(vec![0u8; 100]));
        assert!(matches!(
            reader.next_record(),
            Err(TapeArcError::TruncatedRecord { read: 100 })
        ));

        let mut reader = RecordReader::new(Cursor::new(Vec::new()));
        assert!(matches!(
            reader.next_record(),
            Err(TapeArcError::TruncatedRecord { read: 0 })
        ));
    }

    #[test]
    fn test_read_within_record() {
        let mut data = vec![0u8; RECORD_LEN];
        data[..4].copy_from_slice(b"abcd");

        let mut reader = RecordReader::new(Cursor::new(data));
        reader.next_record().unwrap();

        let mut out = [0u8; 2];
        assert_eq!(reader.read(&mut out).unwrap(), 2);
        assert_eq!(&out, b"ab");
        assert_eq!(reader.read(&mut out).unwrap(), 2);
        assert_eq!(&out, b"cd");
    }

    #[test]
    fn test_read_does_not_cross_boundary() {
        let mut data = vec![0u8; 2 * RECORD_LEN];
        data[RECORD_LEN - 1] = b'x';
        data[RECORD_LEN] = b'y';

        let mut reader = RecordReader::new(Cursor::new(data));
        reader.next_record().unwrap();
        reader.advance(RECORD_LEN as u64 - 1).unwrap();

        // The skip landed on the boundary, so the next read loads a record.
        let mut out = [0u8; 4];
        assert_eq!(reader.read(&mut out).unwrap(), 4);
        assert_eq!(out[0], b'y');
    }

    #[test]
    fn test_advance_crosses_records() {
        let mut data = vec![0u8; 3 * RECORD_LEN];
        data[2 * RECORD_LEN] = b'z';

        let mut reader = RecordReader::new(Cursor::new(data));
        reader.next_record().unwrap();

        let mut out = [0u8; 1];
        reader.read(&mut out).unwrap();

        // Two content records remain outstanding after a 1-byte read of a
        // 600-byte payload; a skip of the remainder consumes both.
        reader.advance(599).unwrap();

        reader.next_record().unwrap();
        assert_eq!(reader.record()[0], b'z');
    }

    #[test]
    fn test_writer_pads_partial_record() {
        let mut output = Vec::new();
        let mut writer = RecordWriter::new(&mut output);

        writer.write(b"hello").unwrap();
        assert_eq!(writer.buffered(), 5);
        writer.flush_record().unwrap();
        assert_eq!(writer.buffered(), 0);

        assert_eq!(output.len(), RECORD_LEN);
        assert_eq!(&output[..5], b"hello");
        assert!(output[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_writer_flushes_full_records() {
        let mut output = Vec::new();
        let mut writer = RecordWriter::new(&mut output);

        writer.write(&[b'a'; RECORD_LEN + 10]).unwrap();
        assert_eq!(writer.buffered(), 10);
        assert_eq!(writer.get_ref().len(), RECORD_LEN);

        writer.flush_record().unwrap();
        assert_eq!(output.len(), 2 * RECORD_LEN);
        assert!(output[RECORD_LEN + 10..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_complete_writes_terminator() {
        let mut output = Vec::new();
        let mut writer = RecordWriter::new(&mut output);
        writer.complete().unwrap();

        assert_eq!(output.len(), 2 * RECORD_LEN);
        assert!(output.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_complete_rejects_pending_partial_record() {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write(b"abc").unwrap();

        assert!(matches!(
            writer.complete(),
            Err(TapeArcError::UnflushedData { buffered: 3 })
        ));
        assert!(writer.get_ref().is_empty());
    }

    #[test]
    fn test_io_write_impl() {
        let mut output = Vec::new();
        {
            let mut writer = RecordWriter::new(&mut output);
            let mut content = Cursor::new(vec![b'q'; 700]);
            std::io::copy(&mut content, &mut writer).unwrap();
            writer.flush_record().unwrap();
        }

        assert_eq!(output.len(), 2 * RECORD_LEN);
        assert!(output[..700].iter().all(|&b| b == b'q'));
        assert!(output[700..].iter().all(|&b| b == 0));
    }
}
