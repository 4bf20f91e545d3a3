// SPDX-License-Identifier: Apache-2.0

//! Byte sources feeding the [`Lexer`](crate::Lexer).
//!
//! [`SliceSource`] walks a complete document held in memory. [`ChunkedSource`]
//! pulls data through a [`StreamRead`] into a caller-provided buffer and
//! refills it whenever it runs dry. Both yield the same bytes in the same
//! order, so the lexer produces identical token streams for either.

/// A forward-only supply of bytes.
pub trait ByteSource {
    /// Returns the next byte, or `None` once the input is exhausted.
    ///
    /// After `None` has been returned, every further call returns `None`.
    fn next_byte(&mut self) -> Option<u8>;

    /// Number of bytes yielded so far.
    fn position(&self) -> usize;
}

/// Trait for input sources that can provide data to a [`ChunkedSource`].
pub trait StreamRead {
    /// The error type returned by read operations
    type Error;

    /// Read data into the provided buffer.
    /// Returns the number of bytes read, or an error.
    ///
    /// # Contract
    /// - A return value of 0 **MUST** indicate true end of stream
    /// - Implementations **MUST NOT** return 0 unless no more data will ever be available
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: StreamRead + ?Sized> StreamRead for &mut T {
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }
}

/// A source over a complete in-memory document.
///
/// Because the whole document outlives the source, string bodies can be
/// handed out as [`Slice`](crate::Slice)s borrowing `'a` directly.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a new SliceSource over the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Gets a slice of the data from start to end positions, with bounds checking.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a [u8]> {
        self.data.get(start..end)
    }

    /// Gets the length of the underlying data.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.pos).copied()?;
        self.pos = self.pos.saturating_add(1);
        Some(byte)
    }

    fn position(&self) -> usize {
        self.pos
    }
}

/// A source that pulls from a [`StreamRead`] through a fixed-capacity buffer.
///
/// The buffer is borrowed from the caller and its length is the refill
/// size: each refill asks the reader for at most `buffer.len()` bytes.
/// Refills only happen between bytes, never in the middle of handing one out.
///
/// A read error ends the input. It is logged, and [`failed`](Self::failed)
/// reports it afterwards so a truncated stream can be told apart from a clean end.
pub struct ChunkedSource<'b, R: StreamRead> {
    reader: R,
    buffer: &'b mut [u8],
    /// Next unread byte in `buffer`
    pos: usize,
    /// End of valid data in `buffer`
    data_end: usize,
    /// Total bytes handed out
    consumed: usize,
    finished: bool,
    failed: bool,
}

impl<'b, R: StreamRead> ChunkedSource<'b, R> {
    /// Create a new ChunkedSource reading from `reader` into `buffer`.
    ///
    /// An empty `buffer` behaves as an empty stream.
    pub fn new(reader: R, buffer: &'b mut [u8]) -> Self {
        Self {
            reader,
            buffer,
            pos: 0,
            data_end: 0,
            consumed: 0,
            finished: false,
            failed: false,
        }
    }

    /// Returns true if input ended because the reader reported an error.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Consumes the source, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn refill(&mut self) -> bool {
        if self.finished {
            return false;
        }
        match self.reader.read(&mut *self.buffer) {
            Ok(0) => {
                self.finished = true;
                false
            }
            Ok(n) => {
                // A reader claiming more than it was given is clamped to the buffer
                self.data_end = n.min(self.buffer.len());
                self.pos = 0;
                log::debug!("refilled {} bytes at offset {}", self.data_end, self.consumed);
                self.data_end > 0
            }
            Err(_) => {
                log::warn!("stream read failed at offset {}", self.consumed);
                self.finished = true;
                self.failed = true;
                false
            }
        }
    }
}

impl<R: StreamRead> ByteSource for ChunkedSource<'_, R> {
    fn next_byte(&mut self) -> Option<u8> {
        if self.pos >= self.data_end && !self.refill() {
            return None;
        }
        let byte = self.buffer.get(self.pos).copied()?;
        self.pos = self.pos.wrapping_add(1);
        self.consumed = self.consumed.saturating_add(1);
        Some(byte)
    }

    fn position(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkReader;

    struct FailingReader {
        chunks_left: usize,
    }

    impl StreamRead for FailingReader {
        type Error = ();

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            if self.chunks_left == 0 {
                return Err(());
            }
            self.chunks_left -= 1;
            buf[0] = b'x';
            Ok(1)
        }
    }

    #[test]
    fn test_slice_source_boundary_behavior() {
        let data = b"abc";
        let mut source = SliceSource::new(data);

        assert_eq!(source.position(), 0);
        assert_eq!(source.next_byte(), Some(b'a'));
        assert_eq!(source.position(), 1);
        assert_eq!(source.next_byte(), Some(b'b'));
        assert_eq!(source.next_byte(), Some(b'c'));
        assert_eq!(source.position(), 3);

        // Exhaustion is sticky and does not move the cursor
        assert_eq!(source.next_byte(), None);
        assert_eq!(source.next_byte(), None);
        assert_eq!(source.position(), 3);
    }

    #[test]
    fn test_slice_source_slice_bounds() {
        let source = SliceSource::new(b"hello");
        assert_eq!(source.slice(1, 4), Some(&b"ell"[..]));
        assert_eq!(source.slice(0, 6), None);
        assert_eq!(source.slice(4, 2), None);
        assert_eq!(source.data_len(), 5);
    }

    #[test]
    fn test_chunked_source_yields_all_bytes() {
        let mut buffer = [0u8; 3];
        let mut source = ChunkedSource::new(ChunkReader::new(b"hello world", 2), &mut buffer);

        let mut out = alloc::vec::Vec::new();
        while let Some(b) = source.next_byte() {
            out.push(b);
        }
        assert_eq!(out, b"hello world");
        assert_eq!(source.position(), 11);
        assert_eq!(source.next_byte(), None);
        assert!(!source.failed());
    }

    #[test]
    fn test_chunked_source_empty_buffer_is_empty_stream() {
        let mut buffer = [0u8; 0];
        let mut source = ChunkedSource::new(ChunkReader::full_slice(b"123"), &mut buffer);
        assert_eq!(source.next_byte(), None);
        assert_eq!(source.position(), 0);
    }

    #[test_log::test]
    fn test_chunked_source_read_error_ends_input() {
        let mut buffer = [0u8; 4];
        let mut source = ChunkedSource::new(FailingReader { chunks_left: 2 }, &mut buffer);
        assert_eq!(source.next_byte(), Some(b'x'));
        assert_eq!(source.next_byte(), Some(b'x'));
        assert_eq!(source.next_byte(), None);
        assert!(source.failed());
        assert_eq!(source.next_byte(), None);
    }

    #[test]
    fn test_chunked_source_over_mut_reference() {
        let mut reader = ChunkReader::new(b"ab", 1);
        let mut buffer = [0u8; 8];
        {
            let mut source = ChunkedSource::new(&mut reader, &mut buffer);
            assert_eq!(source.next_byte(), Some(b'a'));
        }
        // The reader kept its own position
        let mut rest = [0u8; 4];
        assert_eq!(reader.read(&mut rest), Ok(1));
        assert_eq!(rest[0], b'b');
    }
}
