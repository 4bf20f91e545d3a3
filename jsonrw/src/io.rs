// SPDX-License-Identifier: Apache-2.0

//! Adapters between `std::io` and the crate's byte source and output sink.

use std::io;

use crate::StreamRead;

/// Feeds any [`io::Read`] into a [`ChunkedSource`](crate::ChunkedSource).
///
/// Interrupted reads are retried. Any other I/O error is passed on, which
/// ends the input for the lexer.
///
/// ```
/// use jsonrw::{IoReader, Reader};
///
/// let file = std::io::Cursor::new(br#"[1, 2, 3]"#);
/// let mut buffer = [0u8; 4];
/// let mut reader = Reader::from_stream(IoReader::new(file), &mut buffer);
/// let values: Vec<u8> = reader.read().unwrap();
/// assert_eq!(values, [1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
}

impl<R: io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> StreamRead for IoReader<R> {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}

/// Lets a [`Writer`](crate::Writer) emit into any [`io::Write`].
///
/// `core::fmt::Write` cannot carry an I/O error, so the first one is kept
/// here and the writer reports [`Error::Sink`](crate::Error::Sink). Retrieve
/// the cause with [`take_error`](Self::take_error).
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// The I/O error behind the last sink failure, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> core::fmt::Write for IoSink<W> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            log::warn!("output write failed: {}", e);
            self.error = Some(e);
            core::fmt::Error
        })
    }
}
