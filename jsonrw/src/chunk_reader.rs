// SPDX-License-Identifier: Apache-2.0

//! A convenience [`StreamRead`] implementation for in-memory data.
//!
//! [`ChunkReader`] hands out a byte slice either all at once or in
//! fixed-size chunks. The chunked mode simulates network packets or short
//! file reads, which is how the streaming path of the [`Reader`](crate::Reader)
//! is exercised without real I/O.
//!
//! For real I/O, implement [`StreamRead`] for your input source, or use
//! [`IoReader`](crate::IoReader) with the `std` feature.
//!
//! # Examples
//!
//! ```rust
//! use jsonrw::{ChunkReader, Reader};
//!
//! let json = br#"{"name": "Alice", "age": 30}"#;
//! let mut buffer = [0u8; 8];
//! // Deliver the document three bytes at a time
//! let mut reader = Reader::from_stream(ChunkReader::new(json, 3), &mut buffer);
//!
//! let mut age = 0u32;
//! reader
//!     .read_object(|r, key| match key {
//!         "age" => {
//!             age = r.read_int()?;
//!             Ok(())
//!         }
//!         _ => r.skip_value(),
//!     })
//!     .unwrap();
//! assert_eq!(age, 30);
//! ```

use crate::StreamRead;

/// Serves a byte slice through [`StreamRead`], at most `chunk_size` bytes per call.
///
/// Reads are also bounded by the destination length, so with
/// [`full_slice`](Self::full_slice) each read fills the whole buffer.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    rest: &'a [u8],
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// A chunk size of zero is treated as one.
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            rest: data,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn full_slice(data: &'a [u8]) -> Self {
        Self::new(data, usize::MAX)
    }

    /// Bytes not handed out yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }
}

impl StreamRead for ChunkReader<'_> {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.rest.len().min(buf.len()).min(self.chunk_size);
        let (chunk, rest) = self.rest.split_at(n);
        if let Some(dest) = buf.get_mut(..n) {
            dest.copy_from_slice(chunk);
        }
        self.rest = rest;
        Ok(n)
    }
}
