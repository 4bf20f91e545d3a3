// SPDX-License-Identifier: Apache-2.0

//! A streaming JSON tokenizer with a typed, callback-driven read/write protocol.
//!
//! [`Reader`] pulls tokens from either a complete in-memory document
//! ([`SliceSource`]) or a chunked stream ([`ChunkedSource`]) and exposes
//! typed reads. Application types plug in through [`Decode`] and [`Encode`]
//! or through closures passed to the container helpers. [`Writer`] is the
//! inverse and emits compact JSON into any `core::fmt::Write`.
//!
//! ```
//! use jsonrw::{Reader, Writer};
//!
//! let mut reader = Reader::from_slice(r#"{"name": "x", "age": 1}"#);
//! let mut name = String::new();
//! reader
//!     .read_object(|r, key| match key {
//!         "name" => r.read_string_into(&mut name),
//!         _ => r.skip_value(),
//!     })
//!     .unwrap();
//!
//! let mut writer = Writer::new(String::new());
//! writer.write_object(|obj| obj.field("name", &name)).unwrap();
//! assert_eq!(writer.into_inner(), r#"{"name":"x"}"#);
//! ```
//!
//! Without the default `std` feature the crate is `no_std` and needs only
//! `alloc`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod chunk_reader;
pub use chunk_reader::ChunkReader;

mod decode;
pub use decode::Decode;

mod encode;
pub use encode::Encode;

mod error;
pub use error::Error;

pub mod escape;

#[cfg(feature = "std")]
mod io;
#[cfg(feature = "std")]
pub use io::{IoReader, IoSink};

mod lexer;
pub use lexer::{Lexer, Token, TokenKind, Tokens};

mod number_parser;

mod reader;
pub use reader::Reader;

mod slice;
pub use slice::Slice;

mod source;
pub use source::{ByteSource, ChunkedSource, SliceSource, StreamRead};

mod writer;
pub use writer::{ObjectWriter, Writer};
