// SPDX-License-Identifier: Apache-2.0

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::lexer::{Lexer, Token, TokenKind};
use crate::{ByteSource, ChunkedSource, Decode, Error, Slice, SliceSource, StreamRead};

/// A pull-based typed JSON reader.
///
/// The reader holds one token of lookahead, primed at construction. Every
/// read checks the lookahead first: on a match the value is returned and the
/// lookahead advances, on a mismatch nothing is consumed. Composite values
/// are read through callbacks: [`read_array`](Self::read_array) calls back
/// once per element and [`read_object`](Self::read_object) once per key, and
/// each callback must consume exactly one value.
///
/// After any error the reader is left wherever the failed attempt stopped and
/// should be dropped.
///
/// # Example
/// ```
/// use jsonrw::{Error, Reader};
///
/// let mut reader = Reader::from_slice(r#"{"name": "x", "tags": ["a", "b"]}"#);
/// let mut name = String::new();
/// let mut tags = Vec::new();
/// reader
///     .read_object(|r, key| match key {
///         "name" => r.read_string_into(&mut name),
///         "tags" => r.read_vec_into(&mut tags, |r| r.read_string()),
///         _ => Err(Error::UnknownKey),
///     })
///     .unwrap();
/// assert_eq!(name, "x");
/// assert_eq!(tags, ["a", "b"]);
/// ```
pub struct Reader<S> {
    lexer: Lexer<S>,
    token: Token,
    /// Unescape buffer, reused across strings
    scratch: Vec<u8>,
    /// Key buffer, reused across object entries
    key: String,
}

impl<'a> Reader<SliceSource<'a>> {
    /// Creates a reader over a complete in-memory document.
    ///
    /// Accepts anything that views as bytes: `&str`, `&[u8]`, `&[u8; N]`.
    pub fn from_slice<T: AsRef<[u8]> + ?Sized>(input: &'a T) -> Self {
        Self::new(SliceSource::new(input.as_ref()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Self::from_slice(input)
    }

    /// Reads a string value as a zero-copy [`Slice`] of its raw body.
    ///
    /// Escape sequences are not decoded.
    pub fn read_slice(&mut self) -> Result<Slice<'a>, Error> {
        if self.token != Token::String {
            return Err(self.mismatch());
        }
        // The current byte is the opening quote, so the body starts right after it
        let start = self.lexer.position();
        let end = self.lexer.skip_string().ok_or(Error::Lexical)?;
        let bytes = self.lexer.source().slice(start, end).ok_or(Error::Lexical)?;
        self.advance();
        Ok(Slice::new(bytes))
    }

    /// Reads an object key as a zero-copy [`Slice`] and consumes the `:`.
    pub fn read_key_slice(&mut self) -> Result<Slice<'a>, Error> {
        let key = self.read_slice()?;
        self.expect_closing(TokenKind::Colon)?;
        Ok(key)
    }

    /// Like [`read_object`](Self::read_object), but hands keys out as
    /// [`Slice`]s so that dispatching on them allocates nothing.
    pub fn read_object_slices<F>(&mut self, mut entry: F) -> Result<(), Error>
    where
        F: FnMut(&mut Self, Slice<'a>) -> Result<(), Error>,
    {
        self.expect_opening(TokenKind::BeginObject)?;
        while !self.next_is(TokenKind::EndObject) {
            let key = self.read_key_slice()?;
            entry(self, key)?;
            if !self.consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(TokenKind::EndObject)
    }
}

impl<'b, R: StreamRead> Reader<ChunkedSource<'b, R>> {
    /// Creates a reader pulling from `reader` through `buffer`.
    ///
    /// The buffer length is the refill size. Zero-copy [`Slice`] reads are
    /// not available on streamed input because a refill overwrites the buffer.
    pub fn from_stream(reader: R, buffer: &'b mut [u8]) -> Self {
        Self::new(ChunkedSource::new(reader, buffer))
    }
}

impl<S: ByteSource> Reader<S> {
    /// Creates a reader over `source` and primes the first token.
    pub fn new(source: S) -> Self {
        let mut lexer = Lexer::new(source);
        let token = lexer.advance();
        Self {
            lexer,
            token,
            scratch: Vec::new(),
            key: String::new(),
        }
    }

    /// The current lookahead token.
    pub fn peek(&self) -> Token {
        self.token
    }

    pub fn next_is(&self, kind: TokenKind) -> bool {
        self.token.kind() == kind
    }

    /// Number of bytes pulled from the source so far.
    ///
    /// The lookahead token has already been scanned, so this points just past
    /// it. Intended for error reporting by callers.
    pub fn position(&self) -> usize {
        self.lexer.position()
    }

    pub fn source(&self) -> &S {
        self.lexer.source()
    }

    pub fn into_source(self) -> S {
        self.lexer.into_source()
    }

    fn advance(&mut self) {
        self.token = self.lexer.advance();
    }

    /// The error to report when the lookahead is not what was asked for.
    fn mismatch(&self) -> Error {
        match self.token {
            Token::Error => Error::Lexical,
            Token::End => Error::EndOfInput,
            _ => Error::TypeMismatch,
        }
    }

    fn expect_opening(&mut self, kind: TokenKind) -> Result<(), Error> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    fn expect_closing(&mut self, kind: TokenKind) -> Result<(), Error> {
        if self.consume(kind) {
            return Ok(());
        }
        log::debug!("expected {:?}, found {:?} at offset {}", kind, self.token, self.position());
        match self.token {
            Token::Error => Err(Error::Lexical),
            _ => Err(Error::Structural),
        }
    }

    /// Consumes the lookahead if it is of `kind`.
    ///
    /// Consuming a [`TokenKind::String`] skips its body. Returns false, and
    /// consumes nothing, on a kind mismatch.
    pub fn consume(&mut self, kind: TokenKind) -> bool {
        if self.token.kind() != kind {
            return false;
        }
        if kind == TokenKind::String && self.lexer.skip_string().is_none() {
            self.token = Token::Error;
            return false;
        }
        self.advance();
        true
    }

    /// Skips one complete value, nested arrays and objects included.
    ///
    /// Strings are scanned without being materialized. On success the reader
    /// is positioned on the token following the value. This is how lenient
    /// object callbacks discard values they do not recognize. The skipped value
    /// must still be well formed.
    pub fn skip_value(&mut self) -> Result<(), Error> {
        match self.token {
            Token::BeginArray => self.read_array(|r| r.skip_value()),
            Token::BeginObject => {
                self.advance();
                while !self.next_is(TokenKind::EndObject) {
                    self.skip_key()?;
                    self.skip_value()?;
                    if !self.consume(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect_closing(TokenKind::EndObject)
            }
            Token::String => self.skip_string(),
            Token::Null | Token::Bool(_) | Token::Integer(_) | Token::Number(_) => {
                self.advance();
                Ok(())
            }
            Token::EndObject | Token::EndArray => Err(Error::Structural),
            _ => Err(self.mismatch()),
        }
    }

    /// Skips an object key and its `:` without materializing the key.
    fn skip_key(&mut self) -> Result<(), Error> {
        if !self.next_is(TokenKind::String) {
            return Err(self.mismatch());
        }
        self.skip_string()?;
        self.expect_closing(TokenKind::Colon)
    }

    fn skip_string(&mut self) -> Result<(), Error> {
        if self.consume(TokenKind::String) {
            Ok(())
        } else {
            Err(Error::Lexical)
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        match self.token {
            Token::Bool(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.mismatch()),
        }
    }

    /// Reads an integer token. Numbers with a fraction or exponent are rejected.
    pub fn read_i64(&mut self) -> Result<i64, Error> {
        self.read_int()
    }

    /// Reads an integer token into any type convertible from `i64`.
    ///
    /// A value that does not fit `T` fails with [`Error::NumericOverflow`]
    /// and is left unconsumed.
    pub fn read_int<T: TryFrom<i64>>(&mut self) -> Result<T, Error> {
        match self.token {
            Token::Integer(value) => {
                let value = T::try_from(value).map_err(|_| Error::NumericOverflow)?;
                self.advance();
                Ok(value)
            }
            _ => Err(self.mismatch()),
        }
    }

    /// Reads a number. Integer tokens are widened.
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let value = match self.token {
            Token::Integer(value) => value as f64,
            Token::Number(value) => value,
            _ => return Err(self.mismatch()),
        };
        self.advance();
        Ok(value)
    }

    /// Reads a number narrowed to `f32`.
    ///
    /// A finite value beyond the `f32` range fails with [`Error::NumericOverflow`].
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        let wide = match self.token {
            Token::Integer(value) => value as f64,
            Token::Number(value) => value,
            _ => return Err(self.mismatch()),
        };
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(Error::NumericOverflow);
        }
        self.advance();
        Ok(narrow)
    }

    /// Materializes a string value into `out`, replacing its contents.
    pub fn read_string_into(&mut self, out: &mut String) -> Result<(), Error> {
        if self.token != Token::String {
            return Err(self.mismatch());
        }
        self.scratch.clear();
        self.lexer.read_string_body(&mut self.scratch)?;
        let text = core::str::from_utf8(&self.scratch)?;
        out.clear();
        out.push_str(text);
        self.advance();
        Ok(())
    }

    pub fn read_string(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        self.read_string_into(&mut out)?;
        Ok(out)
    }

    /// Reads an object key into `key` and consumes the following `:`.
    pub fn read_key_into(&mut self, key: &mut String) -> Result<(), Error> {
        self.read_string_into(key)?;
        self.expect_closing(TokenKind::Colon)
    }

    pub fn read_key(&mut self) -> Result<String, Error> {
        let mut key = String::new();
        self.read_key_into(&mut key)?;
        Ok(key)
    }

    /// Reads any [`Decode`] type.
    pub fn read<T: Decode>(&mut self) -> Result<T, Error> {
        T::decode(self)
    }

    /// Reads `null` as `None`, anything else through `read`.
    pub fn read_nullable<T, F>(&mut self, read: F) -> Result<Option<T>, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        if self.consume(TokenKind::Null) {
            return Ok(None);
        }
        read(self).map(Some)
    }

    /// Drives the array protocol, calling `element` once per element.
    ///
    /// A trailing comma before `]` is accepted. A missing element (`[1,,2]`)
    /// is not, because the callback fails on the unexpected `,`.
    pub fn read_array<F>(&mut self, mut element: F) -> Result<(), Error>
    where
        F: FnMut(&mut Self) -> Result<(), Error>,
    {
        self.expect_opening(TokenKind::BeginArray)?;
        while !self.next_is(TokenKind::EndArray) {
            element(self)?;
            if !self.consume(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(TokenKind::EndArray)
    }

    /// Drives the object protocol, calling `entry` once per key.
    ///
    /// The callback receives the materialized key and must consume exactly
    /// one value. Unknown keys are the callback's decision: fail with
    /// [`Error::UnknownKey`] for a closed schema, or call
    /// [`skip_value`](Self::skip_value) for an open one.
    pub fn read_object<F>(&mut self, mut entry: F) -> Result<(), Error>
    where
        F: FnMut(&mut Self, &str) -> Result<(), Error>,
    {
        self.expect_opening(TokenKind::BeginObject)?;
        // Take the key buffer so the callback can borrow the reader mutably
        let mut key = core::mem::take(&mut self.key);
        let entries = self.read_entries(&mut key, &mut entry);
        key.clear();
        self.key = key;
        entries?;
        self.expect_closing(TokenKind::EndObject)
    }

    fn read_entries<F>(&mut self, key: &mut String, entry: &mut F) -> Result<(), Error>
    where
        F: FnMut(&mut Self, &str) -> Result<(), Error>,
    {
        while !self.next_is(TokenKind::EndObject) {
            self.read_key_into(key)?;
            entry(self, key)?;
            if !self.consume(TokenKind::Comma) {
                break;
            }
        }
        Ok(())
    }

    /// Reads an array into `out`, replacing its contents.
    ///
    /// On failure `out` keeps every element decoded before the failing one.
    pub fn read_vec_into<T, F>(&mut self, out: &mut Vec<T>, mut element: F) -> Result<(), Error>
    where
        F: FnMut(&mut Self) -> Result<T, Error>,
    {
        out.clear();
        self.read_array(|r| {
            out.push(element(r)?);
            Ok(())
        })
    }

    pub fn read_vec<T, F>(&mut self, element: F) -> Result<Vec<T>, Error>
    where
        F: FnMut(&mut Self) -> Result<T, Error>,
    {
        let mut out = Vec::new();
        self.read_vec_into(&mut out, element)?;
        Ok(out)
    }

    /// Reads an object into a map, replacing its contents.
    ///
    /// Duplicate keys keep the last value. On failure `out` keeps every
    /// entry decoded before the failing one.
    pub fn read_map_into<T, F>(
        &mut self,
        out: &mut BTreeMap<String, T>,
        mut value: F,
    ) -> Result<(), Error>
    where
        F: FnMut(&mut Self) -> Result<T, Error>,
    {
        out.clear();
        self.read_object(|r, key| {
            let v = value(r)?;
            out.insert(String::from(key), v);
            Ok(())
        })
    }

    pub fn read_map<T, F>(&mut self, value: F) -> Result<BTreeMap<String, T>, Error>
    where
        F: FnMut(&mut Self) -> Result<T, Error>,
    {
        let mut out = BTreeMap::new();
        self.read_map_into(&mut out, value)?;
        Ok(out)
    }
}
