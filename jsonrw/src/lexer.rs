// SPDX-License-Identifier: Apache-2.0

//! The LL(1) JSON lexer.
//!
//! The lexer keeps exactly one byte of lookahead (the current byte) and
//! classifies the input one [`Token`] at a time. String tokens are opaque:
//! the lexer stops on the opening quote and leaves the body for the caller to
//! either materialize ([`Lexer::read_string_body`]) or skip
//! ([`Lexer::skip_string`]).

use alloc::vec::Vec;

use crate::escape::{self, SurrogateCollector};
use crate::number_parser::lex_number;
use crate::{ByteSource, Error};

/// A classified unit of JSON syntax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number without fraction or exponent that fits `i64`.
    Integer(i64),
    /// A number with a fraction and/or an exponent.
    Number(f64),
    /// A string; the body has not been consumed yet.
    String,
    /// No more input.
    End,
    /// Malformed input.
    Error,
}

/// Payload-free discriminant of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    Null,
    Bool,
    Integer,
    Number,
    String,
    End,
    Error,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::BeginObject => TokenKind::BeginObject,
            Token::EndObject => TokenKind::EndObject,
            Token::BeginArray => TokenKind::BeginArray,
            Token::EndArray => TokenKind::EndArray,
            Token::Colon => TokenKind::Colon,
            Token::Comma => TokenKind::Comma,
            Token::Null => TokenKind::Null,
            Token::Bool(_) => TokenKind::Bool,
            Token::Integer(_) => TokenKind::Integer,
            Token::Number(_) => TokenKind::Number,
            Token::String => TokenKind::String,
            Token::End => TokenKind::End,
            Token::Error => TokenKind::Error,
        }
    }
}

/// Tokenizer over any [`ByteSource`].
pub struct Lexer<S> {
    source: S,
    current: Option<u8>,
}

impl<S: ByteSource> Lexer<S> {
    /// Creates a lexer and loads the first byte.
    pub fn new(mut source: S) -> Self {
        let current = source.next_byte();
        Self { source, current }
    }

    /// The current, not yet consumed, byte.
    pub(crate) fn current(&self) -> Option<u8> {
        self.current
    }

    /// Consumes the current byte and loads the next one.
    pub(crate) fn bump(&mut self) -> Option<u8> {
        self.current = self.source.next_byte();
        self.current
    }

    /// Number of bytes consumed from the source, the current byte included.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn skip_whitespace(&mut self) {
        while self.current.is_some_and(|b| b.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Matches the rest of a keyword whose first byte is current.
    ///
    /// On mismatch the matched prefix stays consumed and the offending byte
    /// becomes the current byte.
    fn lex_literal(&mut self, rest: &[u8], token: Token) -> Token {
        for &expected in rest {
            if self.bump() != Some(expected) {
                log::trace!("bad literal at offset {}", self.position());
                return Token::Error;
            }
        }
        self.bump();
        token
    }

    /// Produces the next token.
    ///
    /// For [`Token::String`] the current byte is left on the opening quote.
    pub fn advance(&mut self) -> Token {
        self.skip_whitespace();

        let Some(byte) = self.current else {
            return Token::End;
        };

        let structural = match byte {
            b'{' => Some(Token::BeginObject),
            b'}' => Some(Token::EndObject),
            b'[' => Some(Token::BeginArray),
            b']' => Some(Token::EndArray),
            b':' => Some(Token::Colon),
            b',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(token) = structural {
            self.bump();
            return token;
        }

        match byte {
            b'"' => Token::String,
            b'n' => self.lex_literal(b"ull", Token::Null),
            b't' => self.lex_literal(b"rue", Token::Bool(true)),
            b'f' => self.lex_literal(b"alse", Token::Bool(false)),
            _ => lex_number(self),
        }
    }

    /// Scans past a string body without materializing it.
    ///
    /// The current byte must be the opening quote. Returns the offset of the
    /// closing quote and leaves the byte after it as current, or `None` if
    /// the input ends first.
    pub fn skip_string(&mut self) -> Option<usize> {
        loop {
            match self.bump()? {
                b'"' => {
                    let closing = self.position().saturating_sub(1);
                    self.bump();
                    return Some(closing);
                }
                b'\\' => {
                    self.bump()?;
                }
                _ => {}
            }
        }
    }

    /// Reads a string body, unescaping it into `out`.
    ///
    /// The current byte must be the opening quote. On success the byte after
    /// the closing quote is current. Raw bytes are copied as-is; UTF-8
    /// validation is left to the caller.
    pub fn read_string_body(&mut self, out: &mut Vec<u8>) -> Result<(), Error> {
        let mut surrogates = SurrogateCollector::new();
        loop {
            match self.bump().ok_or(Error::Lexical)? {
                b'"' => {
                    surrogates.check_complete()?;
                    self.bump();
                    return Ok(());
                }
                b'\\' => {
                    let escape_char = self.bump().ok_or(Error::Lexical)?;
                    if escape_char == b'u' {
                        let codepoint = self.read_hex4()?;
                        surrogates.push(codepoint, out)?;
                    } else {
                        surrogates.check_complete()?;
                        let unescaped =
                            escape::unescape_simple(escape_char).ok_or(Error::Lexical)?;
                        out.push(unescaped);
                    }
                }
                byte => {
                    surrogates.check_complete()?;
                    out.push(byte);
                }
            }
        }
    }

    fn read_hex4(&mut self) -> Result<u32, Error> {
        let mut codepoint = 0u32;
        for _ in 0..4 {
            let byte = self.bump().ok_or(Error::Lexical)?;
            let digit = escape::hex_digit(byte).ok_or_else(|| {
                log::trace!("bad hex digit in \\u escape at offset {}", self.position());
                Error::Lexical
            })?;
            codepoint = (codepoint << 4) | digit;
        }
        Ok(codepoint)
    }
}

/// Iterator over the tokens of a document.
///
/// Yields every token before [`Token::End`], skipping string bodies, and
/// stops after the first [`Token::Error`].
pub struct Tokens<S> {
    lexer: Lexer<S>,
    in_string: bool,
    done: bool,
}

impl<S: ByteSource> Tokens<S> {
    pub fn new(source: S) -> Self {
        Self {
            lexer: Lexer::new(source),
            in_string: false,
            done: false,
        }
    }
}

impl<S: ByteSource> Iterator for Tokens<S> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        if self.in_string {
            self.in_string = false;
            if self.lexer.skip_string().is_none() {
                self.done = true;
                return Some(Token::Error);
            }
        }
        let token = self.lexer.advance();
        match token {
            Token::End => {
                self.done = true;
                None
            }
            Token::Error => {
                self.done = true;
                Some(token)
            }
            Token::String => {
                self.in_string = true;
                Some(token)
            }
            _ => Some(token),
        }
    }
}
