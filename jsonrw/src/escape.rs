// SPDX-License-Identifier: Apache-2.0

//! JSON string literal escaping and the pieces used to unescape.
//!
//! Encoding escapes `"`, `\`, `/`, the named control characters and any
//! remaining byte below 0x20 as `\u00xx`. Everything else, including
//! multi-byte UTF-8, passes through untouched.
//!
//! Decoding happens in the lexer one byte at a time; this module provides the
//! named escape table, hex digit values, a UTF-8 encoder for `\uXXXX` code
//! points, and [`SurrogateCollector`] which pairs UTF-16 surrogates.

use alloc::vec::Vec;
use core::fmt::Write;

use crate::Error;

/// Maps the character after a backslash to the byte it stands for.
///
/// Returns `None` for `u` (handled separately) and for unknown escapes.
pub fn unescape_simple(escape_char: u8) -> Option<u8> {
    match escape_char {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08), // Backspace
        b'f' => Some(0x0C), // Form feed
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

/// Numeric value (0-15) of a hexadecimal digit.
pub fn hex_digit(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some(u32::from(byte - b'0')),
        b'a'..=b'f' => Some(u32::from(byte - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(byte - b'A') + 10),
        _ => None,
    }
}

/// Encodes a code point as UTF-8 into `buffer`, returning the used prefix.
///
/// Surrogate code points are encoded like any other three-byte value; callers
/// that need valid UTF-8 must pair them first. Returns `None` above U+10FFFF.
pub fn encode_utf8(codepoint: u32, buffer: &mut [u8; 4]) -> Option<&[u8]> {
    let len = match codepoint {
        0..=0x7F => {
            buffer[0] = codepoint as u8;
            1
        }
        0x80..=0x7FF => {
            buffer[0] = 0xC0 | (codepoint >> 6) as u8;
            buffer[1] = 0x80 | (codepoint & 0x3F) as u8;
            2
        }
        0x800..=0xFFFF => {
            buffer[0] = 0xE0 | (codepoint >> 12) as u8;
            buffer[1] = 0x80 | ((codepoint >> 6) & 0x3F) as u8;
            buffer[2] = 0x80 | (codepoint & 0x3F) as u8;
            3
        }
        0x10000..=0x10FFFF => {
            buffer[0] = 0xF0 | (codepoint >> 18) as u8;
            buffer[1] = 0x80 | ((codepoint >> 12) & 0x3F) as u8;
            buffer[2] = 0x80 | ((codepoint >> 6) & 0x3F) as u8;
            buffer[3] = 0x80 | (codepoint & 0x3F) as u8;
            4
        }
        _ => return None,
    };
    buffer.get(..len)
}

/// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
pub fn is_high_surrogate(codepoint: u32) -> bool {
    (0xD800..=0xDBFF).contains(&codepoint)
}

/// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
pub fn is_low_surrogate(codepoint: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&codepoint)
}

/// Pairs `\uXXXX` escapes that form UTF-16 surrogate pairs.
///
/// A high surrogate is held until the next escape arrives. If that escape is
/// a low surrogate the two are combined into one code point; anything else
/// (a lone low surrogate, a high surrogate followed by another character, or
/// a high surrogate at the end of the string) is an error.
#[derive(Debug, Default)]
pub struct SurrogateCollector {
    pending_high: Option<u32>,
}

impl SurrogateCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts one decoded `\uXXXX` code point and appends its UTF-8 form.
    pub fn push(&mut self, codepoint: u32, out: &mut Vec<u8>) -> Result<(), Error> {
        let combined = match self.pending_high.take() {
            Some(high) if is_low_surrogate(codepoint) => {
                0x10000 + ((high & 0x3FF) << 10) + (codepoint & 0x3FF)
            }
            Some(_) => return Err(Error::Lexical),
            None if is_high_surrogate(codepoint) => {
                self.pending_high = Some(codepoint);
                return Ok(());
            }
            None if is_low_surrogate(codepoint) => return Err(Error::Lexical),
            None => codepoint,
        };
        let mut buffer = [0u8; 4];
        let bytes = encode_utf8(combined, &mut buffer).ok_or(Error::Lexical)?;
        out.extend_from_slice(bytes);
        Ok(())
    }

    /// Fails if a high surrogate is still waiting for its pair.
    pub fn check_complete(&self) -> Result<(), Error> {
        match self.pending_high {
            Some(_) => Err(Error::Lexical),
            None => Ok(()),
        }
    }
}

/// Writes `s` as a quoted, escaped JSON string literal.
pub fn write_escaped<W: Write + ?Sized>(out: &mut W, s: &str) -> core::fmt::Result {
    out.write_char('"')?;

    // Every escaped byte is ASCII, so the runs in between sit on char boundaries
    let mut run_start = 0;
    for (i, &byte) in s.as_bytes().iter().enumerate() {
        let named = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'/' => "\\/",
            0x08 => "\\b",
            0x0C => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };
        out.write_str(s.get(run_start..i).unwrap_or_default())?;
        if named.is_empty() {
            write!(out, "\\u{:04x}", byte)?;
        } else {
            out.write_str(named)?;
        }
        run_start = i + 1;
    }
    out.write_str(s.get(run_start..).unwrap_or_default())?;

    out.write_char('"')
}
