// SPDX-License-Identifier: Apache-2.0

/// Errors reported by [`Reader`](crate::Reader) and [`Writer`](crate::Writer) operations.
///
/// Errors carry no position or message. A reader that returned an error is
/// left wherever the failed attempt stopped and should be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed literal or number, invalid escape, or unterminated string.
    Lexical,
    /// A required `:` or closing bracket was missing.
    Structural,
    /// The lookahead token is not of the requested kind. Nothing was consumed.
    TypeMismatch,
    /// Input ended where a value was required.
    EndOfInput,
    /// An object key was not recognized by a strict decode callback.
    UnknownKey,
    /// The value does not fit into the requested numeric type.
    NumericOverflow,
    /// A materialized string was not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// The output sink rejected a write.
    Sink,
}

impl From<core::str::Utf8Error> for Error {
    fn from(err: core::str::Utf8Error) -> Self {
        Error::InvalidUtf8(err)
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Sink
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Lexical => f.write_str("malformed JSON token"),
            Error::Structural => f.write_str("missing separator or closing bracket"),
            Error::TypeMismatch => f.write_str("unexpected token type"),
            Error::EndOfInput => f.write_str("unexpected end of input"),
            Error::UnknownKey => f.write_str("unknown object key"),
            Error::NumericOverflow => f.write_str("number out of range"),
            Error::InvalidUtf8(e) => write!(f, "invalid UTF-8: {e}"),
            Error::Sink => f.write_str("output sink failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
