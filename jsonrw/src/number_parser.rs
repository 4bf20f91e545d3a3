// SPDX-License-Identifier: Apache-2.0

//! Two-phase number lexing.
//!
//! The integer part is accumulated exactly into a `u64` magnitude (and, in
//! parallel, into an `f64` in case a fraction or exponent follows). A
//! fraction adds `digit * scale` per digit with `scale` shrinking tenfold
//! each time. An exponent is applied by multiplying or dividing by ten once
//! per unit of the exponent. Rounding error accumulates for long fractions
//! and large exponents; that is the accepted cost of not delegating to a
//! general float parser.
//!
//! The token kind is decided here and only here: no `.` and no exponent means
//! [`Token::Integer`], anything else is [`Token::Number`].

use crate::lexer::Lexer;
use crate::{ByteSource, Token};

/// Result of scanning a run of decimal digits.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DigitRun {
    /// Exact value, or `None` if it overflowed `u64`
    magnitude: Option<u64>,
    /// Same digits accumulated as a float
    approx: f64,
    digits: usize,
}

fn digit_value(byte: Option<u8>) -> Option<u8> {
    match byte {
        Some(b @ b'0'..=b'9') => Some(b - b'0'),
        _ => None,
    }
}

/// Consumes an optional sign, reporting whether it was `-`.
fn lex_sign<S: ByteSource>(lexer: &mut Lexer<S>) -> bool {
    match lexer.current() {
        Some(b'-') => {
            lexer.bump();
            true
        }
        Some(b'+') => {
            lexer.bump();
            false
        }
        _ => false,
    }
}

fn lex_digits<S: ByteSource>(lexer: &mut Lexer<S>) -> DigitRun {
    let mut run = DigitRun {
        magnitude: Some(0),
        approx: 0.0,
        digits: 0,
    };
    while let Some(digit) = digit_value(lexer.current()) {
        run.magnitude = run
            .magnitude
            .and_then(|m| m.checked_mul(10))
            .and_then(|m| m.checked_add(u64::from(digit)));
        run.approx = run.approx * 10.0 + f64::from(digit);
        run.digits = run.digits.saturating_add(1);
        lexer.bump();
    }
    run
}

/// Lexes a number starting at the lexer's current byte.
///
/// Returns [`Token::Error`] if no digit was seen at all, if an exponent has
/// no digits, or if an integer does not fit `i64`.
pub(crate) fn lex_number<S: ByteSource>(lexer: &mut Lexer<S>) -> Token {
    let negative = lex_sign(lexer);
    let int_part = lex_digits(lexer);

    let mut digits = int_part.digits;
    let mut value = int_part.approx;
    let mut is_float = false;

    if lexer.current() == Some(b'.') {
        lexer.bump();
        let mut scale = 1.0;
        while let Some(digit) = digit_value(lexer.current()) {
            scale /= 10.0;
            value += scale * f64::from(digit);
            digits = digits.saturating_add(1);
            lexer.bump();
        }
        is_float = true;
    }

    if matches!(lexer.current(), Some(b'e' | b'E')) {
        lexer.bump();
        let exp_negative = lex_sign(lexer);
        let exponent = lex_digits(lexer);
        if exponent.digits == 0 {
            log::trace!("exponent without digits at offset {}", lexer.position());
            return Token::Error;
        }
        // Past 0 or infinity further steps cannot change the value
        let mut remaining = exponent.magnitude.unwrap_or(u64::MAX);
        while remaining > 0 && value != 0.0 && value.is_finite() {
            if exp_negative {
                value /= 10.0;
            } else {
                value *= 10.0;
            }
            remaining -= 1;
        }
        is_float = true;
    }

    if digits == 0 {
        log::trace!("number without digits at offset {}", lexer.position());
        return Token::Error;
    }

    if is_float {
        return Token::Number(if negative { -value } else { value });
    }

    let signed = int_part.magnitude.and_then(|m| {
        let wide = i128::from(m);
        i64::try_from(if negative { -wide } else { wide }).ok()
    });
    match signed {
        Some(v) => Token::Integer(v),
        None => {
            log::trace!("integer out of range at offset {}", lexer.position());
            Token::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, SliceSource, Token};
    use test_log::test;

    fn lex_one(input: &str) -> Token {
        Lexer::new(SliceSource::new(input.as_bytes())).advance()
    }

    fn assert_number(input: &str, expected: f64) {
        match lex_one(input) {
            Token::Number(v) => assert!(
                (v - expected).abs() <= expected.abs() * 1e-12 + 1e-12,
                "{input}: {v} != {expected}"
            ),
            other => panic!("{input}: expected Number, got {other:?}"),
        }
    }

    #[test]
    fn test_integers() {
        assert_eq!(lex_one("123"), Token::Integer(123));
        assert_eq!(lex_one("-456"), Token::Integer(-456));
        assert_eq!(lex_one("0"), Token::Integer(0));
        assert_eq!(lex_one("-0"), Token::Integer(0));
        assert_eq!(lex_one("+7"), Token::Integer(7));
    }

    #[test]
    fn test_integer_limits() {
        assert_eq!(
            lex_one("9223372036854775807"),
            Token::Integer(i64::MAX)
        );
        assert_eq!(
            lex_one("-9223372036854775808"),
            Token::Integer(i64::MIN)
        );
        assert_eq!(lex_one("9223372036854775808"), Token::Error);
        assert_eq!(lex_one("-9223372036854775809"), Token::Error);
        assert_eq!(lex_one("123456789012345678901234567890"), Token::Error);
    }

    #[test]
    fn test_floats() {
        assert_number("123.0", 123.0);
        assert_number("123.456", 123.456);
        assert_number("-123.456", -123.456);
        assert_number("1e2", 100.0);
        assert_number("1E2", 100.0);
        assert_number("2.5e-3", 0.0025);
        assert_number("-1.", -1.0);
        assert_number("0.", 0.0);
        assert_number("-.456", -0.456);
        assert_number("-.456e+1", -4.56);
        assert_number(".456e+10", 4560000000.0);
        assert_number("-.456e-2", -0.00456);
        assert_number("-1.e0", -1.0);
    }

    #[test]
    fn test_float_with_huge_integer_part() {
        // Too large for the exact accumulator, still fine as a float
        assert_number("123456789012345678901234567890.5", 1.2345678901234568e29);
    }

    #[test]
    fn test_extreme_exponents_saturate() {
        assert_eq!(lex_one("1e400"), Token::Number(f64::INFINITY));
        assert_eq!(lex_one("1e-400"), Token::Number(0.0));
        assert_eq!(lex_one("0e99999999999999999999999"), Token::Number(0.0));
    }

    #[test]
    fn test_missing_digits_are_errors() {
        assert_eq!(lex_one("."), Token::Error);
        assert_eq!(lex_one("-."), Token::Error);
        assert_eq!(lex_one("-"), Token::Error);
        assert_eq!(lex_one("-1.E"), Token::Error);
        assert_eq!(lex_one("1e"), Token::Error);
        assert_eq!(lex_one("1e+"), Token::Error);
        assert_eq!(lex_one("e5"), Token::Error);
        assert_eq!(lex_one("'"), Token::Error);
    }

    #[test]
    fn test_number_stops_at_delimiter() {
        let mut lexer = Lexer::new(SliceSource::new(b"12,3.5]"));
        assert_eq!(lexer.advance(), Token::Integer(12));
        assert_eq!(lexer.advance(), Token::Comma);
        assert_eq!(lexer.advance(), Token::Number(3.5));
        assert_eq!(lexer.advance(), Token::EndArray);
        assert_eq!(lexer.advance(), Token::End);
    }
}
