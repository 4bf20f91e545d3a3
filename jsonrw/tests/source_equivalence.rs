// SPDX-License-Identifier: Apache-2.0

//! Slice and chunked sources must produce identical token streams and
//! identical decode results, whatever the chunk and buffer sizes.

use jsonrw::{ChunkReader, ChunkedSource, Error, Reader, SliceSource, Token, Tokens};

const DOCUMENTS: &[&str] = &[
    "",
    "   ",
    "true",
    r#"{"hello": "world", "count": 42}"#,
    r#"[1, -2.5, 3e2, +4, .5, null, true, false]"#,
    r#"{"escaped": "a\"b\\c\/d\nA😀", "empty": "", "nested": [[{}], {"k": []}]}"#,
    r#"{"numbers": [9223372036854775807, -9223372036854775808, 1e400, 1e-400]}"#,
    "[1,2,3,]",
    "[tru, 1]",
    r#"{"unterminated": "abc"#,
    "[9223372036854775808]",
    "nul",
    "\"好 😀 raw\u{1}control\"",
];

fn slice_tokens(doc: &str) -> Vec<Token> {
    Tokens::new(SliceSource::new(doc.as_bytes())).collect()
}

fn chunked_tokens(doc: &str, chunk_size: usize, buffer_size: usize) -> Vec<Token> {
    let mut buffer = vec![0u8; buffer_size];
    let source = ChunkedSource::new(ChunkReader::new(doc.as_bytes(), chunk_size), &mut buffer);
    Tokens::new(source).collect()
}

/// Fully materializes every value, so string bodies are compared as well.
fn drain<S: jsonrw::ByteSource>(reader: &mut Reader<S>, out: &mut Vec<String>) -> Result<(), Error> {
    match reader.peek() {
        Token::BeginArray => reader.read_array(|r| drain(r, out)),
        Token::BeginObject => reader.read_object(|r, key| {
            out.push(format!("key:{key}"));
            drain(r, out)
        }),
        Token::String => {
            out.push(reader.read_string()?);
            Ok(())
        }
        Token::Null => {
            reader.consume(jsonrw::TokenKind::Null);
            out.push("null".into());
            Ok(())
        }
        Token::Bool(b) => {
            out.push(reader.read_bool().map(|_| b.to_string())?);
            Ok(())
        }
        Token::Integer(_) => {
            out.push(reader.read_i64()?.to_string());
            Ok(())
        }
        _ => {
            out.push(format!("{:?}", reader.read_f64()?));
            Ok(())
        }
    }
}

fn slice_values(doc: &str) -> (Vec<String>, Result<(), Error>) {
    let mut out = Vec::new();
    let result = drain(&mut Reader::from_slice(doc), &mut out);
    (out, result)
}

fn chunked_values(doc: &str, chunk_size: usize, buffer_size: usize) -> (Vec<String>, Result<(), Error>) {
    let mut buffer = vec![0u8; buffer_size];
    let mut reader = Reader::from_stream(ChunkReader::new(doc.as_bytes(), chunk_size), &mut buffer);
    let mut out = Vec::new();
    let result = drain(&mut reader, &mut out);
    (out, result)
}

fn check_chunk_size(chunk_size: usize) {
    for doc in DOCUMENTS {
        let expected_tokens = slice_tokens(doc);
        let expected_values = slice_values(doc);
        for buffer_size in 1..=16 {
            assert_eq!(
                chunked_tokens(doc, chunk_size, buffer_size),
                expected_tokens,
                "tokens differ for {doc:?} with chunk {chunk_size}, buffer {buffer_size}"
            );
            assert_eq!(
                chunked_values(doc, chunk_size, buffer_size),
                expected_values,
                "values differ for {doc:?} with chunk {chunk_size}, buffer {buffer_size}"
            );
        }
    }
}

macro_rules! generate_chunk_size_tests {
    ($($size:expr),*) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_sources_agree_with_chunk_size_ $size>]() {
                    check_chunk_size($size);
                }
            }
        )*
    };
}

generate_chunk_size_tests!(1, 2, 3, 4, 5, 6, 7, 8);

#[test]
fn test_full_slice_reader_agrees() {
    for doc in DOCUMENTS {
        let mut buffer = [0u8; 4];
        let source = ChunkedSource::new(ChunkReader::full_slice(doc.as_bytes()), &mut buffer);
        let tokens: Vec<Token> = Tokens::new(source).collect();
        assert_eq!(tokens, slice_tokens(doc), "doc {doc:?}");
    }
}

#[test]
fn test_zero_capacity_buffer_is_empty_stream() {
    let mut buffer = [0u8; 0];
    let mut reader = Reader::from_stream(ChunkReader::new(b"[1]", 1), &mut buffer);
    assert_eq!(reader.peek(), Token::End);
    assert_eq!(reader.read_i64(), Err(Error::EndOfInput));
}

#[test]
fn test_expected_token_stream() {
    assert_eq!(
        slice_tokens(r#"{"a": [1, 2.5, null]}"#),
        [
            Token::BeginObject,
            Token::String,
            Token::Colon,
            Token::BeginArray,
            Token::Integer(1),
            Token::Comma,
            Token::Number(2.5),
            Token::Comma,
            Token::Null,
            Token::EndArray,
            Token::EndObject,
        ]
    );
    assert_eq!(slice_tokens("[tru, 1]"), [Token::BeginArray, Token::Error]);
}
