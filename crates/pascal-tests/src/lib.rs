//! Integration tests for the Pascal tokenizer
//!
//! End-to-end scenarios over the public `tokenize` surface, plus helpers
//! shared with the property tests in `tests/`.

use pascal_error::Diagnostics;
use pascal_lexer::{strip_spans, tokenize, Token, TokenKind, TokenValue};
use std::ops::Range;

/// Tokens of `source` without spans, comments skipped
pub fn lex(source: &str) -> Vec<(TokenKind, TokenValue)> {
    strip_spans(&tokenize(source, true).0)
}

/// Tokens of `source` without spans, comments kept
pub fn lex_with_comments(source: &str) -> Vec<(TokenKind, TokenValue)> {
    strip_spans(&tokenize(source, false).0)
}

/// Asserts that `source` tokenizes without diagnostics and returns the tokens
pub fn assert_clean(source: &str, skip_comments: bool) -> Vec<Token> {
    let (tokens, diagnostics) = tokenize(source, skip_comments);
    if !diagnostics.is_empty() {
        panic!(
            "Expected no diagnostics for {:?}, got:\n{:#?}",
            source, diagnostics
        );
    }
    tokens
}

/// Asserts that `source` produces diagnostics and returns them
pub fn assert_diagnosed(source: &str) -> Diagnostics {
    let (_, diagnostics) = tokenize(source, true);
    if diagnostics.is_empty() {
        panic!("Expected diagnostics for {:?}, got none", source);
    }
    diagnostics
}

/// Byte ranges between consecutive tokens, i.e. what was consumed
/// without producing a token
pub fn gap_ranges(tokens: &[Token]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut cursor = 0;

    for token in tokens {
        let start = token.span.start.offset;
        if start > cursor {
            ranges.push(cursor..start);
        }
        cursor = token.span.end.offset;
    }

    ranges
}

/// Source text of each [`gap_ranges`] entry
pub fn gaps<'a>(source: &'a str, tokens: &[Token]) -> Vec<&'a str> {
    gap_ranges(tokens)
        .into_iter()
        .map(|range| &source[range])
        .collect()
}

/// Whether token spans are ordered and never overlap
pub fn spans_are_ordered(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .all(|token| token.span.start.offset <= token.span.end.offset)
        && tokens
            .windows(2)
            .all(|pair| pair[0].span.end.offset <= pair[1].span.start.offset)
}

pub fn without_comments(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !token.kind.is_comment())
        .collect()
}
