//! Property-based tests for the tokenizer.
//!
//! Generated inputs check that:
//! 1. every run ends with exactly one EOF token,
//! 2. consumed regions cover the input (gaps are only whitespace, unknown
//!    characters, or the tail swallowed by an unclosed comment),
//! 3. skipping comments equals filtering them out afterwards,
//! 4. no input makes the tokenizer panic.

use pascal_error::DiagnosticKind;
use pascal_lexer::{is_whitespace, tokenize, TokenKind, TokenValue};
use pascal_tests::{gap_ranges, gaps, spans_are_ordered, without_comments};
use proptest::prelude::*;

// -- Input Strategies --

fn regex(pattern: &str) -> BoxedStrategy<String> {
    prop::string::string_regex(pattern)
        .expect("valid regex")
        .boxed()
}

/// One well-formed lexeme
fn lexeme_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        regex("[a-zA-Z][a-zA-Z0-9_]{0,8}"),
        regex("[0-9]{1,6}"),
        regex("[0-9]{1,4}\\.[0-9]{1,4}"),
        regex("\\.[0-9]{1,3}"),
        regex("'[a-z ,!]{0,8}'"),
        regex("'[a-z]{0,3}''[a-z]{0,3}'"),
        regex("\\{[^}]{0,12}\\}"),
        regex("\\(\\*[a-z {}]{0,12}\\*\\)"),
        regex("//[a-z ]{0,10}\n"),
        regex("[0-9]{1,3}\\.\\.[0-9]{1,3}"),
        prop::sample::select(vec![
            ":=", "<=", ">=", "<>", ";", ",", ".", "(", ")", "[", "]", "+", "-", "*", "/",
            "=", "<", ">", ":", "^", "@",
        ])
        .prop_map(str::to_string),
    ]
}

/// Well-formed lexemes separated by whitespace
fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec((lexeme_strategy(), regex("[ \t\n]{1,3}")), 0..24).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(lexeme, separator)| lexeme + &separator)
            .collect()
    })
}

/// Anything, including unclosed literals and stray characters
fn noisy_source_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        regex("[a-z0-9 '{}()*/.:<>=;#_\n]{0,40}"),
    ]
}

proptest! {
    #[test]
    fn eof_is_always_last(source in noisy_source_strategy()) {
        for skip_comments in [true, false] {
            let (tokens, _) = tokenize(&source, skip_comments);

            prop_assert!(!tokens.is_empty());
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
            prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
            prop_assert_eq!(tokens.last().map(|t| t.span.end.offset), Some(source.len()));
            prop_assert!(spans_are_ordered(&tokens));
        }
    }

    #[test]
    fn noisy_input_gaps_are_accounted_for(source in noisy_source_strategy()) {
        let (tokens, diagnostics) = tokenize(&source, false);

        let unknown: Vec<usize> = diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::UnknownCharacter { .. }))
            .map(|d| d.span.start.offset)
            .collect();
        // An unclosed comment swallows everything from its opener onwards
        let swallowed_from = diagnostics
            .iter()
            .find(|d| d.kind.aborts_scan())
            .map_or(source.len(), |d| d.span.start.offset);

        for range in gap_ranges(&tokens) {
            for (i, ch) in source[range.clone()].char_indices() {
                let offset = range.start + i;
                if offset >= swallowed_from {
                    break;
                }
                prop_assert!(
                    is_whitespace(ch) || unknown.contains(&offset),
                    "unexplained {:?} at byte {} in {:?}", ch, offset, source
                );
            }
        }
    }

    #[test]
    fn whitespace_only_input_is_just_eof(source in regex("[ \t\r\n\\x{A0}\\x{FEFF}]{0,20}")) {
        let (tokens, diagnostics) = tokenize(&source, false);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert!(diagnostics.is_empty());
    }

    #[test]
    fn skipping_comments_equals_filtering(source in noisy_source_strategy()) {
        let (skipped, skipped_diags) = tokenize(&source, true);
        let (kept, kept_diags) = tokenize(&source, false);

        prop_assert_eq!(skipped, without_comments(kept));
        prop_assert_eq!(skipped_diags, kept_diags);
    }

    #[test]
    fn well_formed_input_is_fully_covered(source in source_strategy()) {
        let (tokens, diagnostics) = tokenize(&source, false);

        prop_assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        prop_assert!(spans_are_ordered(&tokens));
        for gap in gaps(&source, &tokens) {
            prop_assert!(gap.chars().all(is_whitespace), "gap {:?}", gap);
        }

        // Raw text round-trips for everything that is not decoded
        for token in &tokens {
            let raw = token.span.slice(&source);
            prop_assert!(raw.is_some());
            if let (Some(raw), TokenValue::Text(text)) = (raw, &token.value) {
                if token.kind != TokenKind::String {
                    prop_assert_eq!(raw, text.as_str());
                }
            }
        }
    }

    #[test]
    fn well_formed_comment_duality(source in source_strategy()) {
        let (skipped, _) = tokenize(&source, true);
        let (kept, _) = tokenize(&source, false);
        prop_assert_eq!(skipped, without_comments(kept));
    }

    #[test]
    fn booleans_decode_in_any_case(word in regex("[tT][rR][uU][eE]|[fF][aA][lL][sS][eE]")) {
        let (tokens, _) = tokenize(&word, true);
        let expected = word.eq_ignore_ascii_case("true");
        prop_assert_eq!(tokens[0].kind, TokenKind::Boolean);
        prop_assert_eq!(&tokens[0].value, &TokenValue::Boolean(expected));
    }

    #[test]
    fn ranges_never_become_reals(low in 0u32..1000, high in 0u32..1000) {
        let source = format!("{low}..{high}");
        let (tokens, _) = tokenize(&source, true);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

        prop_assert_eq!(
            kinds,
            vec![TokenKind::Integer, TokenKind::Range, TokenKind::Integer, TokenKind::Eof]
        );
        prop_assert_eq!(&tokens[0].value, &TokenValue::Integer(i64::from(low)));
        prop_assert_eq!(&tokens[2].value, &TokenValue::Integer(i64::from(high)));
    }

    #[test]
    fn string_escapes_collapse(content in "[a-z']{0,10}") {
        let source = format!("'{}'", content.replace('\'', "''"));
        let (tokens, diagnostics) = tokenize(&source, true);

        prop_assert!(diagnostics.is_empty());
        prop_assert_eq!(&tokens[0].value, &TokenValue::Text(content));
    }
}
