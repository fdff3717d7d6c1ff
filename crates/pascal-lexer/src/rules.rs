//! Dispatch rules
//!
//! [`Rule::classify`] decides, from the character at the cursor and the one
//! after it, which scanning rule applies. The arms are tried top to bottom,
//! so their order is the priority order: whitespace, comments, two-character
//! operators, strings, words, numbers, single characters, unknown.

use crate::token::TokenKind;

/// One scanning step chosen by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Whitespace,
    /// `{`
    BraceComment,
    /// `(*`
    StarComment,
    /// `//`
    LineComment,
    /// `:=` `<=` `>=` `<>` `..`
    Compound(TokenKind),
    /// `'`
    StringLiteral,
    /// ASCII letter
    Word,
    /// Digit, or `.` followed by a digit
    Number,
    /// Entry of the single-character table
    Single(TokenKind),
    Unknown,
}

impl Rule {
    pub fn classify(ch: char, next: Option<char>) -> Rule {
        match (ch, next) {
            (c, _) if is_whitespace(c) => Rule::Whitespace,

            ('{', _) => Rule::BraceComment,
            ('(', Some('*')) => Rule::StarComment,
            ('/', Some('/')) => Rule::LineComment,

            (':', Some('=')) => Rule::Compound(TokenKind::Assign),
            ('<', Some('=')) => Rule::Compound(TokenKind::LessEqual),
            ('>', Some('=')) => Rule::Compound(TokenKind::GreaterEqual),
            ('<', Some('>')) => Rule::Compound(TokenKind::NotEqual),
            ('.', Some('.')) => Rule::Compound(TokenKind::Range),

            ('\'', _) => Rule::StringLiteral,
            (c, _) if c.is_ascii_alphabetic() => Rule::Word,
            (c, _) if c.is_ascii_digit() => Rule::Number,
            ('.', Some(n)) if n.is_ascii_digit() => Rule::Number,

            (c, _) => Rule::fallback(c),
        }
    }

    /// The last two rules: single-character table, then unknown.
    ///
    /// Also the re-entry point when a number scan turns out to be a lone `.`.
    pub fn fallback(ch: char) -> Rule {
        single_char_kind(ch).map_or(Rule::Unknown, Rule::Single)
    }
}

/// The ECMAScript `\s` class: ASCII and Unicode space separators, line
/// terminators and the byte order mark. Unlike [`char::is_whitespace`] it
/// includes U+FEFF and excludes U+0085.
pub fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn single_char_kind(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Multiply,
        '/' => TokenKind::Divide,
        '=' => TokenKind::Equal,
        '<' => TokenKind::Less,
        '>' => TokenKind::Greater,
        ':' => TokenKind::Colon,
        '^' => TokenKind::Pointer,
        '@' => TokenKind::AddressOf,
        _ => return None,
    };
    Some(kind)
}
