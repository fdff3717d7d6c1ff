//! Tokens for Pascal source code
//!
//! Defines the closed set of token kinds the tokenizer produces and the
//! decoded payload carried by each token.

use pascal_error::span::Span;
use serde::{Serialize, Serializer};
use std::fmt;

/// All token kinds produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Words and literals
    // =========================================
    /// Reserved word, e.g. `begin`, `procedure`
    Keyword,
    /// User name, e.g. `HelloWorld`, `x_1`
    Identifier,
    /// `42`
    Integer,
    /// `3.14`, `.5`, `1.`
    Real,
    /// `'text'`
    String,
    /// `true` / `false` in any letter case
    Boolean,

    // =========================================
    // Operators
    // =========================================
    /// `:=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `=`
    Equal,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<>`
    NotEqual,
    /// `..`
    Range,
    /// `^`
    Pointer,
    /// `@`
    AddressOf,

    // =========================================
    // Delimiters
    // =========================================
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,

    // =========================================
    // Comments
    // =========================================
    /// `{ ... }`
    BraceComment,
    /// `(* ... *)`
    StarComment,
    /// `// ...` up to the end of the line
    LineComment,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Canonical tag name, e.g. `OPERATOR_ASSIGN`
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "NUMBER_INTEGER",
            TokenKind::Real => "NUMBER_REAL",
            TokenKind::String => "STRING_LITERAL",
            TokenKind::Boolean => "BOOLEAN_LITERAL",
            TokenKind::Assign => "OPERATOR_ASSIGN",
            TokenKind::Plus => "OPERATOR_PLUS",
            TokenKind::Minus => "OPERATOR_MINUS",
            TokenKind::Multiply => "OPERATOR_MULTIPLY",
            TokenKind::Divide => "OPERATOR_DIVIDE",
            TokenKind::Equal => "OPERATOR_EQUAL",
            TokenKind::Less => "OPERATOR_LESS",
            TokenKind::Greater => "OPERATOR_GREATER",
            TokenKind::LessEqual => "OPERATOR_LESS_EQUAL",
            TokenKind::GreaterEqual => "OPERATOR_GREATER_EQUAL",
            TokenKind::NotEqual => "OPERATOR_NOT_EQUAL",
            TokenKind::Range => "OPERATOR_RANGE",
            TokenKind::Pointer => "OPERATOR_POINTER",
            TokenKind::AddressOf => "OPERATOR_ADDRESSOF",
            TokenKind::Semicolon => "DELIMITER_SEMICOLON",
            TokenKind::Comma => "DELIMITER_COMMA",
            TokenKind::Dot => "DELIMITER_DOT",
            TokenKind::LParen => "DELIMITER_LPAREN",
            TokenKind::RParen => "DELIMITER_RPAREN",
            TokenKind::LBracket => "DELIMITER_LBRACKET",
            TokenKind::RBracket => "DELIMITER_RBRACKET",
            TokenKind::Colon => "DELIMITER_COLON",
            TokenKind::BraceComment => "COMMENT_BLOCK_BRACE",
            TokenKind::StarComment => "COMMENT_STAR",
            TokenKind::LineComment => "COMMENT_LINE",
            TokenKind::Eof => "EOF",
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Equal
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
                | TokenKind::NotEqual
                | TokenKind::Range
                | TokenKind::Pointer
                | TokenKind::AddressOf
        )
    }

    pub fn is_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Colon
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            TokenKind::BraceComment | TokenKind::StarComment | TokenKind::LineComment
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Decoded payload of a token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Source text (keywords, identifiers, operators, comments) or
    /// decoded string literal content
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    /// No payload (end of input)
    None,
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(text: &str) -> Self {
        TokenValue::Text(text.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(text: String) -> Self {
        TokenValue::Text(text)
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        TokenValue::Integer(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Real(value)
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        TokenValue::Boolean(value)
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(text) => write!(f, "{}", text),
            TokenValue::Integer(value) => write!(f, "{}", value),
            TokenValue::Real(value) => write!(f, "{}", value),
            TokenValue::Boolean(value) => write!(f, "{}", value),
            TokenValue::None => Ok(()),
        }
    }
}

/// A token with its payload and location.
///
/// Serializes as `{"type": "<TAG>", "value": ...}`; the span is left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: TokenValue,
    #[serde(skip)]
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<TokenValue>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// End-of-input marker
    pub fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            value: TokenValue::None,
            span,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{}", self.kind),
            TokenValue::Text(text) if self.kind == TokenKind::String => {
                write!(f, "{} {:?}", self.kind, text)
            }
            value => write!(f, "{} {}", self.kind, value),
        }
    }
}
