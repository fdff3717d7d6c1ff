//! pascal-lexer - Tokenizer for Pascal source code
//!
//! Converts Pascal source into a flat list of classified tokens for a parser
//! or a syntax highlighter. The lexer keeps no symbol table and does not look
//! at program structure.
//!
//! # Features
//!
//! - Case-insensitive keywords, `true`/`false` decoded as booleans
//! - Integers, reals (`3.14`, `.5`, `1.`) and the range operator (`1..5`)
//! - Quoted strings with `''` escapes
//! - `{ }`, `(* *)` and `//` comments, skipped or kept
//! - Problems reported as diagnostics; tokenizing never fails
//!
//! # Example
//!
//! ```rust
//! use pascal_lexer::{tokenize, TokenKind, TokenValue};
//!
//! let (tokens, diagnostics) = tokenize("price := 99.5;", true);
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(tokens[2].kind, TokenKind::Real);
//! assert_eq!(tokens[2].value, TokenValue::Real(99.5));
//! assert!(tokens.last().unwrap().is_eof());
//! ```

pub mod keywords;
pub mod lexer;
pub mod rules;
pub mod token;

pub use keywords::{classify_word, Word, KEYWORDS};
pub use lexer::{strip_spans, tokenize, Lexer, LexerOptions};
pub use rules::{is_whitespace, Rule};
pub use token::{Token, TokenKind, TokenValue};
