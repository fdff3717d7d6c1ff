//! Lexer for Pascal source code
//!
//! Single pass over the source: every step classifies the character at the
//! cursor with [`Rule::classify`], runs that rule and moves forward. Comments
//! and whitespace are consumed like everything else, so the scanned regions
//! always cover the whole input.

use crate::keywords::{classify_word, Word};
use crate::rules::Rule;
use crate::token::{Token, TokenKind, TokenValue};
use pascal_error::{
    span::{Position, Span},
    Diagnostic, DiagnosticKind, Diagnostics,
};
use tracing::{debug, warn};

/// Tokenizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Drop comment tokens from the output (they are still consumed)
    pub skip_comments: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            skip_comments: true,
        }
    }
}

/// Saved cursor state, used to rewind a failed number scan
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    pos: usize,
    position: Position,
}

/// The Pascal lexer
pub struct Lexer<'src> {
    source: &'src str,
    chars: Vec<char>,
    /// Current position (index in chars vector)
    pos: usize,
    /// Current line (1-indexed)
    line: u32,
    /// Current column (1-indexed)
    column: u32,
    /// Byte offset
    offset: usize,
    file_id: u32,
    options: LexerOptions,
    diagnostics: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer with default options (comments skipped)
    pub fn new(source: &'src str, file_id: u32) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            offset: 0,
            file_id,
            options: LexerOptions::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn with_options(mut self, options: LexerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes and returns the diagnostics
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn advance_to_end(&mut self) {
        while self.advance().is_some() {}
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    fn make_span(&self, start: Position) -> Span {
        Span::new(start, self.current_position(), self.file_id)
    }

    /// Source text from `start` up to the cursor
    fn text_since(&self, start: Position) -> &'src str {
        let source = self.source;
        &source[start.offset..self.offset]
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            position: self.current_position(),
        }
    }

    fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.position.line;
        self.column = checkpoint.position.column;
        self.offset = checkpoint.position.offset;
    }

    /// Index of the next occurrence of `terminator` at or after `from`
    fn find_from(&self, from: usize, terminator: &[char]) -> Option<usize> {
        self.chars
            .get(from..)?
            .windows(terminator.len())
            .position(|window| window == terminator)
            .map(|index| from + index)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(
            code = %diagnostic.code,
            line = diagnostic.span.start.line,
            column = diagnostic.span.start.column,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    fn comment_token(&self, kind: TokenKind, start: Position) -> Option<Token> {
        if self.options.skip_comments {
            None
        } else {
            Some(Token::new(kind, self.text_since(start), self.make_span(start)))
        }
    }

    /// Reads `{ ... }` or `(* ... *)`.
    ///
    /// Without a terminator the rest of the input is swallowed and nothing
    /// but EOF follows.
    fn read_block_comment(
        &mut self,
        open_len: usize,
        terminator: &[char],
        kind: TokenKind,
        unclosed: DiagnosticKind,
    ) -> Option<Token> {
        let start = self.current_position();

        match self.find_from(self.pos + open_len, terminator) {
            Some(end) => {
                let count = end + terminator.len() - self.pos;
                self.advance_by(count);
                self.comment_token(kind, start)
            }
            None => {
                self.advance_to_end();
                let close: String = terminator.iter().collect();
                let diagnostic = Diagnostic::error(unclosed, self.make_span(start))
                    .with_label("comment starts here but is never closed")
                    .with_help(format!("add `{}` to close the comment", close));
                self.report(diagnostic);
                None
            }
        }
    }

    /// Reads `// ...` up to, not including, the next newline
    fn read_line_comment(&mut self) -> Option<Token> {
        let start = self.current_position();
        self.advance_by(2);
        self.advance_while(|ch| ch != '\n');
        self.comment_token(TokenKind::LineComment, start)
    }

    /// Reads a quoted string; `''` inside stands for one quote
    fn read_string(&mut self) -> Token {
        let start = self.current_position();
        self.advance(); // Opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    let span = self.make_span(start);
                    let diagnostic = Diagnostic::error(DiagnosticKind::UnclosedString, span)
                        .with_label("string starts here but was not closed")
                        .with_help("add ' at the end of the string");
                    self.report(diagnostic);
                    return Token::new(TokenKind::String, value, span);
                }
                Some('\'') if self.peek_next() == Some('\'') => {
                    value.push('\'');
                    self.advance_by(2);
                }
                Some('\'') => {
                    self.advance(); // Closing quote
                    break;
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Token::new(TokenKind::String, value, self.make_span(start))
    }

    /// Reads an identifier, keyword or boolean literal
    fn read_word(&mut self) -> Token {
        let start = self.current_position();
        self.advance_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');

        let text = self.text_since(start);
        let span = self.make_span(start);

        match classify_word(text) {
            Word::Boolean(value) => Token::new(TokenKind::Boolean, value, span),
            Word::Keyword => Token::new(TokenKind::Keyword, text, span),
            Word::Identifier => Token::new(TokenKind::Identifier, text, span),
        }
    }

    /// Reads an integer or real.
    ///
    /// `1..5` stays an integer followed by a range: the fraction dot is only
    /// taken when it is not the first half of `..`. Returns `None`, with the
    /// cursor rewound, when only a lone `.` was read.
    fn read_number(&mut self) -> Option<Token> {
        let checkpoint = self.checkpoint();
        let start = self.current_position();
        let mut is_real = false;

        if self.peek() == Some('.') {
            self.advance();
            is_real = true;
        }

        self.advance_while(|ch| ch.is_ascii_digit());

        if !is_real && self.peek() == Some('.') && self.peek_next() != Some('.') {
            self.advance();
            is_real = true;
            self.advance_while(|ch| ch.is_ascii_digit());
        }

        let text = self.text_since(start);
        if text == "." {
            self.rewind(checkpoint);
            return None;
        }

        let span = self.make_span(start);
        if is_real {
            let value = text.parse::<f64>().unwrap_or_default();
            Some(Token::new(TokenKind::Real, value, span))
        } else {
            let value = text.parse::<i64>().unwrap_or_else(|_| {
                debug!(literal = text, "integer literal out of range, saturating");
                i64::MAX
            });
            Some(Token::new(TokenKind::Integer, value, span))
        }
    }

    /// Runs one rule, returning the token it produced, if any
    fn apply(&mut self, rule: Rule) -> Option<Token> {
        match rule {
            Rule::Whitespace => {
                self.advance();
                None
            }
            Rule::BraceComment => self.read_block_comment(
                1,
                &['}'],
                TokenKind::BraceComment,
                DiagnosticKind::UnclosedBraceComment,
            ),
            Rule::StarComment => self.read_block_comment(
                2,
                &['*', ')'],
                TokenKind::StarComment,
                DiagnosticKind::UnclosedStarComment,
            ),
            Rule::LineComment => self.read_line_comment(),
            Rule::Compound(kind) => {
                let start = self.current_position();
                self.advance_by(2);
                Some(Token::new(kind, self.text_since(start), self.make_span(start)))
            }
            Rule::StringLiteral => Some(self.read_string()),
            Rule::Word => Some(self.read_word()),
            Rule::Number => match self.read_number() {
                Some(token) => Some(token),
                None => {
                    let ch = self.peek()?;
                    self.apply(Rule::fallback(ch))
                }
            },
            Rule::Single(kind) => {
                let start = self.current_position();
                self.advance();
                Some(Token::new(kind, self.text_since(start), self.make_span(start)))
            }
            Rule::Unknown => {
                let start = self.current_position();
                let index = self.pos;
                let ch = self.advance()?;
                let diagnostic = Diagnostic::error(
                    DiagnosticKind::UnknownCharacter { ch, index },
                    self.make_span(start),
                )
                .with_label("unrecognized character");
                self.report(diagnostic);
                None
            }
        }
    }

    /// Tokenizes the entire source; the last token is always EOF
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            let rule = Rule::classify(ch, self.peek_next());
            if let Some(token) = self.apply(rule) {
                tokens.push(token);
            }
        }

        tokens.push(Token::eof(Span::point(self.current_position(), self.file_id)));

        debug!(
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            skip_comments = self.options.skip_comments,
            "tokenized source"
        );

        tokens
    }
}

/// Tokenizes source code and returns the tokens with any diagnostics
pub fn tokenize(source: &str, skip_comments: bool) -> (Vec<Token>, Diagnostics) {
    let mut lexer = Lexer::new(source, 0).with_options(LexerOptions { skip_comments });
    let tokens = lexer.tokenize();
    (tokens, lexer.take_diagnostics())
}

/// Token value without its span, for comparisons that ignore location
pub fn strip_spans(tokens: &[Token]) -> Vec<(TokenKind, TokenValue)> {
    tokens
        .iter()
        .map(|token| (token.kind, token.value.clone()))
        .collect()
}
