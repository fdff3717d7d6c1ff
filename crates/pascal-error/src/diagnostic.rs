//! Diagnostic - lexical error reports
//!
//! A diagnostic records what went wrong (a [`DiagnosticKind`]), where it
//! happened (a [`Span`]) and, optionally, how to fix it. Diagnostics never
//! stop the tokenizer from returning a token list; they are collected and
//! handed back next to the tokens.

use crate::span::Span;
use std::fmt;
use thiserror::Error;

/// Structured error code, printed as `E<category><number>` (e.g. `EL001`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    pub category: char,
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    pub const UNKNOWN_CHAR: Self = Self::new('L', 1);
    pub const UNCLOSED_STRING: Self = Self::new('L', 2);
    pub const UNCLOSED_BRACE_COMMENT: Self = Self::new('L', 3);
    pub const UNCLOSED_STAR_COMMENT: Self = Self::new('L', 4);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// The lexical conditions the tokenizer reports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("unclosed brace comment")]
    UnclosedBraceComment,
    #[error("unclosed star comment")]
    UnclosedStarComment,
    #[error("unclosed string literal")]
    UnclosedString,
    /// `index` is the zero-based character index in the source
    #[error("unknown character `{ch}` at position {index}")]
    UnknownCharacter { ch: char, index: usize },
}

impl DiagnosticKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            DiagnosticKind::UnknownCharacter { .. } => ErrorCode::UNKNOWN_CHAR,
            DiagnosticKind::UnclosedString => ErrorCode::UNCLOSED_STRING,
            DiagnosticKind::UnclosedBraceComment => ErrorCode::UNCLOSED_BRACE_COMMENT,
            DiagnosticKind::UnclosedStarComment => ErrorCode::UNCLOSED_STAR_COMMENT,
        }
    }

    /// Whether the scanner stops reading input after reporting this
    pub fn aborts_scan(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::UnclosedBraceComment | DiagnosticKind::UnclosedStarComment
        )
    }
}

/// A complete diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: ErrorCode,
    /// Main message, derived from `kind`
    pub message: String,
    pub span: Span,
    /// Text printed under the source snippet
    pub label: Option<String>,
    /// Fix suggestion
    pub help: Option<String>,
}

impl Diagnostic {
    /// Creates an error for `kind` located at `span`
    pub fn error(kind: DiagnosticKind, span: Span) -> Self {
        Self {
            message: kind.to_string(),
            code: kind.code(),
            kind,
            span,
            label: None,
            help: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Source files known to the renderer
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte offset of each line start
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Returns a 1-indexed line without its terminator
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let line_idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|&e| e.saturating_sub(1))
            .unwrap_or(self.source.len());

        self.source
            .get(start..end)
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns its ID
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders diagnostics in a rustc-like layout
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self {
            cache,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Renders the diagnostic as a string
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        let reset = if self.use_colors { "\x1b[0m" } else { "" };
        let color = if self.use_colors { "\x1b[1;31m" } else { "" };
        let bold = if self.use_colors { "\x1b[1m" } else { "" };
        let blue = if self.use_colors { "\x1b[1;34m" } else { "" };

        // error[EL001]: message
        output.push_str(&format!(
            "{}error[{}]{}{}: {}{}\n",
            color, diagnostic.code, reset, bold, diagnostic.message, reset
        ));

        let span = diagnostic.span;
        if let Some(file) = self.cache.get(span.file_id) {
            output.push_str(&format!(
                " {}-->{} {}:{}:{}\n",
                blue, reset, file.name, span.start.line, span.start.column
            ));

            if let Some(line_content) = file.get_line(span.start.line) {
                let line_num = span.start.line;
                let padding = " ".repeat(line_num.to_string().len());

                output.push_str(&format!(" {} {}|{}\n", padding, blue, reset));
                output.push_str(&format!(
                    " {}{}{} |{} {}\n",
                    blue, line_num, reset, reset, line_content
                ));

                let col_start = span.start.column as usize;
                let line_width = line_content.chars().count();
                let underline_len = if span.start.line == span.end.line {
                    span.end.column.saturating_sub(span.start.column).max(1) as usize
                } else {
                    line_width.saturating_sub(col_start - 1).max(1)
                };

                let spaces = " ".repeat(col_start.saturating_sub(1));
                let underline = "^".repeat(underline_len);
                let label = diagnostic.label.as_deref().unwrap_or("");

                output.push_str(&format!(
                    " {} {}|{} {}{}{} {}{}\n",
                    padding, blue, reset, spaces, color, underline, label, reset
                ));
            }
        }

        if let Some(help) = &diagnostic.help {
            let green = if self.use_colors { "\x1b[1;32m" } else { "" };
            output.push_str(&format!("   = {}help{}: {}\n", green, reset, help));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_diagnostic_rendering() {
        let mut cache = SourceCache::new();
        let file_id = cache.add("hello.pas", "program Hello;\nbegin # end.");

        let span = Span::new(Position::new(2, 7, 21), Position::new(2, 8, 22), file_id);
        let diagnostic = Diagnostic::error(
            DiagnosticKind::UnknownCharacter { ch: '#', index: 21 },
            span,
        )
        .with_label("not part of the language")
        .with_help("remove this character");

        let output = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);

        assert!(output.contains("error[EL001]: unknown character `#` at position 21"));
        assert!(output.contains("hello.pas:2:7"));
        assert!(output.contains("begin # end."));
        assert!(output.contains("      ^ not part of the language"));
        assert!(output.contains("help: remove this character"));
    }

    #[test]
    fn test_multiline_span_underlines_to_end_of_line() {
        let mut cache = SourceCache::new();
        let file_id = cache.add("c.pas", "x := 1; { open\nstill open");

        let span = Span::new(Position::new(1, 9, 8), Position::new(2, 11, 25), file_id);
        let diagnostic = Diagnostic::error(DiagnosticKind::UnclosedBraceComment, span);
        let output = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);

        assert!(output.contains("error[EL003]: unclosed brace comment"));
        assert!(output.contains("        ^^^^^^"));
    }

    #[test]
    fn test_kind_codes_and_abort_policy() {
        assert_eq!(DiagnosticKind::UnclosedString.code().to_string(), "EL002");
        assert_eq!(DiagnosticKind::UnclosedStarComment.code().to_string(), "EL004");
        assert!(DiagnosticKind::UnclosedBraceComment.aborts_scan());
        assert!(DiagnosticKind::UnclosedStarComment.aborts_scan());
        assert!(!DiagnosticKind::UnclosedString.aborts_scan());
        assert!(!DiagnosticKind::UnknownCharacter { ch: '?', index: 0 }.aborts_scan());
    }

    #[test]
    fn test_get_line_strips_carriage_return() {
        let file = SourceFile::new("crlf.pas", "begin\r\nend.");
        assert_eq!(file.get_line(1), Some("begin"));
        assert_eq!(file.get_line(2), Some("end."));
        assert_eq!(file.get_line(3), None);
    }
}
