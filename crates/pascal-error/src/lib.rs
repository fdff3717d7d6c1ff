//! pascal-error - Spans and diagnostics for the Pascal tokenizer
//!
//! The tokenizer never fails: problems in the input are collected as
//! [`Diagnostic`]s and returned next to the token list.
//!
//! # Example
//!
//! ```rust
//! use pascal_error::{Diagnostic, DiagnosticKind, DiagnosticRenderer, SourceCache};
//! use pascal_error::span::{Position, Span};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("example.pas", "x := 'abc");
//!
//! let span = Span::new(Position::new(1, 6, 5), Position::new(1, 10, 9), file_id);
//! let diagnostic = Diagnostic::error(DiagnosticKind::UnclosedString, span)
//!     .with_label("string starts here but was not closed");
//!
//! let renderer = DiagnosticRenderer::new(&cache).without_colors();
//! assert!(renderer.render(&diagnostic).contains("unclosed string literal"));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{
    Diagnostic, DiagnosticKind, DiagnosticRenderer, ErrorCode, SourceCache, SourceFile,
};
pub use span::{Position, Span};

/// Diagnostics accumulated during one tokenizer run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Kinds in reporting order
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.items.iter().map(|d| d.kind.clone()).collect()
    }

    /// Renders all diagnostics
    pub fn render(&self, cache: &SourceCache) -> String {
        let renderer = DiagnosticRenderer::new(cache);
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
