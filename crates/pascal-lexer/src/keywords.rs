//! Reserved words
//!
//! Pascal keywords are case-insensitive: `BEGIN`, `Begin` and `begin` are
//! the same word. `true` and `false` live in the same table but decode to
//! boolean literals.

/// Every reserved word, lowercase
pub const KEYWORDS: [&str; 32] = [
    "program", "const", "var", "begin", "end", "if", "then", "else", "while", "do", "for", "to",
    "downto", "repeat", "until", "case", "of", "record", "array", "procedure", "function", "type",
    "integer", "real", "char", "string", "boolean", "uses", "label", "goto", "true", "false",
];

/// How a scanned word is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Keyword,
    Boolean(bool),
    Identifier,
}

/// Classifies an ASCII word against the keyword table, ignoring case
pub fn classify_word(text: &str) -> Word {
    let lower = text.to_ascii_lowercase();
    match lower.as_str() {
        "true" => Word::Boolean(true),
        "false" => Word::Boolean(false),
        word if KEYWORDS.contains(&word) => Word::Keyword,
        _ => Word::Identifier,
    }
}
