//! Token types produced by scanning.

/// What a [`Token`] is.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A run of word characters, or the contents of a quoted string.
    Word(String),
    /// A numeric literal.
    Number(f64),
    /// A line terminator. Only produced when end-of-line is significant.
    Eol,
    /// The end of the input.
    Eof,
    /// A single character with no other role under the current table.
    Ordinary(char),
}

/// One unit of scanned input along with the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u64,
}

impl Token {
    pub fn new(kind: TokenKind, line: u64) -> Self {
        Token { kind, line }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
