//! Renders tokens as the lines the demo host programs print.

use crate::{
    token::{Token, TokenKind},
    trace,
};

/// Print a single token.
pub fn print_token(token: &Token) -> String {
    match &token.kind {
        TokenKind::Word(text) => format!("Word: {text}"),
        TokenKind::Number(value) => format!("Number: {value}"),
        TokenKind::Eol => String::from("End of Line encountered."),
        TokenKind::Eof => String::from("End of File encountered."),
        TokenKind::Ordinary(c) => format!("{c:?} encountered."),
    }
}

/// Print a token stream, one token per line, each prefixed with the line
/// number it started on.
pub fn print_tokens(tokens: &[Token]) -> String {
    trace!("print_tokens");

    let mut s = String::new();
    for token in tokens.iter() {
        s.push_str(&format!("{:>4} {}\n", token.line, print_token(token)));
    }
    s
}
