//! Contains `ScanError`, the error type for everything that can go wrong
//! while scanning.

use std::fmt;

/// Shorthand for building a [`ScanError`] from a variant of [`ErrorKind`].
#[macro_export]
macro_rules! make_error {
    ($kind:ident $({ $($field:ident: $value:expr),* $(,)? })?) => {
        $crate::error::ScanError::new($crate::error::ErrorKind::$kind $({ $($field: $value),* })?)
    };
}

/// The kinds of error a scan can produce.
#[derive(Debug)]
pub enum ErrorKind {
    /// The input ended inside a quoted string.
    UnterminatedQuote { quote: char },
    /// The tokenizer was asked to do something it cannot do right now,
    /// like pushing back twice in a row.
    InvalidOperation { why: &'static str },
    /// The underlying character source failed.
    InputSourceFailure { err: std::io::Error },
    /// A byte source handed out data that is not UTF-8.
    InvalidUTF8,
    /// A scanned number did not parse. The scan grammar should make this
    /// impossible, but the kind exists so nothing has to panic.
    InvalidNumberLiteral { literal: String },
}

/// An error produced by a tokenizer operation, with the line it happened on
/// and the file being scanned when those are known.
#[derive(Debug)]
pub struct ScanError {
    pub kind: ErrorKind,
    line: Option<u64>,
    file: Option<String>,
}

impl ScanError {
    pub fn new(kind: ErrorKind) -> Self {
        ScanError {
            kind,
            line: None,
            file: None,
        }
    }

    pub fn line(self, line: u64) -> Self {
        ScanError {
            line: Some(line),
            ..self
        }
    }

    pub fn file(self, file: String) -> Self {
        ScanError {
            file: Some(file),
            ..self
        }
    }

    pub fn line_number(&self) -> Option<u64> {
        self.line
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}: ")?;
        }
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::UnterminatedQuote { quote } => {
                write!(f, "unterminated {quote:?}-quoted string")
            }
            ErrorKind::InvalidOperation { why } => {
                write!(f, "invalid operation: {why}")
            }
            ErrorKind::InputSourceFailure { err } => {
                write!(f, "could not read from source: {err}")
            }
            ErrorKind::InvalidUTF8 => {
                write!(f, "source is not valid UTF-8")
            }
            ErrorKind::InvalidNumberLiteral { literal } => {
                write!(f, "invalid number literal '{literal}'")
            }
        }
    }
}

impl std::error::Error for ScanError {}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::new(ErrorKind::InputSourceFailure { err })
    }
}
