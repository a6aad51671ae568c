//! Contains `Tokenizer`, an on-demand producer of tokens.

use crate::{
    error::{ErrorKind, ScanError},
    make_error,
    source::{ReaderSource, Source, StrSource},
    table::{CharClass, SyntaxTable},
    token::{Token, TokenKind},
};

use std::collections::VecDeque;
use std::io::Read;

/// Splits a character source into a stream of [`Token`]s under a mutable
/// [`SyntaxTable`].
///
/// Operates in a scan-on-demand fashion. A consumer of tokens calls the
/// [`next_token`] method, which consumes just enough of the source to produce
/// one token. The table and the mode flags can be changed between calls and
/// apply to every character not yet consumed, so a stream can switch from
/// rich tokenization to raw character-by-character output mid-scan via
/// [`reset_syntax`].
///
/// Characters read from the source but not yet consumed sit in a small
/// [`VecDeque`] buffer; deciding whether `-` or `.` starts a number needs at
/// most three characters of lookahead, so the buffer never grows past three.
///
/// [`VecDeque`]: https://doc.rust-lang.org/stable/std/collections/struct.VecDeque.html
/// [`Token`]: ../token/struct.Token.html
/// [`SyntaxTable`]: ../table/struct.SyntaxTable.html
/// [`next_token`]: ./struct.Tokenizer.html#method.next_token
/// [`reset_syntax`]: ./struct.Tokenizer.html#method.reset_syntax
#[derive(Debug)]
pub struct Tokenizer<S> {
    source: S,
    pending: VecDeque<char>,
    table: SyntaxTable,
    line: u64,
    eol_significant: bool,
    slash_slash: bool,
    slash_star: bool,
    parse_numbers: bool,
    lower_case: bool,
    previous: Option<Token>,
    pushed_back: bool,
    eof: bool,
}

impl<'a> Tokenizer<StrSource<'a>> {
    /// Creates a tokenizer over an in-memory string with the standard table.
    pub fn from_text(text: &'a str) -> Self {
        Tokenizer::new(StrSource::new(text))
    }
}

impl<R: Read> Tokenizer<ReaderSource<R>> {
    /// Creates a tokenizer that decodes UTF-8 from a byte reader with the
    /// standard table. Wrap files and sockets in a `BufReader`.
    pub fn from_reader(reader: R) -> Self {
        Tokenizer::new(ReaderSource::new(reader))
    }
}

impl<S: Source> Tokenizer<S> {
    /// Creates a tokenizer over any [`Source`] with the standard table.
    pub fn new(source: S) -> Self {
        Tokenizer::with_table(source, SyntaxTable::default())
    }

    /// Creates a tokenizer with a caller-built table.
    pub fn with_table(source: S, table: SyntaxTable) -> Self {
        Tokenizer {
            source,
            pending: VecDeque::new(),
            table,
            line: 1,
            eol_significant: false,
            slash_slash: false,
            slash_star: false,
            parse_numbers: true,
            lower_case: false,
            previous: None,
            pushed_back: false,
            eof: false,
        }
    }

    /// The table currently in use.
    pub fn table(&self) -> &SyntaxTable {
        &self.table
    }

    /// Mutable access to the table for edits the named setters do not cover.
    pub fn table_mut(&mut self) -> &mut SyntaxTable {
        &mut self.table
    }

    /// Makes every character ordinary. Until the table is built back up with
    /// the configuration calls, each subsequent character comes out as its
    /// own [`TokenKind::Ordinary`] token and nothing is skipped, grouped, or
    /// parsed as a number.
    pub fn reset_syntax(&mut self) {
        self.table.reset();
    }

    /// See [`SyntaxTable::word_chars`].
    pub fn word_chars(&mut self, low: char, high: char) {
        self.table.word_chars(low, high);
    }

    /// See [`SyntaxTable::whitespace_chars`].
    pub fn whitespace_chars(&mut self, low: char, high: char) {
        self.table.whitespace_chars(low, high);
    }

    /// See [`SyntaxTable::ordinary_chars`].
    pub fn ordinary_chars(&mut self, low: char, high: char) {
        self.table.ordinary_chars(low, high);
    }

    /// See [`SyntaxTable::ordinary_char`].
    pub fn ordinary_char(&mut self, c: char) {
        self.table.ordinary_char(c);
    }

    /// See [`SyntaxTable::comment_char`].
    pub fn comment_char(&mut self, c: char) {
        self.table.comment_char(c);
    }

    /// See [`SyntaxTable::quote_char`].
    pub fn quote_char(&mut self, c: char) {
        self.table.quote_char(c);
    }

    /// See [`SyntaxTable::set_class`].
    pub fn set_class(&mut self, c: char, class: CharClass) {
        self.table.set_class(c, class);
    }

    /// When on, whitespace-classified line terminators come out as
    /// [`TokenKind::Eol`] tokens instead of being skipped. `\n`, `\r`, and
    /// `\r\n` each count as one terminator. Off by default.
    pub fn eol_is_significant(&mut self, significant: bool) {
        self.eol_significant = significant;
    }

    /// When on, `//` starts a comment that runs to the end of the line. Off
    /// by default. Like `/* */` recognition this keys on the `/` character
    /// itself, so a lone `/` that is not comment-classified comes out as an
    /// ordinary token while `//` still starts a comment.
    pub fn slash_slash_comments(&mut self, recognize: bool) {
        self.slash_slash = recognize;
    }

    /// When on, `/*` starts a comment that runs to the next `*/`, across any
    /// number of lines. Off by default.
    pub fn slash_star_comments(&mut self, recognize: bool) {
        self.slash_star = recognize;
    }

    /// When on, a word-classified digit (or a `-` or `.` leading into one)
    /// starts a numeric literal and produces [`TokenKind::Number`]. On by
    /// default.
    pub fn parse_numbers(&mut self, parse: bool) {
        self.parse_numbers = parse;
    }

    /// When on, scanned words are folded to lowercase. Quoted strings keep
    /// their case. Off by default.
    pub fn lower_case_mode(&mut self, fold: bool) {
        self.lower_case = fold;
    }

    /// The current line, starting at 1 and advancing at each
    /// whitespace-classified line terminator.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Produces the next token, or re-produces the previous one after a
    /// [`push_back`].
    ///
    /// Returns [`TokenKind::Eof`] at the end of the input, and keeps
    /// returning it on every call after that.
    ///
    /// [`push_back`]: ./struct.Tokenizer.html#method.push_back
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        if self.pushed_back {
            self.pushed_back = false;
            if let Some(token) = self.previous.clone() {
                return Ok(token);
            }
        }

        let token = if self.eof {
            Token::new(TokenKind::Eof, self.line)
        } else {
            self.next()?
        };

        self.previous = Some(token.clone());
        Ok(token)
    }

    /// Arranges for the next [`next_token`] call to return the most recently
    /// produced token again. One level only: pushing back twice in a row, or
    /// before any token was produced, fails with
    /// [`ErrorKind::InvalidOperation`].
    ///
    /// [`next_token`]: ./struct.Tokenizer.html#method.next_token
    pub fn push_back(&mut self) -> Result<(), ScanError> {
        if self.pushed_back {
            return Err(make_error!(InvalidOperation {
                why: "a token is already pushed back",
            })
            .line(self.line));
        }

        if self.previous.is_none() {
            return Err(make_error!(InvalidOperation {
                why: "no token to push back",
            })
            .line(self.line));
        }

        self.pushed_back = true;
        Ok(())
    }

    /// Looks at the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Token, ScanError> {
        let token = self.next_token()?;
        self.push_back()?;
        Ok(token)
    }

    /// Drains the rest of the stream, through the final
    /// [`TokenKind::Eof`] inclusive.
    pub fn scan_all(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next(&mut self) -> Result<Token, ScanError> {
        loop {
            // skip whitespace; a whitespace-classified line terminator
            // advances the line counter and may be a token of its own
            let c = loop {
                let c = match self.peek_char()? {
                    Some(c) => c,
                    None => {
                        self.eof = true;
                        return Ok(Token::new(TokenKind::Eof, self.line));
                    }
                };

                if self.table.class_of(c) != CharClass::Whitespace {
                    break c;
                }

                if is_terminator(c) {
                    let line = self.line;
                    self.advance_char()?;
                    // the \n of a \r\n pair belongs to the same terminator
                    if c == '\r' && self.peek_char()? == Some('\n') {
                        self.advance_char()?;
                    }
                    self.line += 1;
                    if self.eol_significant {
                        return Ok(Token::new(TokenKind::Eol, line));
                    }
                } else {
                    self.advance_char()?;
                }
            };

            if self.parse_numbers && self.at_number_start()? {
                return self.scan_number();
            }

            match self.table.class_of(c) {
                CharClass::Word => return self.scan_word(),
                CharClass::Quote => return self.scan_quoted(c),
                class => {
                    self.advance_char()?;

                    if c == '/' && self.slash_star && self.peek_char()? == Some('*') {
                        self.advance_char()?;
                        self.skip_block_comment()?;
                        continue;
                    }

                    if c == '/' && self.slash_slash && self.peek_char()? == Some('/') {
                        self.skip_line_comment()?;
                        continue;
                    }

                    if class == CharClass::Comment {
                        self.skip_line_comment()?;
                        continue;
                    }

                    return Ok(Token::new(TokenKind::Ordinary(c), self.line));
                }
            }
        }
    }

    /// Whether the upcoming characters start a numeric literal: a
    /// word-classified digit, or `-`/`.`/`-.` leading into one.
    fn at_number_start(&mut self) -> Result<bool, ScanError> {
        match self.peek_char()? {
            Some('-') => match self.lookahead_char(1)? {
                Some('.') => self.lookahead_digit(2),
                Some(_) => self.lookahead_digit(1),
                None => Ok(false),
            },
            Some('.') => self.lookahead_digit(1),
            Some(c) => Ok(self.word_digit(c)),
            None => Ok(false),
        }
    }

    fn lookahead_digit(&mut self, n: usize) -> Result<bool, ScanError> {
        Ok(match self.lookahead_char(n)? {
            Some(c) => self.word_digit(c),
            None => false,
        })
    }

    fn word_digit(&self, c: char) -> bool {
        c.is_ascii_digit() && self.table.class_of(c) == CharClass::Word
    }

    fn scan_number(&mut self) -> Result<Token, ScanError> {
        let line = self.line;
        let mut literal = String::new();

        if self.peek_char()? == Some('-') {
            self.advance_char()?;
            literal.push('-');
        }

        while let Some(c) = self.peek_char()? {
            if !self.word_digit(c) {
                break;
            }
            self.advance_char()?;
            literal.push(c);
        }

        // one decimal point; a trailing dot still belongs to the number
        if self.peek_char()? == Some('.') {
            self.advance_char()?;
            literal.push('.');
            while let Some(c) = self.peek_char()? {
                if !self.word_digit(c) {
                    break;
                }
                self.advance_char()?;
                literal.push(c);
            }
        }

        match literal.parse::<f64>() {
            Ok(value) => Ok(Token::new(TokenKind::Number(value), line)),
            Err(_) => Err(ScanError::new(ErrorKind::InvalidNumberLiteral { literal }).line(line)),
        }
    }

    fn scan_word(&mut self) -> Result<Token, ScanError> {
        let line = self.line;
        let mut word = String::new();

        while let Some(c) = self.peek_char()? {
            if self.table.class_of(c) != CharClass::Word {
                break;
            }
            self.advance_char()?;
            word.push(c);
        }

        if self.lower_case {
            word = word.to_lowercase();
        }

        Ok(Token::new(TokenKind::Word(word), line))
    }

    fn scan_quoted(&mut self, quote: char) -> Result<Token, ScanError> {
        let line_start = self.line;
        self.advance_char()?;

        let mut text = String::new();
        loop {
            let c = match self.peek_char()? {
                Some(c) => c,
                None => {
                    return Err(
                        ScanError::new(ErrorKind::UnterminatedQuote { quote }).line(line_start)
                    );
                }
            };

            if c == quote {
                self.advance_char()?;
                break;
            }

            if is_terminator(c) {
                // the quoted word ends at the line break, which stays in
                // the stream for the next token
                break;
            }

            self.advance_char()?;
            if c == '\\' {
                match self.scan_escape()? {
                    Some(escaped) => text.push(escaped),
                    None => {
                        return Err(ScanError::new(ErrorKind::UnterminatedQuote { quote })
                            .line(line_start));
                    }
                }
            } else {
                text.push(c);
            }
        }

        Ok(Token::new(TokenKind::Word(text), line_start))
    }

    /// Processes the character after a backslash inside a quoted string.
    /// `Ok(None)` means the input ended right after the backslash.
    fn scan_escape(&mut self) -> Result<Option<char>, ScanError> {
        let c = match self.advance_char()? {
            Some(c) => c,
            None => return Ok(None),
        };

        if !is_octal(c) {
            return Ok(Some(escape_char(c)));
        }

        // up to three octal digits, the third only when the first is 0..=3
        // so the value stays below 256
        let first = c;
        let mut value = c as u32 - '0' as u32;

        if let Some(d) = self.peek_char()? {
            if is_octal(d) {
                self.advance_char()?;
                value = (value << 3) + (d as u32 - '0' as u32);

                if first <= '3' {
                    if let Some(d) = self.peek_char()? {
                        if is_octal(d) {
                            self.advance_char()?;
                            value = (value << 3) + (d as u32 - '0' as u32);
                        }
                    }
                }
            }
        }

        Ok(Some(char::from(value as u8)))
    }

    fn skip_line_comment(&mut self) -> Result<(), ScanError> {
        while let Some(c) = self.peek_char()? {
            if is_terminator(c) {
                break;
            }
            self.advance_char()?;
        }
        Ok(())
    }

    fn skip_block_comment(&mut self) -> Result<(), ScanError> {
        let mut prev = None;
        while let Some(c) = self.advance_char()? {
            if c == '/' && prev == Some('*') {
                return Ok(());
            }

            if is_terminator(c) {
                if c == '\r' && self.peek_char()? == Some('\n') {
                    self.advance_char()?;
                }
                self.line += 1;
            }

            prev = Some(c);
        }

        // input ended inside the comment, which just ends the scan
        Ok(())
    }

    fn fill(&mut self, n: usize) -> Result<(), ScanError> {
        while self.pending.len() < n {
            let line = self.line;
            match self.source.next_char().map_err(|err| err.line(line))? {
                Some(c) => self.pending.push_back(c),
                None => break,
            }
        }
        Ok(())
    }

    fn peek_char(&mut self) -> Result<Option<char>, ScanError> {
        self.lookahead_char(0)
    }

    fn lookahead_char(&mut self, n: usize) -> Result<Option<char>, ScanError> {
        self.fill(n + 1)?;
        Ok(self.pending.get(n).copied())
    }

    fn advance_char(&mut self) -> Result<Option<char>, ScanError> {
        self.fill(1)?;
        Ok(self.pending.pop_front())
    }
}

fn is_terminator(c: char) -> bool {
    c == '\r' || c == '\n'
}

fn is_octal(c: char) -> bool {
    ('0'..='7').contains(&c)
}

fn escape_char(c: char) -> char {
    match c {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0b}',
        c => c,
    }
}
