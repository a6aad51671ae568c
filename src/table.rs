//! Character classification tables.

use fnv::FnvHashMap;
use once_cell::sync::Lazy;

/// How the tokenizer treats a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(fuzzing, derive(arbitrary::Arbitrary))]
pub enum CharClass {
    /// Extends a word token.
    Word,
    /// Skipped between tokens.
    Whitespace,
    /// Starts a comment.
    Comment,
    /// Delimits a quoted string.
    Quote,
    /// Stands alone as a single-character token.
    Ordinary,
}

/// Maps every character to a [`CharClass`].
///
/// Character codes up to U+00FF live in a dense table, which is the range the
/// bulk setters like [`word_chars`] operate on. Wider code points go in an
/// override map and fall back to a default class when absent: word characters
/// in the standard table, ordinary after [`reset`].
///
/// [`word_chars`]: ./struct.SyntaxTable.html#method.word_chars
/// [`reset`]: ./struct.SyntaxTable.html#method.reset
#[derive(Debug, Clone)]
pub struct SyntaxTable {
    narrow: [CharClass; 256],
    wide: FnvHashMap<char, CharClass>,
    wide_default: CharClass,
}

static DEFAULT: Lazy<SyntaxTable> = Lazy::new(|| {
    let mut table = SyntaxTable::new();
    table.whitespace_chars('\u{00}', ' ');
    table.word_chars('a', 'z');
    table.word_chars('A', 'Z');
    table.word_chars('\u{a0}', '\u{ff}');
    table.word_chars('0', '9');
    table.comment_char('/');
    table.quote_char('"');
    table.quote_char('\'');
    table.wide_default = CharClass::Word;
    table
});

impl Default for SyntaxTable {
    /// The standard table: letters and digits are word characters, control
    /// characters and the space are whitespace, `/` starts a comment, `"` and
    /// `'` quote, and everything else is ordinary.
    fn default() -> Self {
        DEFAULT.clone()
    }
}

impl SyntaxTable {
    /// Creates a table where every character is [`CharClass::Ordinary`].
    pub fn new() -> Self {
        SyntaxTable {
            narrow: [CharClass::Ordinary; 256],
            wide: FnvHashMap::default(),
            wide_default: CharClass::Ordinary,
        }
    }

    /// Makes every character ordinary again.
    pub fn reset(&mut self) {
        *self = SyntaxTable::new();
    }

    /// Looks up the class of a character.
    pub fn class_of(&self, c: char) -> CharClass {
        if (c as u32) <= 0xff {
            self.narrow[c as usize]
        } else {
            self.wide.get(&c).copied().unwrap_or(self.wide_default)
        }
    }

    /// Classifies a single character anywhere in the code space.
    pub fn set_class(&mut self, c: char, class: CharClass) {
        if (c as u32) <= 0xff {
            self.narrow[c as usize] = class;
        } else {
            self.wide.insert(c, class);
        }
    }

    /// Classifies `low..=high` as word characters. Like the other range
    /// setters, the range is clipped to U+00FF; use [`set_class`] to reach
    /// wider code points.
    ///
    /// [`set_class`]: ./struct.SyntaxTable.html#method.set_class
    pub fn word_chars(&mut self, low: char, high: char) {
        self.set_range(low, high, CharClass::Word);
    }

    /// Classifies `low..=high` as whitespace.
    pub fn whitespace_chars(&mut self, low: char, high: char) {
        self.set_range(low, high, CharClass::Whitespace);
    }

    /// Classifies `low..=high` as ordinary.
    pub fn ordinary_chars(&mut self, low: char, high: char) {
        self.set_range(low, high, CharClass::Ordinary);
    }

    /// Classifies a single character as ordinary.
    pub fn ordinary_char(&mut self, c: char) {
        self.set_class(c, CharClass::Ordinary);
    }

    /// Makes a character start comments.
    pub fn comment_char(&mut self, c: char) {
        self.set_class(c, CharClass::Comment);
    }

    /// Makes a character delimit quoted strings. A quoted string runs until
    /// the next occurrence of the same character.
    pub fn quote_char(&mut self, c: char) {
        self.set_class(c, CharClass::Quote);
    }

    fn set_range(&mut self, low: char, high: char, class: CharClass) {
        let low = low as usize;
        let high = (high as usize).min(0xff);
        for c in low..=high {
            self.narrow[c] = class;
        }
    }
}
