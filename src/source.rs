//! Character sources the tokenizer can scan.

use crate::error::{ErrorKind, ScanError};

use std::io::Read;
use std::str::Chars;

/// Hands out characters one at a time.
///
/// `Ok(None)` means the source is exhausted, and exhaustion is final: once a
/// source reports `None` it keeps reporting `None`.
pub trait Source {
    fn next_char(&mut self) -> Result<Option<char>, ScanError>;
}

/// Source over an in-memory string. Never fails.
#[derive(Debug)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrSource {
            chars: text.chars(),
        }
    }
}

impl Source for StrSource<'_> {
    fn next_char(&mut self) -> Result<Option<char>, ScanError> {
        Ok(self.chars.next())
    }
}

/// Source over a byte reader, decoding UTF-8 one code point at a time.
///
/// Only as many bytes as the next code point needs are pulled from the
/// reader, so blocking and interactive readers work without waiting for the
/// whole stream. The reader is taken as-is; wrap files and sockets in a
/// `BufReader` to avoid a syscall per byte.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    done: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            done: false,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, ScanError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ScanError::from(err)),
            }
        }
    }
}

impl<R: Read> Source for ReaderSource<R> {
    fn next_char(&mut self) -> Result<Option<char>, ScanError> {
        if self.done {
            return Ok(None);
        }

        let first = match self.next_byte()? {
            Some(byte) => byte,
            None => {
                self.done = true;
                return Ok(None);
            }
        };

        let len = match utf8_len(first) {
            Some(len) => len,
            None => return Err(ScanError::new(ErrorKind::InvalidUTF8)),
        };

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(len).skip(1) {
            match self.next_byte()? {
                Some(byte) => *slot = byte,
                None => {
                    // truncated sequence at the end of the stream
                    self.done = true;
                    return Err(ScanError::new(ErrorKind::InvalidUTF8));
                }
            }
        }

        match std::str::from_utf8(&bytes[..len]) {
            Ok(s) => Ok(s.chars().next()),
            Err(_) => Err(ScanError::new(ErrorKind::InvalidUTF8)),
        }
    }
}

fn utf8_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7f => Some(1),
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::io::Cursor;

    fn drain<S: Source>(mut source: S) -> Vec<char> {
        let mut chars = Vec::new();
        while let Some(c) = source.next_char().unwrap() {
            chars.push(c);
        }
        chars
    }

    #[test]
    fn str_source() {
        assert_eq!(drain(StrSource::new("ab c")), vec!['a', 'b', ' ', 'c']);
        assert_eq!(drain(StrSource::new("")), Vec::<char>::new());
    }

    #[test]
    fn reader_decodes_multibyte() {
        let text = "aé日🙂";
        let reader = ReaderSource::new(Cursor::new(text.as_bytes().to_vec()));
        assert_eq!(drain(reader), text.chars().collect::<Vec<char>>());
    }

    #[test]
    fn reader_exhaustion_is_final() {
        let mut source = ReaderSource::new(Cursor::new(b"a".to_vec()));
        assert_eq!(source.next_char().unwrap(), Some('a'));
        assert_eq!(source.next_char().unwrap(), None);
        assert_eq!(source.next_char().unwrap(), None);
    }

    #[test]
    fn reader_rejects_bad_bytes() {
        let mut source = ReaderSource::new(Cursor::new(vec![0xff, b'a']));
        let err = source.next_char().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidUTF8));

        // a bad byte does not poison the rest of the stream
        assert_eq!(source.next_char().unwrap(), Some('a'));
    }

    #[test]
    fn reader_rejects_truncated_sequence() {
        // first byte of 'é' only
        let mut source = ReaderSource::new(Cursor::new(vec![0xc3]));
        let err = source.next_char().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidUTF8));
        assert_eq!(source.next_char().unwrap(), None);
    }

    #[test]
    fn reader_propagates_io_errors() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "pipe broke"))
            }
        }

        let mut source = ReaderSource::new(Broken);
        let err = source.next_char().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InputSourceFailure { .. }));
    }

    #[test]
    fn reader_rejects_overlong_encoding() {
        // 0xc0 0x80 is an overlong NUL
        let mut source = ReaderSource::new(Cursor::new(vec![0xc0, 0x80]));
        let err = source.next_char().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidUTF8));
    }
}
