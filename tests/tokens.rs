extern crate stoker;

use stoker::token::{Token, TokenKind};
use stoker::tokenizer::Tokenizer;

fn kinds(tokens: Vec<Token>) -> Vec<TokenKind> {
    tokens.into_iter().map(|token| token.kind).collect()
}

fn word(text: &str) -> TokenKind {
    TokenKind::Word(String::from(text))
}

#[test]
fn words_and_numbers() {
    use stoker::token::TokenKind::*;

    let tokens = stoker::tokenize("ab 12").unwrap();
    assert_eq!(kinds(tokens), vec![word("ab"), Number(12.0), Eof]);
}

#[test]
fn ordinary_between_words() {
    use stoker::token::TokenKind::*;

    let tokens = stoker::tokenize("a!b").unwrap();
    assert_eq!(kinds(tokens), vec![word("a"), Ordinary('!'), word("b"), Eof]);
}

#[test]
fn reset_before_first_token() {
    use stoker::token::TokenKind::*;

    let mut tokenizer = Tokenizer::from_text("12");
    tokenizer.reset_syntax();
    assert_eq!(
        kinds(tokenizer.scan_all().unwrap()),
        vec![Ordinary('1'), Ordinary('2'), Eof]
    );

    // letters, digits, and punctuation alike come out raw
    let mut tokenizer = Tokenizer::from_text("a1!");
    tokenizer.reset_syntax();
    assert_eq!(
        kinds(tokenizer.scan_all().unwrap()),
        vec![Ordinary('a'), Ordinary('1'), Ordinary('!'), Eof]
    );
}

#[test]
fn quoted_word() {
    use stoker::token::TokenKind::*;

    let tokens = stoker::tokenize("'hi there'").unwrap();
    assert_eq!(kinds(tokens), vec![word("hi there"), Eof]);
}

#[test]
fn unterminated_quote_is_an_error() {
    use stoker::error::ErrorKind;

    let err = stoker::tokenize("\"x").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnterminatedQuote { quote: '"' }));
}

#[test]
fn determinism() {
    let text = "a 'b c' 3.5 / comment\nd! -4 e";

    let first = stoker::tokenize(text).unwrap();
    let second = stoker::tokenize(text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn determinism_with_custom_table() {
    use stoker::source::StrSource;
    use stoker::table::{CharClass, SyntaxTable};

    let text = "one|two|#c\nfour";
    let mut table = SyntaxTable::default();
    table.quote_char('|');
    table.comment_char('#');
    table.set_class('f', CharClass::Ordinary);

    let scan = || {
        let mut tokenizer = Tokenizer::with_table(StrSource::new(text), table.clone());
        tokenizer.eol_is_significant(true);
        tokenizer.scan_all().unwrap()
    };
    assert_eq!(scan(), scan());
}

#[test]
fn eof_idempotence() {
    use stoker::token::TokenKind::*;

    let mut tokenizer = Tokenizer::from_text("only");
    assert_eq!(tokenizer.next_token().unwrap().kind, word("only"));
    for _ in 0..3 {
        assert_eq!(tokenizer.next_token().unwrap().kind, Eof);
    }
}

#[test]
fn pushback_round_trip() {
    use stoker::error::ErrorKind;
    use stoker::token::TokenKind::*;

    let mut tokenizer = Tokenizer::from_text("ab 12 cd");

    let first = tokenizer.next_token().unwrap();
    tokenizer.push_back().unwrap();
    assert_eq!(tokenizer.next_token().unwrap(), first);

    // one level only
    tokenizer.push_back().unwrap();
    let err = tokenizer.push_back().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidOperation { .. }));
    assert_eq!(tokenizer.next_token().unwrap(), first);

    // the rest of the stream is unaffected
    assert_eq!(tokenizer.next_token().unwrap().kind, Number(12.0));
    assert_eq!(tokenizer.next_token().unwrap().kind, word("cd"));
}

#[test]
fn reset_mid_scan_goes_raw() {
    use stoker::token::TokenKind::*;

    // the maneuver the syntax table exists for: scan words and numbers
    // until a number shows up, then drop to raw characters
    let mut tokenizer = Tokenizer::from_text("ab 12 cd!");
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token().unwrap();
        let is_number = matches!(token.kind, Number(_));
        let done = token.is_eof();
        tokens.push(token.kind);
        if is_number {
            tokenizer.reset_syntax();
        }
        if done {
            break;
        }
    }

    assert_eq!(
        tokens,
        vec![
            word("ab"),
            Number(12.0),
            Ordinary(' '),
            Ordinary('c'),
            Ordinary('d'),
            Ordinary('!'),
            Eof,
        ]
    );
}

#[test]
fn demo_file() {
    use stoker::token::TokenKind::*;

    let tokens = stoker::tokenize_file(std::path::Path::new("demos/sample.txt")).unwrap();
    assert_eq!(
        kinds(tokens),
        vec![
            word("Hello"),
            Ordinary('.'),
            word("This"),
            word("is"),
            word("a"),
            word("text"),
            word("that"),
            word("will"),
            word("be"),
            word("split"),
            word("into"),
            word("tokens"),
            Ordinary('.'),
            Number(1.0),
            Ordinary('+'),
            Number(1.0),
            Ordinary('='),
            Number(2.0),
            Eof,
        ]
    );
}

#[test]
fn missing_file_names_the_file() {
    let err = stoker::tokenize_file(std::path::Path::new("demos/nope.txt")).unwrap_err();
    assert!(err.to_string().starts_with("demos/nope.txt:"));
}

#[test]
fn reader_matches_in_memory_scan() {
    use std::{fs::File, io::BufReader};

    let contents = std::fs::read_to_string("demos/sample.txt").unwrap();
    let in_memory = stoker::tokenize(&contents).unwrap();

    let file = File::open("demos/sample.txt").unwrap();
    let streamed = Tokenizer::from_reader(BufReader::new(file))
        .scan_all()
        .unwrap();

    assert_eq!(in_memory, streamed);
}

#[test]
fn reader_reports_bad_bytes_and_recovers() {
    use std::io::Cursor;
    use stoker::error::ErrorKind;
    use stoker::token::TokenKind::*;

    let mut tokenizer = Tokenizer::from_reader(Cursor::new(b"ab \xffcd".to_vec()));
    assert_eq!(tokenizer.next_token().unwrap().kind, word("ab"));

    let err = tokenizer.next_token().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidUTF8));

    // the scan continues after the bad byte
    assert_eq!(tokenizer.next_token().unwrap().kind, word("cd"));
    assert_eq!(tokenizer.next_token().unwrap().kind, Eof);
}

#[test]
fn line_numbers() {
    use stoker::token::TokenKind::*;

    let mut tokenizer = Tokenizer::from_text("one\ntwo three\r\nfour");
    tokenizer.eol_is_significant(true);
    let tokens = tokenizer.scan_all().unwrap();

    let expected = [
        (word("one"), 1),
        (Eol, 1),
        (word("two"), 2),
        (word("three"), 2),
        (Eol, 2),
        (word("four"), 3),
        (Eof, 3),
    ];
    for (token, (kind, line)) in tokens.iter().zip(expected.iter()) {
        assert_eq!(&token.kind, kind);
        assert_eq!(token.line, *line);
    }
    assert_eq!(tokens.len(), expected.len());
}

#[test]
fn peek_then_take() {
    let mut tokenizer = Tokenizer::from_text("ab\ncd");
    assert_eq!(tokenizer.peek_token().unwrap().kind, word("ab"));
    assert_eq!(tokenizer.next_token().unwrap().kind, word("ab"));
    assert_eq!(tokenizer.line(), 1);

    assert_eq!(tokenizer.peek_token().unwrap().kind, word("cd"));
    assert_eq!(tokenizer.line(), 2);
}

#[test]
fn rendered_demo_output() {
    use stoker::pretty;

    let contents = std::fs::read_to_string("demos/sample.txt").unwrap();
    let tokens = stoker::tokenize(&contents).unwrap();
    let rendered = pretty::print_tokens(&tokens);

    assert!(rendered.contains("Word: Hello"));
    assert!(rendered.contains("'.' encountered."));
    assert!(rendered.contains("Number: 1"));
    assert!(rendered.contains("Number: 2"));
    assert!(rendered.ends_with("End of File encountered.\n"));

    let mut tokenizer = Tokenizer::from_text(&contents);
    tokenizer.eol_is_significant(true);
    let rendered = pretty::print_tokens(&tokenizer.scan_all().unwrap());
    assert!(rendered.contains("End of Line encountered."));
}

#[test]
fn flags_combine() {
    use stoker::token::TokenKind::*;

    let mut tokenizer = Tokenizer::from_text("Mix // note\nOF 2 CASES");
    tokenizer.ordinary_char('/');
    tokenizer.slash_slash_comments(true);
    tokenizer.eol_is_significant(true);
    tokenizer.lower_case_mode(true);
    tokenizer.parse_numbers(false);

    assert_eq!(
        kinds(tokenizer.scan_all().unwrap()),
        vec![
            word("mix"),
            Eol,
            word("of"),
            word("2"),
            word("cases"),
            Eof,
        ]
    );
}

#[test]
fn scan_all_ends_with_exactly_one_eof() {
    let tokens = stoker::tokenize("a b c 'd' 5 /x\ny").unwrap();
    let eofs = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Eof)
        .count();
    assert_eq!(eofs, 1);
    assert!(tokens.last().unwrap().is_eof());
}
