#![no_main]
use libfuzzer_sys::fuzz_target;

use stoker::source::StrSource;
use stoker::table::{CharClass, SyntaxTable};
use stoker::tokenizer::Tokenizer;

// table + flags + remaining input decide every token, so two scans of the
// same input must agree exactly
fuzz_target!(|data: (String, Vec<(char, CharClass)>, u8)| {
    let (text, edits, flags) = data;

    let run = || {
        let mut table = SyntaxTable::default();
        for (c, class) in edits.iter() {
            table.set_class(*c, *class);
        }

        let mut tokenizer = Tokenizer::with_table(StrSource::new(&text), table);
        tokenizer.eol_is_significant(flags & 1 != 0);
        tokenizer.slash_slash_comments(flags & 2 != 0);
        tokenizer.slash_star_comments(flags & 4 != 0);
        tokenizer.parse_numbers(flags & 8 != 0);
        tokenizer.lower_case_mode(flags & 16 != 0);

        let mut trace = Vec::new();
        loop {
            match tokenizer.next_token() {
                Ok(token) => {
                    let done = token.is_eof();
                    trace.push(format!("{token:?}"));
                    if done {
                        break;
                    }
                }
                Err(err) => trace.push(format!("{err}")),
            }
        }
        trace
    };

    assert_eq!(run(), run());
});
