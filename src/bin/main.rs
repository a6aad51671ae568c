extern crate stoker;

use gumdrop::Options;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::path::PathBuf;
use stoker::error::{ErrorKind, ScanError};
use stoker::source::{Source, StrSource};
use stoker::table::SyntaxTable;
use stoker::tokenizer::Tokenizer;
use stoker::{pretty, trace};

#[derive(Debug, Options)]
struct Args {
    #[options(free, help = "file to tokenize; without one, reads a prompt")]
    file: Option<PathBuf>,

    #[options(help = "print this message")]
    help: bool,

    #[options(help = "tokenize standard input")]
    stdin: bool,

    #[options(help = "emit end-of-line tokens")]
    eol: bool,

    #[options(help = "do not parse numbers")]
    no_numbers: bool,

    #[options(help = "fold words to lowercase")]
    lowercase: bool,

    #[options(help = "recognize // line comments")]
    slash_slash: bool,

    #[options(help = "recognize /* */ block comments")]
    slash_star: bool,

    #[options(help = "reset the syntax table before scanning")]
    raw: bool,
}

fn main() {
    #[cfg(feature = "logging")]
    minilog::init();

    let args = Args::parse_args_default_or_exit();
    trace!("{args:?}");

    if let Some(file) = args.file.as_deref() {
        match std::fs::read_to_string(file) {
            Ok(contents) => {
                let mut tokenizer = Tokenizer::from_text(&contents);
                if args.raw {
                    tokenizer.reset_syntax();
                }
                configure(&mut tokenizer, &args);
                scan_and_print(&mut tokenizer);
            }
            Err(err) => {
                println!("{}", ScanError::from(err).file(file.display().to_string()));
                std::process::exit(1);
            }
        }
    } else if args.stdin {
        let stdin = std::io::stdin();
        let mut tokenizer = Tokenizer::from_reader(stdin.lock());
        if args.raw {
            tokenizer.reset_syntax();
        }
        configure(&mut tokenizer, &args);
        scan_and_print(&mut tokenizer);
    } else {
        repl(&args);
    }
}

fn configure<S: Source>(tokenizer: &mut Tokenizer<S>, args: &Args) {
    tokenizer.eol_is_significant(args.eol);
    tokenizer.parse_numbers(!args.no_numbers);
    tokenizer.lower_case_mode(args.lowercase);
    tokenizer.slash_slash_comments(args.slash_slash);
    tokenizer.slash_star_comments(args.slash_star);
}

fn scan_and_print<S: Source>(tokenizer: &mut Tokenizer<S>) {
    loop {
        match tokenizer.next_token() {
            Ok(token) => {
                let done = token.is_eof();
                println!("{}", pretty::print_token(&token));
                if done {
                    break;
                }
            }

            Err(err) => {
                println!("{err}");
                // a failing reader would fail the same way forever
                if matches!(err.kind, ErrorKind::InputSourceFailure { .. }) {
                    break;
                }
            }
        }
    }
}

fn repl(args: &Args) {
    let mut table = SyntaxTable::default();
    if args.raw {
        table.reset();
    }

    let mut rl = Editor::<()>::new();
    let _ = rl.load_history(".stoker_history");

    loop {
        match rl.readline("-- ") {
            Ok(line) => {
                rl.add_history_entry(&line);

                match line.trim() {
                    ":reset" => {
                        table.reset();
                        continue;
                    }
                    ":default" => {
                        table = SyntaxTable::default();
                        continue;
                    }
                    _ => {}
                }

                let mut tokenizer = Tokenizer::with_table(StrSource::new(&line), table.clone());
                configure(&mut tokenizer, args);
                scan_and_print(&mut tokenizer);
            }

            Err(ReadlineError::Interrupted) => break,

            Err(ReadlineError::Eof) => {
                println!("bye!");
                break;
            }

            Err(e) => {
                println!("err: {e:?}");
                break;
            }
        }
    }

    let _ = rl.save_history(".stoker_history");
}
