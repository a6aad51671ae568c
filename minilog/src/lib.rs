//! Tiny `log` backend driven by the `RUST_LOG` environment variable.
//!
//! `RUST_LOG=debug` enables every target at debug and below.
//! `RUST_LOG=stoker=trace,rustyline=warn` picks levels per crate. Unset
//! means silent. Records go to stderr so they never mix with program
//! output on stdout.

use fnv::FnvHashMap;
use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
};

#[derive(Clone, Debug, Default)]
struct Filter {
    everything: Option<Level>,
    per_crate: FnvHashMap<String, Level>,
}

struct StderrLogger {
    filter: RwLock<Filter>,
    active: AtomicBool,
}

impl StderrLogger {
    fn new() -> Self {
        StderrLogger {
            filter: RwLock::new(Filter::default()),
            active: AtomicBool::new(false),
        }
    }

    fn set_filter(&self, filter: Filter) {
        let mut lock = self.filter.write().expect("could not acquire write lock");
        *lock = filter;
    }

    fn level_for(&self, crate_: &str) -> Option<Level> {
        let lock = self.filter.read().expect("could not acquire read lock");
        lock.per_crate.get(crate_).cloned()
    }
}

const SPEC_TERM: &str = "([a-z_\\-]+)";

static TARGET_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new("^([a-z_]+)").expect("bad regex"));
static SPEC_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("{SPEC_TERM}(?:={SPEC_TERM})?")).expect("bad regex"));

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if !self.active.load(Ordering::Relaxed) {
            return false;
        }

        let lock = self.filter.read().expect("could not acquire read lock");
        if let Some(everything) = lock.everything {
            return everything >= metadata.level();
        }
        // level_for takes the lock again
        drop(lock);

        TARGET_HEAD
            .captures(metadata.target())
            .and_then(|capture| capture.get(1))
            .and_then(|crate_| self.level_for(crate_.as_str()))
            .map(|level| level >= metadata.level())
            .unwrap_or(false)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut level = format!("{:5}", record.level());
            let mut target = format!("[{}]", record.target());

            if atty::is(atty::Stream::Stderr) {
                level = paint(&level, record.level());
                target = paint(&target, record.level());
            }

            eprintln!("{level} {target} {}", record.args());
        }
    }

    fn flush(&self) {}
}

fn paint(s: &str, level: Level) -> String {
    use owo_colors::OwoColorize;
    match level {
        Level::Error => s.bright_red().to_string(),
        Level::Warn => s.bright_yellow().to_string(),
        Level::Info => s.cyan().to_string(),
        Level::Debug => s.blue().to_string(),
        Level::Trace => s.dimmed().to_string(),
    }
}

fn parse_spec(spec: &str) -> Filter {
    // a bare level word applies to everything
    if let Ok(level) = Level::from_str(spec) {
        return Filter {
            everything: Some(level),
            per_crate: FnvHashMap::default(),
        };
    }

    let mut per_crate = FnvHashMap::default();
    for captures in SPEC_PAIR.captures_iter(spec) {
        if let (Some(crate_), Some(level)) = (captures.get(1), captures.get(2)) {
            match Level::from_str(level.as_str()) {
                Ok(level) => {
                    per_crate.insert(crate_.as_str().to_owned(), level);
                }
                Err(_) => eprintln!("minilog: unknown level '{}'", level.as_str()),
            }
        }
    }

    Filter {
        everything: None,
        per_crate,
    }
}

static LOGGER: Lazy<StderrLogger> = Lazy::new(StderrLogger::new);

/// Installs the logger and reads `RUST_LOG`.
pub fn init() {
    if let Ok(spec) = std::env::var("RUST_LOG") {
        LOGGER.set_filter(parse_spec(&spec));
        LOGGER.active.store(true, Ordering::SeqCst);
    }

    log::set_logger(&*LOGGER)
        .map(|()| log::set_max_level(LevelFilter::Trace))
        .expect("log::set_logger failed");
}
