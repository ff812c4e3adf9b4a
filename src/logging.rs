#![cfg(feature = "std")]

//! Stderr logger configured from `BATTLESHIPS_LOG`.
//!
//! The variable holds comma-separated directives. A bare level sets the
//! default and `target=level` overrides a module and everything below it,
//! e.g. `BATTLESHIPS_LOG=debug,battleships::ai=trace`. The targeter, board
//! and geometry log on every shot or enumeration, so they never go past
//! `debug` unless named explicitly.

use std::cmp;
use std::env;
use std::string::{String, ToString};
use std::sync::OnceLock;
use std::vec::Vec;

use log::{LevelFilter, Log, Metadata, Record};

const ENV_VAR: &str = "BATTLESHIPS_LOG";

/// Modules that log per shot.
const CHATTY_TARGETS: &[&str] = &[
    "battleships::ai",
    "battleships::board",
    "battleships::geometry",
];

/// Per-target level filter parsed from a directive string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    default: LevelFilter,
    /// Sorted longest target first, so the most specific directive wins.
    directives: Vec<(String, LevelFilter)>,
}

impl LogFilter {
    /// Parse `level,target=level,...`. Unknown levels are ignored and an
    /// empty string yields `info`.
    pub fn parse(spec: &str) -> Self {
        let mut default = LevelFilter::Info;
        let mut directives = Vec::new();
        for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                Some((target, level)) => {
                    if let Ok(level) = level.trim().parse() {
                        directives.push((target.trim().to_string(), level));
                    }
                }
                None => {
                    if let Ok(level) = part.parse() {
                        default = level;
                    }
                }
            }
        }
        directives.sort_by_key(|(target, _): &(String, LevelFilter)| cmp::Reverse(target.len()));
        Self { default, directives }
    }

    /// Level enabled for records from `target`.
    pub fn level_for(&self, target: &str) -> LevelFilter {
        if let Some((_, level)) = self
            .directives
            .iter()
            .find(|(prefix, _)| matches_target(target, prefix))
        {
            return *level;
        }
        if CHATTY_TARGETS.iter().any(|prefix| matches_target(target, prefix)) {
            return cmp::min(self.default, LevelFilter::Debug);
        }
        self.default
    }

    /// Most verbose level any target can reach.
    pub fn max_level(&self) -> LevelFilter {
        self.directives
            .iter()
            .fold(self.default, |acc, (_, level)| cmp::max(acc, *level))
    }
}

fn matches_target(target: &str, prefix: &str) -> bool {
    match target.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

struct StderrLogger {
    filter: OnceLock<LogFilter>,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter
            .get()
            .is_some_and(|f| metadata.level() <= f.level_for(metadata.target()))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger {
    filter: OnceLock::new(),
};

/// Install the stderr logger with directives from `BATTLESHIPS_LOG`.
pub fn init_logging() {
    let spec = env::var(ENV_VAR).unwrap_or_default();
    init_with_filter(LogFilter::parse(&spec));
}

/// Install the stderr logger with an explicit filter. Only the first call
/// in a process has any effect.
pub fn init_with_filter(filter: LogFilter) {
    let max = filter.max_level();
    if LOGGER.filter.set(filter).is_ok() {
        let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(max));
    }
}
