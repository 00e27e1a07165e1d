//! Author: [Seclususs](https://github.com/seclususs)
//!
//! `log` backend. Records are written as single lines of the form
//! `[2024-01-31 13:37:00] [Info] message` to the chosen sink. On Android
//! `init` routes everything to logcat instead.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};

pub const LOG_TAG: &str = "droid-utils";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static STREAM_LOGGER: OnceLock<StreamLogger> = OnceLock::new();

pub enum LogTarget {
    Stdout,
    Stderr,
    Writer(Box<dyn Write + Send>),
}

impl LogTarget {
    fn into_sink(self) -> Box<dyn Write + Send> {
        match self {
            LogTarget::Stdout => Box::new(io::stdout()),
            LogTarget::Stderr => Box::new(io::stderr()),
            LogTarget::Writer(w) => w,
        }
    }
}

pub fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "Error",
        Level::Warn => "Warning",
        Level::Info => "Info",
        Level::Debug => "Debug",
        Level::Trace => "Trace",
    }
}

pub fn format_record(timestamp: &str, level: Level, message: &str) -> String {
    format!("[{timestamp}] [{}] {message}\n", level_label(level))
}

fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub struct StreamLogger {
    level: LevelFilter,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl StreamLogger {
    pub fn new(level: LevelFilter, target: LogTarget) -> Self {
        Self {
            level,
            sink: Mutex::new(target.into_sink()),
        }
    }
}

impl Log for StreamLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(
            &current_timestamp(),
            record.level(),
            &record.args().to_string(),
        );
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(target_os = "android")]
pub fn init() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(LOG_TAG)
            .with_max_level(default_level()),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init() {
    init_with(default_level(), LogTarget::Stdout);
}

/// Installs the stream logger as the global `log` backend. Only the first
/// installation in a process takes effect; later calls are ignored.
pub fn init_with(level: LevelFilter, target: LogTarget) {
    let mut fresh = false;
    let logger = STREAM_LOGGER.get_or_init(|| {
        fresh = true;
        StreamLogger::new(level, target)
    });
    if fresh && log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}
