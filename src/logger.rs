use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};

static LOGGER: Logger = Logger;

/// Writes `[<level>] message` lines to standard error.
pub struct Logger;

pub fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

fn level_char(level: Level) -> char {
    match level {
        Level::Error => 'E',
        Level::Warn => 'W',
        Level::Info => '*',
        Level::Debug => 'D',
        Level::Trace => 'T',
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = io::stderr().lock();
            let _ = writeln!(stderr, "[{}] {}", level_char(record.level()), record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
