//! `log` records routed to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

fn line(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = line(record);
        match record.level() {
            Level::Error => gloo::console::error!(msg),
            Level::Warn => gloo::console::warn!(msg),
            Level::Info => gloo::console::info!(msg),
            Level::Debug | Level::Trace => gloo::console::debug!(msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Repeated calls are ignored.
pub fn init() {
    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_carries_target_and_message() {
        let msg = line(
            &Record::builder()
                .args(format_args!("hold {}", 3))
                .target("void_assembly::machine")
                .level(Level::Debug)
                .build(),
        );
        assert_eq!(msg, "[void_assembly::machine] hold 3");
    }
}
