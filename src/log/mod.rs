//! Injected log sink.
//!
//! The client never writes to the process-wide logger on its own. It holds a
//! `LogSink`, which can forward to the installed `log` backend, discard
//! everything, or feed any other `log::Log` implementation.

use std::fmt;
use std::sync::Arc;

use log::{Level, Log, Metadata, Record};

/// Target used for every record emitted by this crate.
pub const LOG_TARGET: &str = "mcam_http";

#[derive(Clone)]
pub struct LogSink {
    inner: Arc<dyn Log>,
}

impl LogSink {
    pub fn new(logger: Arc<dyn Log>) -> Self {
        Self { inner: logger }
    }

    /// Forward to whatever backend was installed with `log::set_logger`
    /// (for example `env_logger`).
    pub fn global() -> Self {
        Self::new(Arc::new(GlobalLogger))
    }

    pub fn discard() -> Self {
        Self::new(Arc::new(NopLogger))
    }

    pub fn enabled(&self, level: Level) -> bool {
        let metadata = Metadata::builder().level(level).target(LOG_TARGET).build();
        self.inner.enabled(&metadata)
    }

    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.inner.log(
            &Record::builder()
                .level(level)
                .target(LOG_TARGET)
                .args(args)
                .build(),
        );
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogSink")
    }
}

struct GlobalLogger;

impl Log for GlobalLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

struct NopLogger;

impl Log for NopLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _: &Record<'_>) {}

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture {
        lines: Mutex<Vec<(Level, String, String, Option<String>)>>,
    }

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= Level::Info
        }

        fn log(&self, record: &Record<'_>) {
            self.lines.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
                record.module_path().map(str::to_string),
            ));
        }

        fn flush(&self) {}
    }

    #[test]
    fn forwards_enabled_records_with_crate_target() {
        let capture = Arc::new(Capture::default());
        let sink = LogSink::new(capture.clone());
        sink.info(format_args!("HttpStatus: {}", 500));
        sink.debug(format_args!("filtered out"));
        let lines = capture.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::Info);
        assert_eq!(lines[0].1, LOG_TARGET);
        assert_eq!(lines[0].2, "HttpStatus: 500");
        assert_eq!(lines[0].3, None);
    }

    #[test]
    fn discard_is_never_enabled() {
        let sink = LogSink::discard();
        assert!(!sink.enabled(Level::Error));
        sink.warn(format_args!("dropped"));
    }
}
