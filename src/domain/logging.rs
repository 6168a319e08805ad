//! Structured logging shared by every layer.
//!
//! Domain code only sees the [`Logger`] and [`TimeProvider`] traits; the browser
//! implementations are installed once at startup. Until then (and in native tests)
//! entries go nowhere.

use derive_more::Display;
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Layer and unit that produced a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Stamp from the installed [`TimeProvider`]
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub metadata: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.to_string(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: &str) -> Self {
        self.metadata = Some(metadata.to_string());
        self
    }
}

/// Wall clock used for log stamps only; chart data never reads it
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Whether entries at `level` are kept. The macros skip formatting when not.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn emit(&self, level: LogLevel, component: LogComponent, message: &str) {
        if self.enabled(level) {
            self.log(LogEntry::new(level, component, message));
        }
    }

    fn trace(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Trace, component, message);
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Debug, component, message);
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Info, component, message);
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Warn, component, message);
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Error, component, message);
    }

    /// Log with structured metadata, e.g. the HTTP status of a failed fetch
    fn log_with_metadata(&self, level: LogLevel, component: LogComponent, message: &str, metadata: &str) {
        if self.enabled(level) {
            self.log(LogEntry::new(level, component, message).with_metadata(metadata));
        }
    }
}

/// Keeps entries in memory, for inspecting what a code path logged
#[derive(Debug, Default)]
pub struct MemoryLogger {
    min_level: Option<LogLevel>,
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level: Some(min_level), entries: Mutex::default() }
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|mut entries| std::mem::take(&mut *entries)).unwrap_or_default()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        self.min_level.is_none_or(|min| level >= min)
    }
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the process-wide logger. Later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Install the process-wide clock used for log stamps. Later calls are ignored.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    match GLOBAL_LOGGER.get() {
        Some(logger) => logger.as_ref(),
        None => &Silent,
    }
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    match GLOBAL_TIME_PROVIDER.get() {
        Some(provider) => provider.as_ref(),
        None => &SequenceTimeProvider,
    }
}

struct Silent;

impl Logger for Silent {
    fn log(&self, _entry: LogEntry) {}

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Fallback clock for native builds: a monotonically increasing sequence number
struct SequenceTimeProvider;

impl TimeProvider for SequenceTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        NEXT.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{timestamp:06}")
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $component:expr, $($arg:tt)*) => {{
        let logger = $crate::domain::logging::get_logger();
        if logger.enabled($level) {
            logger.log($crate::domain::logging::LogEntry::new($level, $component, &format!($($arg)*)));
        }
    }};
}

/// Compiled out of release builds, like [`log_debug!`]
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::__log_at!($crate::domain::logging::LogLevel::Trace, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::__log_at!($crate::domain::logging::LogLevel::Debug, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!($crate::domain::logging::LogLevel::Info, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!($crate::domain::logging::LogLevel::Warn, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!($crate::domain::logging::LogLevel::Error, $component, $($arg)*)
    };
}
