use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};

/// Writes log entries to the browser console, one console method per level
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }
}

/// `[stamp] LEVEL COMPONENT | message | metadata`
pub fn format_log_line(entry: &LogEntry, stamp: &str) -> String {
    match &entry.metadata {
        Some(metadata) => {
            format!("[{}] {} {} | {} | {}", stamp, entry.level, entry.component, entry.message, metadata)
        }
        None => format!("[{}] {} {} | {}", stamp, entry.level, entry.component, entry.message),
    }
}

impl Logger for ConsoleLogger {
    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        let stamp = get_time_provider().format_timestamp(entry.timestamp);
        let line = format_log_line(&entry, &stamp).into();
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }
}

/// Milliseconds from `Date.now()`, formatted in browser local time
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logging::LogComponent;

    #[test]
    fn log_line_includes_metadata_when_present() {
        let entry = LogEntry::new(LogLevel::Warn, LogComponent::Infrastructure("AlphaVantage"), "slow");
        assert_eq!(format_log_line(&entry, "12:00:00.000"), "[12:00:00.000]  WARN INF:AlphaVantage | slow");

        let entry = entry.with_metadata("status=503");
        assert!(format_log_line(&entry, "t").ends_with("| slow | status=503"));
    }

    #[test]
    fn production_logger_drops_debug() {
        let logger = ConsoleLogger::new_production();
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(ConsoleLogger::new_development().enabled(LogLevel::Debug));
    }
}
