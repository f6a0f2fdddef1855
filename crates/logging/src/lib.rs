use chrono::Local;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Most recent entries kept in memory; older ones are discarded.
pub const MAX_ENTRIES: usize = 1000;

// Recent messages of every level, console threshold aside
static LOGS: Lazy<Mutex<VecDeque<LogEntry>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(MAX_ENTRIES)));

// Threshold for echoing to the console
static LOG_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Info));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Debug => "🔍",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    /// Console level for the CLI's `--debug` / `--verbose` flags.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warning
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    pub fn formatted(&self) -> String {
        format!("[{}] {} {}", self.timestamp, self.level.prefix(), self.message)
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current_level) = LOG_LEVEL.lock() {
        *current_level = level;
    }
}

pub fn get_log_level() -> LogLevel {
    if let Ok(level) = LOG_LEVEL.lock() {
        *level
    } else {
        LogLevel::Info
    }
}

/// Records `message` and prints it if `level` reaches the console threshold.
pub fn log(level: LogLevel, message: &str) {
    let entry = LogEntry {
        level,
        timestamp: Local::now().format("%H:%M:%S").to_string(),
        message: message.to_string(),
    };
    let formatted = entry.formatted();

    if let Ok(mut logs) = LOGS.lock() {
        if logs.len() == MAX_ENTRIES {
            logs.pop_front();
        }
        logs.push_back(entry);
    }

    if level >= get_log_level() {
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", formatted),
            _ => println!("{}", formatted),
        }
    }
}

/// Retained entries at `level` or above, oldest first.
pub fn entries_at_or_above(level: LogLevel) -> Vec<LogEntry> {
    match LOGS.lock() {
        Ok(logs) => logs.iter().filter(|e| e.level >= level).cloned().collect(),
        Err(_) => Vec::new(),
    }
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warning(message: &str) {
    log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests sharing the global store must not evict each other's entries
    static STORE_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Warning);
        assert_eq!(LogLevel::from_flags(true, false), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Debug);
    }

    #[test]
    fn test_messages_are_recorded_below_threshold() {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_log_level(LogLevel::Error);
        debug("recorded-debug-message");
        let entries = entries_at_or_above(LogLevel::Debug);
        assert!(entries
            .iter()
            .any(|e| e.message == "recorded-debug-message" && e.formatted().starts_with('[')));
    }

    #[test]
    fn test_store_is_bounded() {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_log_level(LogLevel::Error);
        for i in 0..MAX_ENTRIES + 250 {
            debug(&format!("bounded-store-message-{}", i));
        }
        let entries = entries_at_or_above(LogLevel::Debug);
        assert!(entries.len() <= MAX_ENTRIES);
        assert!(!entries
            .iter()
            .any(|e| e.message == "bounded-store-message-0"));
        let last = format!("bounded-store-message-{}", MAX_ENTRIES + 249);
        assert!(entries.iter().any(|e| e.message == last));
    }

    #[test]
    fn test_entries_filter_by_level() {
        let _guard = STORE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        warning("filtered-warning-message");
        let entries = entries_at_or_above(LogLevel::Warning);
        assert!(entries
            .iter()
            .any(|e| e.message == "filtered-warning-message" && e.level == LogLevel::Warning));
        assert!(entries.iter().all(|e| e.level >= LogLevel::Warning));
    }
}
