//! Log level selection and subscriber setup

use std::fmt;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Verbosity accepted by `--log`, by name or by number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Tracing level used as the subscriber's maximum
    ///
    /// Tracing has no level above ERROR, so CRITICAL shares it.
    pub fn as_tracing(self) -> Level {
        match self {
            LogLevel::Critical | LogLevel::Error => Level::ERROR,
            LogLevel::Warning => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" | "3" => Ok(LogLevel::Critical),
            "ERROR" | "2" => Ok(LogLevel::Error),
            "WARNING" | "1" => Ok(LogLevel::Warning),
            "INFO" | "0" => Ok(LogLevel::Info),
            "DEBUG" | "-1" => Ok(LogLevel::Debug),
            _ => Err(format!(
                "'{}' is not a valid log level. \
                Valid levels: CRITICAL, ERROR, WARNING, INFO, DEBUG (or 3, 2, 1, 0, -1)",
                s
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        };
        f.write_str(name)
    }
}

/// Install the global subscriber
pub fn init(level: LogLevel) -> Result<(), String> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level.as_tracing())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set tracing subscriber: {}", e))
}
