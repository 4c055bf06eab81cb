//! Log output for the front end
//!
//! Plain `[LEVEL] message` lines on stderr: no timestamps, no targets, no
//! colors. The lexer emits `debug!` per run and `trace!` per token; the
//! parser emits `debug!` per run and `trace!` per FSM transition.
//!
//! ```rust
//! use pyplus::util::logger::{self, LogLevel};
//!
//! logger::init_with_level(LogLevel::Debug);
//! let _ = pyplus::parse_source("x = 1\n");
//! ```

use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// Environment variable read by [`init`]
pub const LOG_ENV: &str = "PYPLUS_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Install the subscriber at the level named by `PYPLUS_LOG` (INFO when unset
/// or unrecognized)
pub fn init() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_default();
    init_with_level(level);
}

/// 安装全局订阅者；已安装时静默忽略
pub fn init_with_level(level: LogLevel) {
    let _ = try_init_with_level(level);
}

/// Install the subscriber, failing if another global subscriber exists
pub fn try_init_with_level(level: LogLevel) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = tracing_subscriber::filter::LevelFilter::from_level(level.into());
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).try_init()
}

/// Log every token and FSM transition
pub fn init_trace() {
    init_with_level(LogLevel::Trace);
}
