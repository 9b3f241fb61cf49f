//! Logging setup for adb-mirror
//!
//! Library code only emits `tracing` events. Applications pick how they are
//! rendered with [`init_logging`], or leave logging off entirely.

use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Overrides the log level (error, warn, info, debug, trace)
pub const LOG_LEVEL_ENV: &str = "ADB_MIRROR_LOG_LEVEL";
/// Restricts output to one target, e.g. `adb_shell`
pub const LOG_TARGET_ENV: &str = "ADB_MIRROR_LOG_TARGET";
/// Selects the mode for [`init_logging_from_env`]
pub const LOG_MODE_ENV: &str = "ADB_MIRROR_LOG_MODE";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose output with thread ids and source locations
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid environment variable: {0}")]
    InvalidEnv(String),
}

/// Initialize logging with the specified mode.
///
/// # Environment Variables
///
/// - `ADB_MIRROR_LOG_LEVEL`: override the level
/// - `ADB_MIRROR_LOG_TARGET`: only show events from this target
/// - `RUST_LOG`: used when neither of the above is set
///
/// ```rust,no_run
/// use adb_mirror::logging::{init_logging, LoggingMode};
///
/// init_logging(LoggingMode::Development)?;
/// # Ok::<(), adb_mirror::logging::LoggingError>(())
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => install(mode, create_env_filter("info")?),
        LoggingMode::Debug => install(mode, create_env_filter("debug")?),
    }
}

/// Initialize logging at an explicit level, such as one picked on a command
/// line. `ADB_MIRROR_LOG_TARGET` still narrows output to one target; the level
/// variables and `RUST_LOG` are not consulted.
pub fn init_logging_at_level(mode: LoggingMode, level: &str) -> Result<(), LoggingError> {
    if mode == LoggingMode::Silent {
        return Ok(());
    }
    let target = std::env::var(LOG_TARGET_ENV).ok();
    let directive = filter_directive(Some(level), target.as_deref(), level)?;
    install(mode, EnvFilter::new(directive))
}

fn install(mode: LoggingMode, filter: EnvFilter) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => Registry::default()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .with(filter)
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
        LoggingMode::Debug => Registry::default()
            .with(
                fmt::layer()
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
    }
}

/// Check that `level` names a log level
pub fn validate_level(level: &str) -> Result<(), LoggingError> {
    filter_directive(Some(level), None, level).map(|_| ())
}

/// Initialize logging with the mode named by `ADB_MIRROR_LOG_MODE`
/// (`silent`, `development`, `debug`). Defaults to silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var(LOG_MODE_ENV).as_deref() {
        Ok("development") => LoggingMode::Development,
        Ok("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    };

    init_logging(mode)
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

/// Equivalent to `init_logging(LoggingMode::Silent)`
pub fn init_silent() -> Result<(), LoggingError> {
    init_logging(LoggingMode::Silent)
}

fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    let level = std::env::var(LOG_LEVEL_ENV).ok();
    let target = std::env::var(LOG_TARGET_ENV).ok();

    if level.is_none() && target.is_none() {
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            return Ok(EnvFilter::new(rust_log));
        }
    }

    let directive = filter_directive(level.as_deref(), target.as_deref(), default_level)?;
    Ok(EnvFilter::new(directive))
}

/// Build a filter directive from an optional level and target override
pub fn filter_directive(
    level: Option<&str>,
    target: Option<&str>,
    default_level: &str,
) -> Result<String, LoggingError> {
    let level = match level {
        Some(level) => {
            let level = level.trim().to_lowercase();
            if !LEVELS.contains(&level.as_str()) {
                return Err(LoggingError::InvalidEnv(format!(
                    "{}={} (expected one of {})",
                    LOG_LEVEL_ENV,
                    level,
                    LEVELS.join(", ")
                )));
            }
            level
        }
        None => default_level.to_string(),
    };

    Ok(match target.map(str::trim).filter(|t| !t.is_empty()) {
        Some(target) => format!("{}={}", target, level),
        None => level,
    })
}
