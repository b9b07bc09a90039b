//! Logging configuration and initialization.
//!
//! Provides logging setup with support for:
//! - Environment variable (RUST_LOG) configuration
//! - config file / command line level and format
//! - Output to stderr (pretty, compact, json) or to syslog

use super::syslog::SyslogWriter;
use crate::config::LoggingConfig;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,
    /// Output format: pretty, compact, json
    pub format: String,
    /// Send lines to syslog instead of stderr
    pub syslog: bool,
}

impl LogConfig {
    /// Creates a new LogConfig with default values.
    pub fn new() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            syslog: false,
        }
    }

    /// Derive the logging setup from the `[logging]` section.
    pub fn from_config(config: &LoggingConfig) -> Self {
        Self {
            level: if config.debug { "debug" } else { "info" }.to_string(),
            format: config.format.clone(),
            syslog: config.syslog,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes the logging system.
///
/// Priority:
/// 1. RUST_LOG environment variable (if set)
/// 2. config parameter (if provided)
/// 3. Default: info level, pretty format, stderr
///
/// Later calls are ignored once a subscriber is installed.
pub fn init_logging(config: Option<&LogConfig>) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if let Some(cfg) = config {
        let level = parse_level(&cfg.level);
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::new("info")
    };

    if config.is_some_and(|c| c.syslog) {
        // syslogd stamps and tags lines itself
        let subscriber = tracing_subscriber::registry().with(env_filter).with(
            tracing_subscriber::fmt::layer()
                .with_writer(SyslogWriter::open())
                .with_ansi(false)
                .without_time()
                .with_level(false)
                .compact(),
        );
        let _ = tracing::subscriber::set_global_default(subscriber);
        return;
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("pretty");

    match format {
        "json" => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json());
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        "compact" => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact());
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        _ => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer());
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
    }
}

/// Parses a log level string into a Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("INFO"), Level::INFO);
        assert_eq!(parse_level("unknown"), Level::INFO);
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::new();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "pretty");
        assert!(!config.syslog);
    }

    #[test]
    fn test_log_config_default_matches_new() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "pretty");
        assert!(!config.syslog);
    }

    #[test]
    fn test_log_config_from_logging_section() {
        let section = LoggingConfig {
            syslog: true,
            debug: true,
            debug_packets: false,
            format: "compact".to_string(),
        };
        let config = LogConfig::from_config(&section);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "compact");
        assert!(config.syslog);
    }
}
