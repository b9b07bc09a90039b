//! Telemetry module for logging and relay statistics.
//!
//! Provides:
//! - Logging configuration and initialization (stderr or syslog)
//! - Counters for relayed and suppressed frames

mod logging;
mod metrics;
mod syslog;

pub use logging::{init_logging, LogConfig};
pub use metrics::{Counter, DirectionStats, RelayStats};
pub use syslog::SyslogWriter;
