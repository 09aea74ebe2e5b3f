//! Console logger for the simulator
//!
//! Implements the [`log`] facade, writing each record to stderr with the
//! wall time since the logger was installed:
//!
//! ```text
//! INFO [1s 204ms] cubebot_core::auton::sequencer - Phase 1 'Lift' done, entering 'Drive'
//! ```

use std::io::Write;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use humantime::{format_duration, FormattedDuration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Logger writing to stderr
pub struct SimLogger {
    started: Instant,
}

impl log::Log for SimLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format!(
                "{} [{}] {} - {}\n",
                record.level(),
                self.uptime(),
                record.target(),
                record.args()
            );
            let _ = std::io::stderr().lock().write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

impl SimLogger {
    /// Time since start, truncated to milliseconds
    fn uptime(&self) -> FormattedDuration {
        let elapsed = self.started.elapsed();
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        format_duration(Duration::from_millis(millis))
    }
}

static LOGGER: OnceLock<SimLogger> = OnceLock::new();

/// Install the simulator logger
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| SimLogger {
        started: Instant::now(),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_drops_sub_millisecond_part() {
        let logger = SimLogger {
            started: Instant::now(),
        };
        let shown = logger.uptime().to_string();
        assert!(!shown.contains("us"));
        assert!(!shown.contains("ns"));
    }
}
