//! File-based logging for the hotspot CLI.
//!
//! Each run writes to `~/.hotspot/logs/{timestamp}_{uuid}/log` and echoes to
//! stderr.

use anyhow::{Context, Result};
use chrono::Local;
use dirs::home_dir;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use uuid::Uuid;

/// Environment variable holding the default log level.
pub const LOG_ENV: &str = "HOTSPOT_LOG";

pub struct HotspotLogger {
    level: LevelFilter,
    file: Mutex<File>,
    run_id: String,
    log_path: PathBuf,
}

impl HotspotLogger {
    /// Create the log directory and file for a new run.
    pub fn new(level: LevelFilter) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let uuid_string = Uuid::new_v4().to_string();
        let uuid = uuid_string.split('-').next().unwrap_or("unknown");
        let run_id = format!("{timestamp}_{uuid}");

        let log_dir = Self::log_dir(&run_id)?;
        create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            level,
            file: Mutex::new(file),
            run_id,
            log_path,
        })
    }

    /// Directory holding the logs of one run.
    pub fn log_dir(run_id: &str) -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".hotspot").join("logs").join(run_id))
    }

    /// Install the logger globally.
    pub fn init(level: LevelFilter) -> Result<()> {
        let logger = Self::new(level)?;
        let run_id = logger.run_id.clone();
        let log_path = logger.log_path.clone();

        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level))
            .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))?;

        log::debug!("run {} logging to {}", run_id, log_path.display());
        Ok(())
    }
}

/// Pick the level: explicit flag first, then the environment, then `default`.
pub fn resolve_level(flag: Option<&str>, env: Option<&str>, default: LevelFilter) -> Result<LevelFilter> {
    match flag.or(env) {
        Some(name) => LevelFilter::from_str(name)
            .map_err(|_| anyhow::anyhow!("Unknown log level: {}", name)),
        None => Ok(default),
    }
}

impl Log for HotspotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let message = format!(
            "{} {} [{}] {}",
            timestamp,
            record.level(),
            record.target(),
            record.args()
        );

        if let Ok(mut file) = self.file.lock() {
            // A failed log write must not take the command down with it
            let _ = writeln!(file, "{}", message);
            let _ = file.flush();
        }
        eprintln!("{}", message);
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        let level = resolve_level(Some("debug"), Some("error"), LevelFilter::Warn).unwrap();
        assert_eq!(level, LevelFilter::Debug);
    }

    #[test]
    fn environment_beats_default() {
        let level = resolve_level(None, Some("TRACE"), LevelFilter::Warn).unwrap();
        assert_eq!(level, LevelFilter::Trace);
        assert_eq!(resolve_level(None, None, LevelFilter::Warn).unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn unknown_level_is_an_error() {
        assert!(resolve_level(Some("loud"), None, LevelFilter::Warn).is_err());
    }
}
