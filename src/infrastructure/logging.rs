//! Logging system configuration and initialization
//!
//! - Console output with local timestamps
//! - Optional log file written through a non-blocking appender
//! - Optional JSON formatting for the file
//! - `RUST_LOG` overrides the configured level

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use tracing::info;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub use crate::infrastructure::config::LoggingConfig;

// Keeps the file writer alive for the whole process
static LOG_GUARDS: Lazy<Mutex<Vec<WorkerGuard>>> = Lazy::new(|| Mutex::new(Vec::new()));

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Timestamps in the machine's local time zone
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %:z"))
    }
}

/// Log directory: the configured one, else `logs/` next to the executable
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }

    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
        .join("logs")
}

/// Filter from `RUST_LOG`, else the configured level with quieter HTTP internals
pub fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", level, e))?;

    if !level.to_lowercase().contains("trace") {
        for directive in ["reqwest=info", "hyper=warn", "hyper_util=warn", "h2=warn", "html5ever=warn", "selectors=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    Ok(filter)
}

fn console_layer() -> BoxedLayer {
    fmt::Layer::new()
        .with_writer(std::io::stdout)
        .with_timer(LocalTimeFormatter)
        .with_target(false)
        .boxed()
}

fn file_layer(writer: NonBlocking, json: bool) -> BoxedLayer {
    if json {
        fmt::Layer::new()
            .json()
            .with_writer(writer)
            .with_timer(LocalTimeFormatter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .boxed()
    } else {
        fmt::Layer::new()
            .with_writer(writer)
            .with_timer(LocalTimeFormatter)
            .with_target(false)
            .with_ansi(false)
            .boxed()
    }
}

/// Move a log file left by a previous run aside, suffixed with its mtime
fn rotate_previous_log(log_dir: &Path, file_name: &str) -> Result<()> {
    let current = log_dir.join(file_name);
    if !current.exists() {
        return Ok(());
    }

    let modified: chrono::DateTime<Local> = std::fs::metadata(&current)
        .and_then(|meta| meta.modified())
        .map(Into::into)
        .unwrap_or_else(|_| Local::now());

    let stem = file_name.trim_end_matches(".log");
    let rotated = log_dir.join(format!("{}.{}.log", stem, modified.format("%Y%m%dT%H%M%S")));
    std::fs::rename(&current, &rotated).map_err(|e| {
        anyhow!(
            "Failed to rotate log file {} to {}: {}",
            current.display(),
            rotated.display(),
            e
        )
    })
}

/// Install the global subscriber described by `config`
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(&config.level)?;
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut log_file = None;

    if config.console_output {
        layers.push(console_layer());
    }

    if config.file_output {
        let log_dir = get_log_directory(config);
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;
        rotate_previous_log(&log_dir, &config.file_name)?;

        let (writer, guard) = non_blocking(rolling::never(&log_dir, &config.file_name));
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard store poisoned"))?
            .push(guard);

        layers.push(file_layer(writer, config.json_format));
        log_file = Some(log_dir.join(&config.file_name));
    }

    if layers.is_empty() {
        return Err(anyhow!("No logging output configured"));
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    info!("Logging initialized at level {}", config.level);
    if let Some(path) = log_file {
        info!("Log file: {:?} (json: {})", path, config.json_format);
    }

    Ok(())
}

/// Log system information for diagnostics
pub fn log_system_info(output: &Path) {
    info!("=== Court Catalog ===");
    info!("Application version: {}", env!("CARGO_PKG_VERSION"));
    info!("Operating system: {} ({})", std::env::consts::OS, std::env::consts::ARCH);
    if let Ok(current_dir) = std::env::current_dir() {
        info!("Working directory: {:?}", current_dir);
    }
    info!("Output file: {:?}", output);
    info!("=====================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_log_directory_wins() {
        let config = LoggingConfig {
            log_dir: Some(PathBuf::from("/tmp/court-logs")),
            ..Default::default()
        };
        assert_eq!(get_log_directory(&config), PathBuf::from("/tmp/court-logs"));
    }

    #[test]
    fn test_default_log_directory_is_logs() {
        let log_dir = get_log_directory(&LoggingConfig::default());
        assert!(log_dir.ends_with("logs"));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(build_env_filter("info").is_ok());
        assert!(build_env_filter("court_catalog=loud").is_err());
    }

    #[test]
    fn test_rotate_previous_log_moves_file_aside() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("court-catalog.log"), "old run\n").unwrap();

        rotate_previous_log(dir.path(), "court-catalog.log").unwrap();

        assert!(!dir.path().join("court-catalog.log").exists());
        let rotated: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(rotated.len(), 1);
    }

    #[test]
    fn test_rotate_without_previous_log_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(rotate_previous_log(dir.path(), "court-catalog.log").is_ok());
    }
}
