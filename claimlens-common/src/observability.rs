//! Shared observability helpers for binaries and integration tests.
//!
//! The logging initializer centralises our `tracing` setup so that every
//! binary emits into the same rolling file sink. Call [`init_logging`] once
//! near process start; additional callers are no-ops and simply receive the
//! resolved log file path.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for defaults and file names).
    pub app_name: &'static str,
    /// Optional explicit directory for log output. If `None`, we consult
    /// `CLAIMLENS_LOG_DIR` and finally fall back to `~/.local/share/<app_name>`.
    pub log_dir: Option<PathBuf>,
    /// Whether to duplicate events to `stderr` in addition to the file sink.
    pub emit_stderr: bool,
    /// Preferred log encoding.
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "claimlens",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info",
        }
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Returns the concrete log file path for the current day. Subsequent calls
/// are cheap and hand back the originally resolved location.
pub fn init_logging(config: LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let log_dir = resolve_log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory: {}", log_dir.display()))?;

    let log_filename = format!("{}.log", config.app_name);
    let today = Local::now().format("%Y-%m-%d").to_string();
    let full_path = log_dir.join(format!("{log_filename}.{today}"));

    let appender = rolling::daily(log_dir, log_filename);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    match config.format {
        LogFormat::Text => {
            layers.push(fmt::layer().with_writer(writer).with_ansi(false).boxed());
            if config.emit_stderr {
                layers.push(fmt::layer().with_writer(std::io::stderr).boxed());
            }
        }
        LogFormat::Json => {
            layers.push(fmt::layer().json().with_writer(writer).boxed());
            if config.emit_stderr {
                layers.push(fmt::layer().json().with_writer(std::io::stderr).boxed());
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return expand_home(dir);
    }

    if let Ok(env_dir) = std::env::var("CLAIMLENS_LOG_DIR") {
        return expand_home(Path::new(&env_dir));
    }

    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(app_name)
    } else {
        PathBuf::from(".").join(app_name)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}
