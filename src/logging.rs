use std::{
    fs::{self, DirEntry},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use anyhow::{Context, Result, anyhow};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{self, RollingFileAppender},
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

use crate::config::{LoggingConfig, LoggingRotation};

const LOG_FILE_PREFIX: &str = "regime-lens.log";
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Keeps the background log writer alive. Dropping it flushes pending lines.
pub struct LoggingGuard {
    _worker_guard: WorkerGuard,
    process_id: String,
}

impl LoggingGuard {
    /// Identifier stamped on every process start, for correlating log files.
    pub fn process_id(&self) -> &str {
        &self.process_id
    }
}

/// Installs the global subscriber: JSON lines to a rolling file plus, when
/// enabled, warnings and errors on stderr.
pub fn init_tracing(logging_config: &LoggingConfig) -> Result<LoggingGuard> {
    if logging_config.dir.as_os_str().is_empty() {
        return Err(anyhow!("logging.dir cannot be empty"));
    }
    let env_filter = build_env_filter(&logging_config.filter)?;

    let log_dir = absolute_log_dir(&logging_config.dir)?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create logging directory {}", log_dir.display()))?;

    let sweep_warnings = sweep_expired_logs(
        &log_dir,
        LOG_FILE_PREFIX,
        logging_config.retention_days,
        SystemTime::now(),
    );
    let (file_writer, worker_guard) =
        tracing_appender::non_blocking(rolling_appender(&log_dir, &logging_config.rotation));

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(env_filter);

    let stderr_layer = logging_config.stderr_warn_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    let process_id = Uuid::now_v7().to_string();
    tracing::info!(
        target: "logging",
        process_id = %process_id,
        dir = %log_dir.display(),
        filter = %logging_config.filter,
        rotation = ?logging_config.rotation,
        retention_days = logging_config.retention_days,
        "logging_initialized"
    );
    for warning in sweep_warnings {
        tracing::warn!(target: "logging", warning = %warning, "log_sweep_warning");
    }

    Ok(LoggingGuard {
        _worker_guard: worker_guard,
        process_id,
    })
}

fn build_env_filter(filter: &str) -> Result<EnvFilter> {
    if filter.trim().is_empty() {
        return Err(anyhow!("logging.filter cannot be empty"));
    }
    EnvFilter::try_new(filter).with_context(|| format!("invalid logging.filter '{filter}'"))
}

fn rolling_appender(log_dir: &Path, rotation: &LoggingRotation) -> RollingFileAppender {
    match rotation {
        LoggingRotation::Daily => rolling::daily(log_dir, LOG_FILE_PREFIX),
        LoggingRotation::Hourly => rolling::hourly(log_dir, LOG_FILE_PREFIX),
    }
}

fn absolute_log_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve relative logging.dir")?;
    Ok(cwd.join(dir))
}

/// Removes rotated files carrying `prefix` whose mtime is older than the
/// retention window. Failures are collected, never fatal.
fn sweep_expired_logs(
    log_dir: &Path,
    prefix: &str,
    retention_days: usize,
    now: SystemTime,
) -> Vec<String> {
    let window = Duration::from_secs((retention_days as u64).saturating_mul(SECONDS_PER_DAY));
    let cutoff = now.checked_sub(window).unwrap_or(SystemTime::UNIX_EPOCH);

    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(err) => return vec![format!("cannot scan {}: {err}", log_dir.display())],
    };

    let mut warnings = Vec::new();
    for entry in entries {
        let expired = entry
            .map_err(|err| format!("cannot read directory entry: {err}"))
            .and_then(|entry| expired_path(&entry, prefix, cutoff));
        match expired {
            Ok(Some(path)) => {
                if let Err(err) = fs::remove_file(&path) {
                    warnings.push(format!("cannot remove {}: {err}", path.display()));
                }
            }
            Ok(None) => {}
            Err(warning) => warnings.push(warning),
        }
    }
    warnings
}

fn expired_path(
    entry: &DirEntry,
    prefix: &str,
    cutoff: SystemTime,
) -> Result<Option<PathBuf>, String> {
    if !entry.file_name().to_string_lossy().starts_with(prefix) {
        return Ok(None);
    }

    let path = entry.path();
    let metadata = entry
        .metadata()
        .map_err(|err| format!("cannot stat {}: {err}", path.display()))?;
    if !metadata.is_file() {
        return Ok(None);
    }
    let modified = metadata
        .modified()
        .map_err(|err| format!("cannot read mtime of {}: {err}", path.display()))?;

    Ok((modified <= cutoff).then_some(path))
}
