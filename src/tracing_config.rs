use std::{env, error::Error, io, path::Path};

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{Builder, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_VAR: &str = "DEVCONSOLE_LOG_FORMAT";

const DAYS_TO_KEEP: usize = 7;

/// Output format of the terminal log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Reads the format from [`LOG_FORMAT_VAR`]. Anything but `json` is pretty.
    pub fn from_env() -> Self {
        match env::var(LOG_FORMAT_VAR).as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for the console
///
/// Logs go to stderr so they never interleave with command output on stdout.
/// Uses RUST_LOG if set, otherwise "info". The format follows
/// `DEVCONSOLE_LOG_FORMAT`.
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init() -> Result<(), Box<dyn Error>> {
    let registry = tracing_subscriber::registry().with(env_filter());

    match LogFormat::from_env() {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize tracing with an additional daily log file in `log_dir`
///
/// Files are named `devconsole.<date>.log` and the last seven are kept.
/// The returned guard flushes the file writer when dropped, so hold it for
/// the life of the program.
///
/// # Errors
/// Returns error if the log directory cannot be used or a global subscriber
/// is already installed
pub fn init_with_file(log_dir: &Path) -> Result<WorkerGuard, Box<dyn Error>> {
    let file_appender = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("devconsole")
        .filename_suffix("log")
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter());

    match LogFormat::from_env() {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
    }

    Ok(guard)
}
