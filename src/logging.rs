use std::env;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";
const DEFAULT_LOG_FILE: &str = "./logs/cpf-scan.log";

/// Logging setup read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    /// Any EnvFilter directive, e.g. "cpf_scan=debug".
    filter: String,
    /// `None` when `LOG_FILE_PATH` is set but empty.
    log_file: Option<PathBuf>,
}

impl LogSettings {
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup("TRACING_LEVEL")
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let log_file = match lookup("LOG_FILE_PATH") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };
        Self { filter, log_file }
    }
}

/// Directory and file name for the appender. A bare file name lands in the
/// working directory.
fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("cpf-scan.log"));
    (dir, file)
}

/// Install the global subscriber. Console output goes to stderr so scan
/// results on stdout stay clean. Keep the returned guard alive until exit or
/// buffered file lines are lost.
pub fn init_logger() -> Option<WorkerGuard> {
    let settings = LogSettings::from_env();

    let (file_layer, guard) = match &settings.log_file {
        Some(path) => {
            let (dir, file) = split_log_path(path);
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .pretty()
        .with_file(false)
        .without_time();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(EnvFilter::new(&settings.filter))
        .init();

    match &settings.log_file {
        Some(path) => info!("Logging to stderr and {}", path.display()),
        None => info!("Logging to stderr only"),
    }

    guard
}
