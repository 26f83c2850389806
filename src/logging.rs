use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_dirs::AppDirs;

/// Environment variable holding the `EnvFilter` directives
pub const LOG_ENV: &str = "GAPFILL_LOG";

/// Install the global subscriber, appending to the state-dir log file.
///
/// The TUI owns stdout, so nothing is ever written to the terminal. Returns
/// the log path, or `None` when no file could be opened or a subscriber was
/// already installed.
pub fn init() -> Option<PathBuf> {
    let path = AppDirs::log_path()?;
    init_at(&path).then_some(path)
}

pub fn init_at(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .is_ok()
}
