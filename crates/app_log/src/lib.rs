//! PixShelf logging
//!
//! Rolling JSON log files under the platform data directory, plus a panic
//! hook that leaves a crash report next to them.

mod panic_hook;
mod logging;

pub use panic_hook::init_panic_hook;
pub use logging::{init_logging, cleanup_old_logs, cleanup_logs_in};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Where log files and crash reports go
pub fn log_dir() -> PathBuf {
    match ProjectDirs::from("com", "PixShelf", "PixShelf") {
        Some(dirs) => dirs.data_dir().join("logs"),
        None => PathBuf::from("./logs"),
    }
}

/// Install the subscriber and the panic hook; call once at startup
pub fn init() -> anyhow::Result<()> {
    init_logging()?;
    init_panic_hook();
    tracing::debug!("Logging to {}", log_dir().display());
    Ok(())
}
