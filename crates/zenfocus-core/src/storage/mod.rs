mod config;
pub mod profile_store;

pub use config::{Config, ProfileConfig, TimerConfig};
pub use profile_store::{JsonFileStore, MemoryStore, ProfileStore, PROFILE_FILE};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/zenfocus[-dev]/` based on ZENFOCUS_ENV.
///
/// Set ZENFOCUS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ZENFOCUS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("zenfocus-dev")
    } else {
        base_dir.join("zenfocus")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
