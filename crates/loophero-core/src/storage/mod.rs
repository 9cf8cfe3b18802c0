mod settings;

pub use settings::{
    validate_swipe_threshold, FileSettingsStore, MemorySettingsStore, Settings, SettingsStore,
    DEFAULT_SWIPE_THRESHOLD, MAX_SWIPE_THRESHOLD, MIN_SWIPE_THRESHOLD,
};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the LoopHero data directory.
///
/// `LOOPHERO_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/loophero[-dev]/` based on `LOOPHERO_ENV`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("LOOPHERO_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("LOOPHERO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("loophero-dev")
            } else {
                base_dir.join("loophero")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Optional custom alert messages file inside the data directory.
pub fn messages_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("messages.toml"))
}
