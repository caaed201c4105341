mod config;
pub mod database;
pub mod store;

pub use config::{ApiSettings, AppConfig};
pub use database::Database;
pub use store::{keys, KvBackend, MemoryBackend, PersistenceStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/studymentor[-dev]/` based on STUDYMENTOR_ENV.
///
/// Set STUDYMENTOR_ENV=dev to use the development data directory, or
/// STUDYMENTOR_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STUDYMENTOR_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("STUDYMENTOR_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("studymentor-dev")
            } else {
                base_dir.join("studymentor")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
