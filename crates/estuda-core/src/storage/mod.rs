mod config;
mod store;

pub use config::{Notifications, Settings};
pub use store::{
    Store, GOALS_KEY, SETTINGS_KEY, SIMULADOS_KEY, SUBJECTS_KEY, THEME_KEY, TIMER_ENGINE_KEY,
};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns the data directory, creating it if needed.
///
/// `ESTUDA_DATA_DIR` overrides the location entirely (used by tests);
/// otherwise this is `~/.config/estuda`, or `~/.config/estuda-dev` when
/// `ESTUDA_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("ESTUDA_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ESTUDA_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("estuda-dev")
            } else {
                base_dir.join("estuda")
            }
        }
    };
    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    Ok(dir)
}
