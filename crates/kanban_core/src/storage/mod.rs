pub mod json_store;

use crate::error::AppError;
use crate::store::TaskStore;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "kanban";

/// `$env_var` when set and non-blank, otherwise `<user config dir>/kanban/<file_name>`.
pub fn resolve_path(env_var: &str, file_name: &str) -> Result<PathBuf, AppError> {
    if let Some(path) = std::env::var_os(env_var)
        && !path.to_string_lossy().trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let base = if cfg!(windows) {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .ok_or_else(|| AppError::invalid_data("APPDATA is not set"))?
    } else {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .ok_or_else(|| AppError::invalid_data("HOME is not set"))?
    };

    Ok(base.join(APP_DIR).join(file_name))
}

pub fn open_store(path: &Path) -> Result<TaskStore, AppError> {
    let state = json_store::load_state(path)?;
    tracing::debug!(path = %path.display(), tasks = state.len(), "opened board");
    Ok(TaskStore::new(state))
}

pub fn persist_store(path: &Path, store: &TaskStore) -> Result<(), AppError> {
    json_store::save_state(path, &store.snapshot())
}
