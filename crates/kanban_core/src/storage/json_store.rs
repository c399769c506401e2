use crate::error::AppError;
use crate::model::{BoardState, Task};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "board.json";
const STORE_ENV_VAR: &str = "KANBAN_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredBoard {
    schema_version: u32,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    backlog: Vec<Task>,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    super::resolve_path(STORE_ENV_VAR, STORE_FILE_NAME)
}

pub fn load_state(path: &Path) -> Result<BoardState, AppError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BoardState::default()),
        Err(err) => return Err(AppError::io(format!("{}: {}", path.display(), err))),
    };
    let stored: StoredBoard =
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))?;

    if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    let state = BoardState {
        tasks: stored.tasks,
        backlog: stored.backlog,
    };
    state.validate()?;

    Ok(state)
}

pub fn save_state(path: &Path, state: &BoardState) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let stored = StoredBoard {
        schema_version: SCHEMA_VERSION,
        tasks: state.tasks.clone(),
        backlog: state.backlog.clone(),
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    tracing::debug!(path = %path.display(), tasks = state.len(), "saved board");
    Ok(())
}
