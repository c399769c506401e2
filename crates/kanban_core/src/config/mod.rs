use crate::error::AppError;
use crate::report::RECENT_ACTIVITY_LIMIT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "KANBAN_CONFIG_PATH";
const RESET: &str = "\x1b[0m";

/// ANSI codes for view headings and secondary text. `None` prints plain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    heading: Option<&'static str>,
    muted: Option<&'static str>,
}

impl Palette {
    pub fn heading(&self, text: &str) -> String {
        paint(self.heading, text)
    }

    pub fn muted(&self, text: &str) -> String {
        paint(self.muted, text)
    }
}

fn paint(code: Option<&str>, text: &str) -> String {
    match code {
        Some(code) => format!("{code}{text}{RESET}"),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Plain,
    Noir,
    Solarized,
}

impl Theme {
    /// Lenient lookup: case, spaces and dashes are ignored; unknown names
    /// fall back to the plain theme.
    pub fn from_name(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|ch| ch.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "noir" | "dark" | "darkmode" => Theme::Noir,
            "solarized" => Theme::Solarized,
            _ => Theme::Plain,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Plain => "default",
            Theme::Noir => "noir",
            Theme::Solarized => "solarized",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Plain => Palette::default(),
            Theme::Noir => Palette {
                heading: Some("\x1b[38;5;208m"),
                muted: Some("\x1b[38;5;250m"),
            },
            Theme::Solarized => Palette {
                heading: Some("\x1b[38;5;108m"),
                muted: Some("\x1b[38;5;250m"),
            },
        }
    }
}

impl From<String> for Theme {
    fn from(raw: String) -> Self {
        Theme::from_name(&raw)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.name().to_string()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    #[serde(default)]
    pub recent_limit: Option<usize>,
}

impl Config {
    pub fn recent_limit(&self) -> usize {
        self.recent_limit.unwrap_or(RECENT_ACTIVITY_LIMIT)
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Replaces a leading alias with its expansion; the rest of the
    /// arguments follow unchanged.
    pub fn expand_alias(&self, args: Vec<String>) -> Vec<String> {
        let Some(expansion) = args.first().and_then(|head| self.aliases.get(head)) else {
            return args;
        };

        expansion
            .split_whitespace()
            .map(str::to_string)
            .chain(args.into_iter().skip(1))
            .collect()
    }

    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Config {
        let mut merged = self.clone();
        if let Some(theme) = overrides.theme {
            merged.theme = theme;
        }
        merged.aliases.extend(
            overrides
                .aliases
                .iter()
                .map(|(name, expansion)| (name.clone(), expansion.clone())),
        );
        if let Some(limit) = overrides.recent_limit {
            merged.recent_limit = Some(limit);
        }
        merged
    }
}

/// A loaded config plus the error that forced defaults, if any.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<Theme>,
    pub aliases: HashMap<String, String>,
    pub recent_limit: Option<usize>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    crate::storage::resolve_path(CONFIG_ENV_VAR, CONFIG_FILE_NAME)
}

pub fn load_config_with_fallback() -> ConfigLoad {
    fallback(config_path().and_then(|path| read_config(&path)))
}

fn fallback(loaded: Result<Config, AppError>) -> ConfigLoad {
    match loaded {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, "using default config");
            ConfigLoad {
                config: Config::default(),
                error: Some(err),
            }
        }
    }
}

/// A missing file is not an error; it yields the defaults.
fn read_config(path: &Path) -> Result<Config, AppError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => return Err(AppError::io(format!("{}: {}", path.display(), err))),
    };

    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}
