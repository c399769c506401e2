use clap::{Args, Parser, Subcommand};
use kanban_core::config::{ConfigOverrides, Theme};
use kanban_core::form::TaskForm;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "kanban", author, version, about = "Task board with backlog and reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the board columns
    ///
    /// Example: kanban board
    Board,
    /// Show backlog items, most recently updated first
    ///
    /// Example: kanban backlog
    Backlog,
    /// Show project statistics
    ///
    /// Example: kanban reports
    Reports,
    /// Show details of a task
    ///
    /// Example: kanban show 1
    Show { id: String },
    /// Create a task
    ///
    /// Example: kanban create "Fix login" --type bug --priority high
    /// Example: kanban create "Dark mode" --status backlog
    Create {
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Edit a task; unset flags keep their current value
    ///
    /// Example: kanban edit b1 --status progress
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task
    ///
    /// Example: kanban delete 1
    Delete { id: String },
    /// Move a board task to another column or to the backlog
    ///
    /// Example: kanban move 1 review
    /// Example: kanban move 1 backlog
    Move { id: String, status: String },
    /// Inspect or dismiss notifications
    ///
    /// Example: kanban notifications
    /// Example: kanban notifications dismiss 2
    Notifications {
        #[command(subcommand)]
        action: Option<NotificationsCommand>,
    },
    /// Replace the board with the demo data set
    ///
    /// Example: kanban seed
    Seed,
}

#[derive(Args, Debug, Default, Clone)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    /// todo, progress, review, done or backlog
    #[arg(long)]
    pub status: Option<String>,
    /// low, medium or high
    #[arg(long)]
    pub priority: Option<String>,
    /// story, bug, task or feature
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long)]
    pub reporter: Option<String>,
}

impl TaskFields {
    pub fn into_form(self, title: Option<String>) -> TaskForm {
        TaskForm {
            title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            kind: self.kind,
            assignee: self.assignee,
            reporter: self.reporter,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    /// List every pending notification
    List,
    /// Show the notifications currently displayed as toasts
    Toasts,
    /// Dismiss one notification
    Dismiss { id: u64 },
    /// Dismiss all notifications
    Clear,
}

/// One `--config-override KEY=VALUE` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverride {
    Theme(Theme),
    Alias { name: String, expansion: String },
    RecentLimit(usize),
}

impl FromStr for ConfigOverride {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;
        let value = value.trim();
        let (field, subfield) = match key.split_once('.') {
            Some((field, rest)) => (field, Some(rest.trim())),
            None => (key, None),
        };

        let field = field.trim().to_ascii_lowercase().replace('-', "_");
        match (field.as_str(), subfield) {
            ("", _) => Err("override key cannot be empty".to_string()),
            ("theme" | "recent_limit", Some(_)) => {
                Err(format!("{field} override cannot have subfields"))
            }
            ("theme", None) => Ok(ConfigOverride::Theme(Theme::from_name(value))),
            ("recent_limit", None) => value
                .parse()
                .map(ConfigOverride::RecentLimit)
                .map_err(|_| format!("recent_limit must be a number, got '{value}'")),
            ("alias" | "aliases", Some(name)) if !name.is_empty() => Ok(ConfigOverride::Alias {
                name: name.to_string(),
                expansion: value.to_string(),
            }),
            ("alias" | "aliases", _) => Err("aliases override requires an alias name".to_string()),
            (other, _) => Err(format!("unknown config field '{other}'")),
        }
    }
}

pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        match entry.parse::<ConfigOverride>()? {
            ConfigOverride::Theme(theme) => overrides.theme = Some(theme),
            ConfigOverride::Alias { name, expansion } => {
                overrides.aliases.insert(name, expansion);
            }
            ConfigOverride::RecentLimit(limit) => overrides.recent_limit = Some(limit),
        }
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ConfigOverride, TaskFields, collect_overrides};
    use clap::Parser;
    use kanban_core::config::Theme;

    #[test]
    fn override_keys_ignore_case_and_dashes() {
        assert_eq!(
            " THEME = Midnight ".parse::<ConfigOverride>(),
            Ok(ConfigOverride::Theme(Theme::Plain))
        );
        assert_eq!(
            "Recent-Limit=4".parse::<ConfigOverride>(),
            Ok(ConfigOverride::RecentLimit(4))
        );
    }

    #[test]
    fn alias_override_needs_a_name() {
        let err = "aliases. = foo".parse::<ConfigOverride>().unwrap_err();
        assert!(err.contains("aliases override requires an alias name"));
    }

    #[test]
    fn unknown_override_field_is_rejected() {
        let err = "unknown.field=value".parse::<ConfigOverride>().unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn override_without_equals_is_rejected() {
        let err = "aliasesls".parse::<ConfigOverride>().unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn scalar_overrides_reject_subfields() {
        let err = "recent_limit.x=3".parse::<ConfigOverride>().unwrap_err();
        assert!(err.contains("cannot have subfields"));
    }

    #[test]
    fn collect_overrides_builds_config_overrides() {
        let overrides = collect_overrides(&[
            "theme=noir".to_string(),
            "aliases. b = board".to_string(),
            "recent_limit=2".to_string(),
        ])
        .unwrap();

        assert_eq!(overrides.theme, Some(Theme::Noir));
        assert_eq!(overrides.aliases.get("b").map(String::as_str), Some("board"));
        assert_eq!(overrides.recent_limit, Some(2));
    }

    #[test]
    fn collect_overrides_rejects_non_numeric_limit() {
        let err = collect_overrides(&["recent_limit=lots".to_string()]).unwrap_err();
        assert!(err.contains("recent_limit must be a number"));
    }

    #[test]
    fn create_accepts_type_flag() {
        let cli = Cli::try_parse_from([
            "kanban", "create", "Fix login", "--type", "bug", "--status", "backlog",
        ])
        .unwrap();

        match cli.command {
            Command::Create { title, fields } => {
                assert_eq!(title.as_deref(), Some("Fix login"));
                assert_eq!(fields.kind.as_deref(), Some("bug"));
                assert_eq!(fields.status.as_deref(), Some("backlog"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn notifications_defaults_to_no_action() {
        let cli = Cli::try_parse_from(["kanban", "notifications"]).unwrap();

        assert!(matches!(cli.command, Command::Notifications { action: None }));
    }

    #[test]
    fn task_fields_fill_form() {
        let fields = TaskFields {
            priority: Some("high".into()),
            ..TaskFields::default()
        };

        let form = fields.into_form(Some("demo".into()));
        assert_eq!(form.title.as_deref(), Some("demo"));
        assert_eq!(form.priority.as_deref(), Some("high"));
        assert_eq!(form.status, None);
    }
}
