use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub reporter: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated: OffsetDateTime,
}

impl Task {
    pub fn from_draft(id: String, draft: TaskDraft, now: OffsetDateTime) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            kind: draft.kind,
            assignee: draft.assignee,
            reporter: draft.reporter,
            created: now,
            updated: now,
        }
    }

    /// Replaces every editable field, keeping identity and creation time.
    pub fn apply_draft(&mut self, draft: TaskDraft, now: OffsetDateTime) {
        self.title = draft.title;
        self.description = draft.description;
        self.status = draft.status;
        self.priority = draft.priority;
        self.kind = draft.kind;
        self.assignee = draft.assignee;
        self.reporter = draft.reporter;
        self.updated = now;
    }

    pub fn in_backlog(&self) -> bool {
        self.status.is_backlog()
    }
}

/// Validated contents of the task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub kind: TaskKind,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
}

impl TaskDraft {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: Status::Todo,
            priority: Priority::Medium,
            kind: TaskKind::Task,
            assignee: None,
            reporter: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            kind: task.kind,
            assignee: task.assignee.clone(),
            reporter: task.reporter.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    Progress,
    Review,
    Done,
    Backlog,
}

impl Status {
    /// Board columns, left to right.
    pub const BOARD_COLUMNS: [Status; 4] =
        [Status::Todo, Status::Progress, Status::Review, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Progress => "progress",
            Self::Review => "review",
            Self::Done => "done",
            Self::Backlog => "backlog",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::Progress => "In Progress",
            Self::Review => "In Review",
            Self::Done => "Done",
            Self::Backlog => "Backlog",
        }
    }

    pub fn is_backlog(self) -> bool {
        matches!(self, Self::Backlog)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match canonical_key(raw).as_str() {
            "todo" | "to_do" => Ok(Self::Todo),
            "progress" | "in_progress" => Ok(Self::Progress),
            "review" | "in_review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            "backlog" => Ok(Self::Backlog),
            _ => Err(AppError::invalid_input(format!(
                "unknown status '{}'",
                raw.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Order used by the priority distribution report.
    pub const REPORT_ORDER: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match canonical_key(raw).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(AppError::invalid_input(format!(
                "unknown priority '{}'",
                raw.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Story,
    Bug,
    Task,
    Feature,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Story,
        TaskKind::Bug,
        TaskKind::Task,
        TaskKind::Feature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Story => "story",
            Self::Bug => "bug",
            Self::Task => "task",
            Self::Feature => "feature",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match canonical_key(raw).as_str() {
            "story" => Ok(Self::Story),
            "bug" => Ok(Self::Bug),
            "task" => Ok(Self::Task),
            "feature" => Ok(Self::Feature),
            _ => Err(AppError::invalid_input(format!(
                "unknown type '{}'",
                raw.trim()
            ))),
        }
    }
}

fn canonical_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Priority, Status, Task, TaskDraft, TaskKind};
    use time::macros::datetime;

    #[test]
    fn status_parses_keys_and_aliases() {
        assert_eq!("todo".parse::<Status>().unwrap(), Status::Todo);
        assert_eq!("To-Do".parse::<Status>().unwrap(), Status::Todo);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::Progress);
        assert_eq!(" Review ".parse::<Status>().unwrap(), Status::Review);
        assert_eq!("BACKLOG".parse::<Status>().unwrap(), Status::Backlog);
    }

    #[test]
    fn unknown_enum_values_are_invalid_input() {
        assert_eq!("later".parse::<Status>().unwrap_err().code(), "invalid_input");
        assert_eq!("urgent".parse::<Priority>().unwrap_err().code(), "invalid_input");
        assert_eq!("epic".parse::<TaskKind>().unwrap_err().code(), "invalid_input");
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let task = Task::from_draft(
            "task-1".to_string(),
            TaskDraft::new("demo").with_kind(TaskKind::Bug),
            datetime!(2024-01-15 0:00 UTC),
        );

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "bug");
        assert_eq!(value["status"], "todo");
        assert_eq!(value["priority"], "medium");
        assert_eq!(value["created"], "2024-01-15T00:00:00Z");
    }

    #[test]
    fn apply_draft_keeps_identity_and_created() {
        let created = datetime!(2024-01-15 0:00 UTC);
        let later = datetime!(2024-02-01 12:00 UTC);
        let mut task = Task::from_draft("task-1".to_string(), TaskDraft::new("old"), created);

        task.apply_draft(
            TaskDraft::new("new")
                .with_status(Status::Review)
                .with_priority(Priority::High),
            later,
        );

        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "new");
        assert_eq!(task.status, Status::Review);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.created, created);
        assert_eq!(task.updated, later);
    }
}
