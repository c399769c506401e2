use crate::error::AppError;
use crate::model::{Priority, Status, Task, TaskDraft, TaskKind};

/// Raw task form input. Titles are validated here and nowhere else.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub kind: Option<String>,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
}

impl TaskForm {
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: task.description.clone(),
            status: Some(task.status.as_str().to_string()),
            priority: Some(task.priority.as_str().to_string()),
            kind: Some(task.kind.as_str().to_string()),
            assignee: task.assignee.clone(),
            reporter: task.reporter.clone(),
        }
    }

    /// Fields set in `edits` replace the ones in `self`.
    pub fn overlay(self, edits: TaskForm) -> Self {
        Self {
            title: edits.title.or(self.title),
            description: edits.description.or(self.description),
            status: edits.status.or(self.status),
            priority: edits.priority.or(self.priority),
            kind: edits.kind.or(self.kind),
            assignee: edits.assignee.or(self.assignee),
            reporter: edits.reporter.or(self.reporter),
        }
    }

    pub fn submit(&self) -> Result<TaskDraft, AppError> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or_else(|| AppError::invalid_input("title is required"))?;

        let status = match non_blank(&self.status) {
            Some(raw) => raw.parse::<Status>()?,
            None => Status::Todo,
        };
        let priority = match non_blank(&self.priority) {
            Some(raw) => raw.parse::<Priority>()?,
            None => Priority::Medium,
        };
        let kind = match non_blank(&self.kind) {
            Some(raw) => raw.parse::<TaskKind>()?,
            None => TaskKind::Task,
        };

        Ok(TaskDraft {
            title: title.to_string(),
            description: non_blank(&self.description).map(str::to_string),
            status,
            priority,
            kind,
            assignee: non_blank(&self.assignee).map(str::to_string),
            reporter: non_blank(&self.reporter).map(str::to_string),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
