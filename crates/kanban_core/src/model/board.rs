use crate::error::AppError;
use crate::model::Task;
use std::collections::HashSet;

/// The two task collections a store is seeded from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    pub backlog: Vec<Task>,
}

impl BoardState {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(task) = self.tasks.iter().find(|task| task.in_backlog()) {
            return Err(AppError::invalid_data(format!(
                "board task {} has backlog status",
                task.id
            )));
        }

        if let Some(task) = self.backlog.iter().find(|task| !task.in_backlog()) {
            return Err(AppError::invalid_data(format!(
                "backlog task {} has status {}",
                task.id, task.status
            )));
        }

        let mut seen = HashSet::new();
        for task in self.tasks.iter().chain(self.backlog.iter()) {
            if !seen.insert(task.id.as_str()) {
                return Err(AppError::invalid_data(format!(
                    "duplicate task id {}",
                    task.id
                )));
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len() + self.backlog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.backlog.is_empty()
    }
}
