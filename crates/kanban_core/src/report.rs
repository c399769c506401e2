use crate::model::{Priority, Status, Task, TaskKind};
use serde::Serialize;

pub const RECENT_ACTIVITY_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket<K> {
    pub key: K,
    pub count: usize,
    pub percentage: u32,
}

/// Derived statistics over every task, board and backlog alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_tasks: usize,
    pub board_tasks: usize,
    pub backlog_items: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Board columns only; percentages are of `board_tasks`.
    pub status: Vec<Bucket<Status>>,
    pub priority: Vec<Bucket<Priority>>,
    pub kinds: Vec<Bucket<TaskKind>>,
    pub recent: Vec<Task>,
}

impl Report {
    pub fn build<'a, I>(tasks: I, recent_limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let tasks: Vec<&Task> = tasks.into_iter().collect();
        let total_tasks = tasks.len();
        let backlog_items = tasks.iter().filter(|task| task.in_backlog()).count();
        let board_tasks = total_tasks - backlog_items;

        let status: Vec<Bucket<Status>> = Status::BOARD_COLUMNS
            .iter()
            .map(|&key| {
                let count = tasks.iter().filter(|task| task.status == key).count();
                Bucket {
                    key,
                    count,
                    percentage: calculate_percentage(count, board_tasks),
                }
            })
            .collect();

        let priority = Priority::REPORT_ORDER
            .iter()
            .map(|&key| {
                let count = tasks.iter().filter(|task| task.priority == key).count();
                Bucket {
                    key,
                    count,
                    percentage: calculate_percentage(count, total_tasks),
                }
            })
            .collect();

        let kinds = TaskKind::ALL
            .iter()
            .map(|&key| {
                let count = tasks.iter().filter(|task| task.kind == key).count();
                Bucket {
                    key,
                    count,
                    percentage: calculate_percentage(count, total_tasks),
                }
            })
            .collect();

        let owned: Vec<Task> = tasks.iter().map(|task| (*task).clone()).collect();
        let mut recent = sort_tasks_by_date(&owned, DateField::Updated, SortOrder::Descending);
        recent.truncate(recent_limit);

        let count_of = |wanted: Status| {
            status
                .iter()
                .find(|bucket| bucket.key == wanted)
                .map_or(0, |bucket| bucket.count)
        };

        Self {
            total_tasks,
            board_tasks,
            backlog_items,
            completed: count_of(Status::Done),
            in_progress: count_of(Status::Progress),
            status,
            priority,
            kinds,
            recent,
        }
    }
}

/// Share of `value` in `total` as a whole percent, rounded half up.
pub fn calculate_percentage(value: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((value as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Stable sort on a timestamp field; ties keep their input order.
pub fn sort_tasks_by_date(tasks: &[Task], field: DateField, order: SortOrder) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        let (left, right) = match field {
            DateField::Created => (a.created, b.created),
            DateField::Updated => (a.updated, b.updated),
        };
        match order {
            SortOrder::Ascending => left.cmp(&right),
            SortOrder::Descending => right.cmp(&left),
        }
    });
    sorted
}
