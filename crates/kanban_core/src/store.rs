//! The task store: active board tasks, backlog tasks and the notifications
//! their mutations raise.
//!
//! A task's collection is always derived from its status. Any status change
//! that crosses the board/backlog boundary removes the task from one list and
//! appends it to the other. Lookups that miss are not errors: they are logged
//! and the operation returns `None`.

use crate::clock::{Clock, SystemClock};
use crate::model::{BoardState, NotificationKind, Status, Task, TaskDraft};
use crate::notify::NotificationQueue;
use crate::report::Report;
use time::OffsetDateTime;

pub struct TaskStore<C: Clock = SystemClock> {
    active: Vec<Task>,
    backlog: Vec<Task>,
    notifications: NotificationQueue,
    clock: C,
}

impl TaskStore<SystemClock> {
    pub fn new(state: BoardState) -> Self {
        Self::with_clock(state, SystemClock)
    }
}

impl<C: Clock> TaskStore<C> {
    pub fn with_clock(state: BoardState, clock: C) -> Self {
        Self {
            active: state.tasks,
            backlog: state.backlog,
            notifications: NotificationQueue::new(),
            clock,
        }
    }

    pub fn active(&self) -> &[Task] {
        &self.active
    }

    pub fn backlog(&self) -> &[Task] {
        &self.backlog
    }

    pub fn all_tasks(&self) -> impl Iterator<Item = &Task> {
        self.active.iter().chain(self.backlog.iter())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.all_tasks().find(|task| task.id == id)
    }

    pub fn column(&self, status: Status) -> Vec<&Task> {
        self.active
            .iter()
            .filter(|task| task.status == status)
            .collect()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    pub fn expire_notifications(&mut self) -> usize {
        let now = self.clock.now();
        self.notifications.expire(now).len()
    }

    pub fn report(&self, recent_limit: usize) -> Report {
        Report::build(self.all_tasks(), recent_limit)
    }

    /// Swaps in a new board; the notification queue and its id sequence carry on.
    pub fn replace_state(&mut self, state: BoardState) {
        tracing::debug!(tasks = state.len(), "replacing board");
        self.active = state.tasks;
        self.backlog = state.backlog;
    }

    pub fn snapshot(&self) -> BoardState {
        BoardState {
            tasks: self.active.clone(),
            backlog: self.backlog.clone(),
        }
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> Task {
        let now = self.clock.now();
        let id = self.next_id(now);
        let task = Task::from_draft(id, draft, now);
        tracing::debug!(id = %task.id, status = %task.status, "creating task");

        if task.in_backlog() {
            self.backlog.push(task.clone());
            self.notify("New backlog item created!", NotificationKind::Success, now);
        } else {
            self.active.push(task.clone());
            self.notify("New task created!", NotificationKind::Success, now);
        }

        task
    }

    pub fn update_task(&mut self, id: &str, draft: TaskDraft) -> Option<Task> {
        let Some(mut task) = self.take(id) else {
            tracing::warn!(id, "update skipped, task not found");
            return None;
        };

        let now = self.clock.now();
        let old_status = task.status;
        task.apply_draft(draft, now);
        let new_status = task.status;
        tracing::debug!(id, from = %old_status, to = %new_status, "updating task");

        if new_status.is_backlog() {
            self.backlog.push(task.clone());
            self.notify("Task moved to backlog!", NotificationKind::Info, now);
        } else {
            self.active.push(task.clone());
            if old_status.is_backlog() {
                self.notify(
                    format!("Task moved from backlog to {new_status}!"),
                    NotificationKind::Info,
                    now,
                );
            } else {
                self.notify("Task updated successfully!", NotificationKind::Success, now);
            }
        }

        Some(task)
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        let Some(removed) = self.take(id) else {
            tracing::warn!(id, "delete skipped, task not found");
            return None;
        };

        tracing::debug!(id, "deleted task");
        let message = if removed.in_backlog() {
            format!("Backlog item \"{}\" deleted!", removed.title)
        } else {
            format!("Task \"{}\" deleted!", removed.title)
        };
        let now = self.clock.now();
        self.notify(message, NotificationKind::Success, now);

        Some(removed)
    }

    /// Drag-and-drop transition. Only board tasks are candidates; a backlog
    /// task must go through `update_task` to come back onto the board.
    pub fn move_task(&mut self, id: &str, new_status: Status, from_status: Status) -> Option<Task> {
        let Some(index) = self.active.iter().position(|task| task.id == id) else {
            tracing::warn!(id, to = %new_status, "move skipped, task not on the board");
            return None;
        };

        let now = self.clock.now();
        tracing::debug!(id, from = %from_status, to = %new_status, "moving task");

        if new_status.is_backlog() {
            let mut task = self.active.remove(index);
            task.status = Status::Backlog;
            task.updated = now;
            self.backlog.push(task.clone());
            self.notify("Task moved to backlog!", NotificationKind::Info, now);
            return Some(task);
        }

        let task = &mut self.active[index];
        task.status = new_status;
        task.updated = now;
        let moved = task.clone();
        self.notify(
            format!("Task moved from {from_status} to {new_status}!"),
            NotificationKind::Info,
            now,
        );

        Some(moved)
    }

    fn take(&mut self, id: &str) -> Option<Task> {
        if let Some(index) = self.active.iter().position(|task| task.id == id) {
            return Some(self.active.remove(index));
        }
        let index = self.backlog.iter().position(|task| task.id == id)?;
        Some(self.backlog.remove(index))
    }

    fn notify<M: Into<String>>(&mut self, message: M, kind: NotificationKind, now: OffsetDateTime) {
        self.notifications.push(message, kind, now);
    }

    fn next_id(&self, now: OffsetDateTime) -> String {
        let base = format!("task-{}", now.unix_timestamp_nanos());
        if self.get(&base).is_none() {
            return base;
        }

        let mut suffix = 1u32;
        loop {
            let candidate = format!("{base}-{suffix}");
            if self.get(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }
}
