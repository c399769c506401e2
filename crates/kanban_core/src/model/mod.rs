mod board;
mod notification;
mod task;

pub use board::BoardState;
pub use notification::{Notification, NotificationKind};
pub use task::{Priority, Status, Task, TaskDraft, TaskKind};
