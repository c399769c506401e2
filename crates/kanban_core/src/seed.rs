use crate::model::{BoardState, Priority, Status, Task, TaskKind};
use time::OffsetDateTime;
use time::macros::datetime;

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    title: &str,
    description: &str,
    status: Status,
    priority: Priority,
    kind: TaskKind,
    people: (&str, &str),
    created: OffsetDateTime,
    updated: OffsetDateTime,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        status,
        priority,
        kind,
        assignee: Some(people.0.to_string()),
        reporter: Some(people.1.to_string()),
        created,
        updated,
    }
}

/// Five board tasks and three backlog items to explore the views with.
pub fn demo_board() -> BoardState {
    let tasks = vec![
        task(
            "1",
            "Implement user authentication",
            "Add login and registration functionality with JWT tokens and session management",
            Status::Todo,
            Priority::High,
            TaskKind::Story,
            ("John Doe", "Jane Smith"),
            datetime!(2024-01-15 0:00 UTC),
            datetime!(2024-01-19 0:00 UTC),
        ),
        task(
            "2",
            "Fix navigation bug",
            "Navigation menu not working properly on mobile devices and tablets",
            Status::Progress,
            Priority::High,
            TaskKind::Bug,
            ("Alice Johnson", "Bob Wilson"),
            datetime!(2024-01-14 0:00 UTC),
            datetime!(2024-01-18 0:00 UTC),
        ),
        task(
            "3",
            "Update API documentation",
            "Update API documentation with new endpoints, examples, and response formats",
            Status::Review,
            Priority::Medium,
            TaskKind::Task,
            ("Charlie Brown", "John Doe"),
            datetime!(2024-01-13 0:00 UTC),
            datetime!(2024-01-17 0:00 UTC),
        ),
        task(
            "4",
            "Design new homepage",
            "Create modern and responsive homepage design with better UX",
            Status::Done,
            Priority::Low,
            TaskKind::Story,
            ("Diana Prince", "Jane Smith"),
            datetime!(2024-01-12 0:00 UTC),
            datetime!(2024-01-16 0:00 UTC),
        ),
        task(
            "5",
            "Performance optimization",
            "Optimize application loading speed and reduce bundle size for better performance",
            Status::Todo,
            Priority::Medium,
            TaskKind::Task,
            ("Eve Adams", "Tech Lead"),
            datetime!(2024-01-11 0:00 UTC),
            datetime!(2024-01-15 0:00 UTC),
        ),
    ];

    let backlog = vec![
        task(
            "b1",
            "Implement dark mode",
            "Add dark theme support across the entire application with user preferences",
            Status::Backlog,
            Priority::Medium,
            TaskKind::Story,
            ("Mike Wilson", "Sarah Connor"),
            datetime!(2024-01-10 0:00 UTC),
            datetime!(2024-01-10 0:00 UTC),
        ),
        task(
            "b2",
            "Add email notifications",
            "Send email notifications for important task updates and deadlines",
            Status::Backlog,
            Priority::Low,
            TaskKind::Feature,
            ("Lisa Chen", "Product Manager"),
            datetime!(2024-01-09 0:00 UTC),
            datetime!(2024-01-09 0:00 UTC),
        ),
        task(
            "b3",
            "Database migration",
            "Migrate from MySQL to PostgreSQL for better performance and scalability",
            Status::Backlog,
            Priority::High,
            TaskKind::Task,
            ("Database Admin", "CTO"),
            datetime!(2024-01-08 0:00 UTC),
            datetime!(2024-01-08 0:00 UTC),
        ),
    ];

    BoardState { tasks, backlog }
}
