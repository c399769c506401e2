//! Plain-text views: board, backlog, reports, task detail and notifications.

use kanban_core::config::Palette;
use kanban_core::model::{Notification, Status, Task, TaskKind};
use kanban_core::report::{Bucket, Report};
use std::fmt::Display;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::OffsetDateTime;
use time::macros::format_description;

pub fn kind_glyph(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Story => "[S]",
        TaskKind::Bug => "[B]",
        TaskKind::Task => "[T]",
        TaskKind::Feature => "[F]",
    }
}

pub fn format_date(value: OffsetDateTime) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    value
        .format(&format)
        .unwrap_or_else(|_| value.date().to_string())
}

pub fn toast_line(notification: &Notification) -> String {
    format!("[{}] {}", notification.kind.label(), notification.message)
}

/// One table column per board status, cards stacked beneath.
pub fn board(columns: &[(Status, Vec<&Task>)], palette: &Palette) -> String {
    let mut out = palette.heading("Board");
    out.push('\n');

    if columns.iter().all(|(_, tasks)| tasks.is_empty()) {
        out.push_str("No tasks on the board.");
        return out;
    }

    let mut builder = Builder::default();
    builder.push_record(
        columns
            .iter()
            .map(|(status, tasks)| format!("{} ({})", status.title(), tasks.len())),
    );

    let depth = columns.iter().map(|(_, tasks)| tasks.len()).max().unwrap_or(0);
    for row in 0..depth {
        builder.push_record(columns.iter().map(|(_, tasks)| {
            tasks
                .get(row)
                .map(|task| card(task))
                .unwrap_or_default()
        }));
    }

    let mut table = builder.build();
    table.with(Style::modern());
    out.push_str(&table.to_string());
    out
}

fn card(task: &Task) -> String {
    format!(
        "{} {}\n#{} {}",
        kind_glyph(task.kind),
        task.title,
        task.id,
        task.priority
    )
}

#[derive(Tabled)]
struct BacklogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Reporter")]
    reporter: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

/// Expects `tasks` already in display order.
pub fn backlog(tasks: &[Task], palette: &Palette) -> String {
    let mut out = palette.heading("Product Backlog");
    out.push('\n');
    out.push_str(&palette.muted(&format!("Total items: {}", tasks.len())));
    out.push('\n');

    if tasks.is_empty() {
        out.push_str("No backlog items found.");
        return out;
    }

    let rows = tasks.iter().map(|task| BacklogRow {
        id: task.id.clone(),
        kind: kind_glyph(task.kind),
        title: task.title.clone(),
        priority: task.priority.as_str().to_uppercase(),
        assignee: task.assignee.clone().unwrap_or_else(|| "Unassigned".into()),
        reporter: task.reporter.clone().unwrap_or_else(|| "Unknown".into()),
        updated: format_date(task.updated),
    });
    let mut table = Table::new(rows);
    table.with(Style::modern());
    out.push_str(&table.to_string());
    out
}

pub fn report(report: &Report, palette: &Palette) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "{}\nTotal Tasks: {} | Board Tasks: {} | Backlog: {}",
        palette.heading("Project Reports"),
        report.total_tasks,
        report.board_tasks,
        report.backlog_items
    ));

    let mut summary = Builder::default();
    summary.push_record(["Total Tasks", "Completed", "In Progress", "Backlog Items"].map(String::from));
    summary.push_record([
        report.total_tasks.to_string(),
        report.completed.to_string(),
        report.in_progress.to_string(),
        report.backlog_items.to_string(),
    ]);
    let mut summary = summary.build();
    summary.with(Style::modern());
    sections.push(summary.to_string());

    sections.push(distribution(
        &palette.heading("Status Distribution"),
        &report.status,
        |status| status.title().to_string(),
    ));
    sections.push(distribution(
        &palette.heading("Priority Distribution"),
        &report.priority,
        |priority| format!("{} Priority", capitalize(priority.as_str())),
    ));
    sections.push(distribution(
        &palette.heading("Task Types Distribution"),
        &report.kinds,
        |kind| format!("{} {}", kind_glyph(*kind), capitalize(kind.as_str())),
    ));

    let mut recent = palette.heading("Recent Activity");
    recent.push('\n');
    if report.recent.is_empty() {
        recent.push_str("No recent activity found.");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Type", "Title", "Priority", "Updated"].map(String::from));
        for task in &report.recent {
            builder.push_record([
                kind_glyph(task.kind).to_string(),
                task.title.clone(),
                task.priority.to_string(),
                format_date(task.updated),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern());
        recent.push_str(&table.to_string());
    }
    sections.push(recent);

    sections.join("\n\n")
}

fn distribution<K, F>(heading: &str, buckets: &[Bucket<K>], label: F) -> String
where
    F: Fn(&K) -> String,
{
    let mut builder = Builder::default();
    for bucket in buckets {
        builder.push_record([
            label(&bucket.key),
            bucket.count.to_string(),
            format!("({}%)", bucket.percentage),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::blank());
    format!("{heading}\n{table}")
}

pub fn task_detail(task: &Task) -> String {
    let mut lines = vec![
        format!("{} {} ({})", kind_glyph(task.kind), task.title, task.id),
        field("Status", task.status.title()),
        field("Priority", task.priority),
        field("Type", task.kind),
        field("Assignee", task.assignee.as_deref().unwrap_or("Unassigned")),
        field("Reporter", task.reporter.as_deref().unwrap_or("Unknown")),
        field("Created", format_date(task.created)),
        field("Updated", format_date(task.updated)),
    ];
    if let Some(description) = task.description.as_deref() {
        lines.push(String::new());
        lines.push(description.to_string());
    }
    lines.join("\n")
}

fn field<V: Display>(name: &str, value: V) -> String {
    format!("{name:<9} {value}")
}

pub fn notifications<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a Notification>,
{
    let lines: Vec<String> = entries
        .into_iter()
        .map(|entry| format!("#{} {}", entry.id, toast_line(entry)))
        .collect();

    if lines.is_empty() {
        "No notifications".to_string()
    } else {
        lines.join("\n")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
