use clap::{CommandFactory, Parser};
use kanban_cli::cli::{Cli, Command, NotificationsCommand, collect_overrides};
use kanban_cli::render;
use kanban_core::config::{self, Config};
use kanban_core::error::AppError;
use kanban_core::form::TaskForm;
use kanban_core::model::{Notification, Status, Task};
use kanban_core::report::{DateField, SortOrder, sort_tasks_by_date};
use kanban_core::seed;
use kanban_core::storage::{self, json_store};
use kanban_core::store::TaskStore;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const LOG_ENV_VAR: &str = "KANBAN_LOG";

struct Session {
    store: TaskStore,
    store_path: PathBuf,
    config: Config,
}

impl Session {
    fn open() -> Result<Self, AppError> {
        let store_path = json_store::store_path()?;
        let store = storage::open_store(&store_path)?;
        let config = config::load_config_with_fallback().config;
        Ok(Self {
            store,
            store_path,
            config,
        })
    }

    fn persist(&self) -> Result<(), AppError> {
        storage::persist_store(&self.store_path, &self.store)
    }
}

fn print_mutation(json: bool, verb: &str, task: Option<&Task>, raised: &[Notification]) {
    if json {
        let payload = serde_json::json!({
            "task": task,
            "notifications": raised,
        });
        println!("{}", payload);
        return;
    }

    for notification in raised {
        println!("{}", render::toast_line(notification));
    }
    if let Some(task) = task {
        println!("{} task: {} ({})", verb, task.title, task.id);
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered =
        serde_json::to_string(value).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            quoted = true;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() || quoted {
                args.push(std::mem::take(&mut current));
                quoted = false;
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() || quoted {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn find_task(store: &TaskStore, id: &str) -> Result<Task, AppError> {
    store
        .get(id.trim())
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("task {} not found", id.trim())))
}

fn run_command(cli: Cli, session: &mut Session) -> Result<(), AppError> {
    let overrides = collect_overrides(&cli.config_override).map_err(AppError::invalid_input)?;
    let config = session.config.with_overrides(&overrides);
    let palette = config.palette();
    let mark = session.store.notifications().last_id();

    match cli.command {
        Command::Board => {
            let columns: Vec<(Status, Vec<&Task>)> = Status::BOARD_COLUMNS
                .iter()
                .map(|status| (*status, session.store.column(*status)))
                .collect();
            if cli.json {
                let payload: Vec<_> = columns
                    .iter()
                    .map(|(status, tasks)| {
                        serde_json::json!({
                            "status": status,
                            "title": status.title(),
                            "tasks": tasks,
                        })
                    })
                    .collect();
                print_json(&payload)?;
            } else {
                println!("{}", render::board(&columns, &palette));
            }
        }
        Command::Backlog => {
            let sorted = sort_tasks_by_date(
                session.store.backlog(),
                DateField::Updated,
                SortOrder::Descending,
            );
            if cli.json {
                print_json(&sorted)?;
            } else {
                println!("{}", render::backlog(&sorted, &palette));
            }
        }
        Command::Reports => {
            let report = session.store.report(config.recent_limit());
            if cli.json {
                print_json(&report)?;
            } else {
                println!("{}", render::report(&report, &palette));
            }
        }
        Command::Show { id } => {
            let task = find_task(&session.store, &id)?;
            if cli.json {
                print_json(&task)?;
            } else {
                println!("{}", render::task_detail(&task));
            }
        }
        Command::Create { title, fields } => {
            let draft = fields.into_form(title).submit()?;
            let task = session.store.create_task(draft);
            session.persist()?;
            let raised: Vec<_> = session.store.notifications().since(mark).cloned().collect();
            print_mutation(cli.json, "Created", Some(&task), &raised);
        }
        Command::Edit { id, title, fields } => {
            let current = find_task(&session.store, &id)?;
            let draft = TaskForm::for_task(&current)
                .overlay(fields.into_form(title))
                .submit()?;
            let updated = session.store.update_task(&current.id, draft);
            session.persist()?;
            let raised: Vec<_> = session.store.notifications().since(mark).cloned().collect();
            print_mutation(cli.json, "Updated", updated.as_ref(), &raised);
        }
        Command::Delete { id } => {
            let removed = session.store.delete_task(id.trim());
            if removed.is_some() {
                session.persist()?;
            }
            let raised: Vec<_> = session.store.notifications().since(mark).cloned().collect();
            print_mutation(cli.json, "Deleted", removed.as_ref(), &raised);
        }
        Command::Move { id, status } => {
            let id = id.trim();
            let new_status: Status = status.parse()?;
            let from_status = session.store.get(id).map(|task| task.status);
            // A drop onto the column the card came from is not a move.
            let moved = match from_status {
                Some(from) if from == new_status => None,
                Some(from) => session.store.move_task(id, new_status, from),
                None => {
                    tracing::warn!(id, "move skipped, no such task");
                    None
                }
            };
            if moved.is_some() {
                session.persist()?;
            }
            let raised: Vec<_> = session.store.notifications().since(mark).cloned().collect();
            print_mutation(cli.json, "Moved", moved.as_ref(), &raised);
        }
        Command::Notifications { action } => {
            session.store.expire_notifications();
            match action.unwrap_or(NotificationsCommand::List) {
                NotificationsCommand::List => {
                    let entries: Vec<_> = session.store.notifications().iter().collect();
                    if cli.json {
                        print_json(&entries)?;
                    } else {
                        println!("{}", render::notifications(entries));
                    }
                }
                NotificationsCommand::Toasts => {
                    let toasts = session.store.notifications().toasts();
                    if cli.json {
                        print_json(&toasts)?;
                    } else {
                        println!("{}", render::notifications(toasts));
                    }
                }
                NotificationsCommand::Dismiss { id } => {
                    let dismissed = session
                        .store
                        .notifications_mut()
                        .remove(id)
                        .ok_or_else(|| AppError::not_found(format!("notification {id} not found")))?;
                    if cli.json {
                        print_json(&dismissed)?;
                    } else {
                        println!("Dismissed notification #{}", dismissed.id);
                    }
                }
                NotificationsCommand::Clear => {
                    let count = session.store.notifications().len();
                    session.store.notifications_mut().clear();
                    if cli.json {
                        print_json(&serde_json::json!({ "cleared": count }))?;
                    } else {
                        println!("Cleared {count} notifications");
                    }
                }
            }
        }
        Command::Seed => {
            let state = seed::demo_board();
            let (board, backlog) = (state.tasks.len(), state.backlog.len());
            session.store.replace_state(state);
            session.persist()?;
            if cli.json {
                print_json(&serde_json::json!({ "tasks": board, "backlog": backlog }))?;
            } else {
                println!("Seeded demo board: {board} board tasks, {backlog} backlog items");
            }
        }
    }

    Ok(())
}

fn parse_args(args: Vec<String>, config: &Config) -> Result<Option<Cli>, AppError> {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push("kanban".to_string());
    argv.extend(config.expand_alias(args));

    match Cli::try_parse_from(argv) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) if !err.use_stderr() => {
            // --help and --version land here.
            let _ = err.print();
            Ok(None)
        }
        Err(err) => Err(normalize_parse_error(err)),
    }
}

fn run_interactive(session: &mut Session) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        session.store.expire_notifications();
        let cli = match parse_args(args, &session.config) {
            Ok(Some(cli)) => cli,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if let Err(err) = run_command(cli, session) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut session = Session::open()?;

    if args.is_empty() {
        return run_interactive(&mut session);
    }

    match parse_args(args, &session.config)? {
        Some(cli) => run_command(cli, &mut session),
        None => Ok(()),
    }
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
