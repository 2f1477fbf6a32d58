//! Command-line client for a remote task-board API.
//!
//! Drives the task-list controller against the configured API endpoint.
//!
//! ```bash
//! taskdeck list
//! taskdeck add --title "Buy milk" --due 2026-09-01 --keyword 2
//! taskdeck toggle 10
//! taskdeck keywords
//! ```

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::list::{self, TaskList};
use taskdeck::store::RemoteTaskStore;
use taskdeck_model::keyword::KeywordId;
use taskdeck_model::task::{DueStatus, Task, TaskId};

#[derive(Parser, Debug)]
#[command(version, about = "Command-line client for a remote task-board API")]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all tasks with their due-date status.
    List,
    /// List the available keywords.
    Keywords,
    /// Create a new task.
    Add {
        /// Task title.
        #[arg(long)]
        title: String,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Keyword id to attach (repeatable).
        #[arg(long = "keyword")]
        keywords: Vec<u64>,
    },
    /// Toggle a task's completion status.
    Toggle {
        /// Id of the task to toggle.
        id: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::load(&cli.args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = match RemoteTaskStore::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut tasks = TaskList::new(store);

    match cli.command {
        Command::List => {
            tasks.load().await;
            if let Some(code) = failure(&tasks) {
                return code;
            }
            if tasks.tasks().is_empty() {
                println!("No tasks.");
            }
            for task in tasks.tasks() {
                println!("{}", render_task(task, &config.date_format));
            }
            ExitCode::SUCCESS
        }
        Command::Keywords => {
            // An empty keyword set and a failed fetch must not look alike.
            if let Err(e) = tasks.load_keywords().await {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
            if tasks.available_keywords().is_empty() {
                println!("No keywords.");
            }
            for keyword in tasks.available_keywords() {
                println!("#{} {}", keyword.id, keyword.name);
            }
            ExitCode::SUCCESS
        }
        Command::Add {
            title,
            due,
            keywords,
        } => {
            let draft = tasks.draft_mut();
            draft.title = title;
            draft.limit_date = due;
            draft.keyword_ids = keywords.into_iter().map(KeywordId::new).collect();

            tasks.create().await;
            if !tasks.validation_errors().is_empty() {
                for (field, messages) in tasks.validation_errors() {
                    for message in messages {
                        eprintln!("{field}: {message}");
                    }
                }
                return ExitCode::FAILURE;
            }
            if let Some(code) = failure(&tasks) {
                return code;
            }
            if let Some(created) = tasks.tasks().first() {
                println!("Created {}", render_task(created, &config.date_format));
            }
            ExitCode::SUCCESS
        }
        Command::Toggle { id } => {
            // The controller toggles against its cache, so refresh first.
            tasks.load().await;
            if let Some(code) = failure(&tasks) {
                return code;
            }
            let id = TaskId::new(id);
            if !tasks.tasks().iter().any(|t| t.id == id) {
                eprintln!("error: no task with id {id}");
                return ExitCode::FAILURE;
            }

            tasks.toggle(id).await;
            if let Some(code) = failure(&tasks) {
                return code;
            }
            if let Some(task) = tasks.tasks().iter().find(|t| t.id == id) {
                println!("{}", render_task(task, &config.date_format));
            }
            ExitCode::SUCCESS
        }
    }
}

/// Reports the controller's error banner, if set, as a CLI failure.
fn failure<S: taskdeck::store::TaskStore>(tasks: &TaskList<S>) -> Option<ExitCode> {
    tasks.error().map(|message| {
        eprintln!("error: {message}");
        ExitCode::FAILURE
    })
}

/// One-line rendering of a task with its due-date indicator.
fn render_task(task: &Task, date_format: &str) -> String {
    let marker = if task.is_done { "[x]" } else { "[ ]" };
    let label = due_label(task, date_format);
    if label.is_empty() {
        format!("{marker} #{} {}", task.id, task.title)
    } else {
        format!("{marker} #{} {} ({label})", task.id, task.title)
    }
}

/// Human-readable due-date indicator, empty for tasks without a limit date.
fn due_label(task: &Task, date_format: &str) -> String {
    let Some(limit) = task.limit_date else {
        return String::new();
    };
    match list::due_status_today(task) {
        Some(DueStatus::Completed) => "done".to_string(),
        Some(DueStatus::Overdue) => format!("OVERDUE, was {}", limit.format(date_format)),
        Some(DueStatus::DueToday) => "due today".to_string(),
        Some(DueStatus::Upcoming) => format!("due {}", limit.format(date_format)),
        None => String::new(),
    }
}
