//! Headless command surface over the same store the TUI uses.

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use clap::{Args, Subcommand};
use serde_json::{Value, json};
use tracing::error;
use uuid::Uuid;

use crate::boards;
use crate::store::Store;
use crate::tasks;
use crate::types::{Status, Task, TaskDraft};

const SCHEMA_VERSION: &str = "cli.v1";

#[derive(Debug, Clone, Subcommand)]
pub enum RootCommand {
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    Board {
        #[command(subcommand)]
        command: BoardCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TaskCommand {
    List(TaskListArgs),
    Create(TaskCreateArgs),
    Update(TaskUpdateArgs),
    Delete(TaskDeleteArgs),
    Show(TaskShowArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum BoardCommand {
    List,
}

#[derive(Debug, Clone, Args)]
pub struct TaskListArgs {
    #[arg(long, value_name = "BOARD")]
    pub board: Option<String>,

    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct TaskCreateArgs {
    #[arg(long, value_name = "TEXT")]
    pub title: String,

    #[arg(long, value_name = "TEXT", default_value = "")]
    pub description: String,

    #[arg(long, value_name = "STATUS", default_value = "todo")]
    pub status: String,

    #[arg(long, value_name = "BOARD")]
    pub board: String,
}

#[derive(Debug, Clone, Args)]
pub struct TaskUpdateArgs {
    #[arg(long, value_name = "TASK_ID")]
    pub id: String,

    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    #[arg(long, value_name = "STATUS")]
    pub status: Option<String>,

    #[arg(long, value_name = "BOARD")]
    pub board: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct TaskDeleteArgs {
    #[arg(long, value_name = "TASK_ID")]
    pub id: String,
}

#[derive(Debug, Clone, Args)]
pub struct TaskShowArgs {
    #[arg(long, value_name = "TASK_ID")]
    pub id: String,
}

pub fn run(store_path: &Path, command: RootCommand, json_output: bool, quiet: bool) -> i32 {
    match execute(store_path, command) {
        Ok(output) => {
            print_success(output, json_output, quiet);
            0
        }
        Err(err) => {
            print_error(&err, json_output);
            err.exit_code
        }
    }
}

#[derive(Debug)]
struct CommandOutput {
    command: &'static str,
    data: Value,
    text: String,
}

#[derive(Debug)]
struct CliError {
    exit_code: i32,
    code: &'static str,
    message: String,
}

type CliResult<T> = Result<T, CliError>;

fn execute(store_path: &Path, command: RootCommand) -> CliResult<CommandOutput> {
    let mut store = Store::open(store_path).map_err(runtime_error)?;

    match command {
        RootCommand::Task { command } => execute_task_command(&mut store, command),
        RootCommand::Board { command } => match command {
            BoardCommand::List => board_list(&store),
        },
    }
}

fn execute_task_command(store: &mut Store, command: TaskCommand) -> CliResult<CommandOutput> {
    match command {
        TaskCommand::List(args) => task_list(store, args),
        TaskCommand::Create(args) => task_create(store, args),
        TaskCommand::Update(args) => task_update(store, args),
        TaskCommand::Delete(args) => task_delete(store, args),
        TaskCommand::Show(args) => task_show(store, args),
    }
}

fn board_list(store: &Store) -> CliResult<CommandOutput> {
    let all = tasks::all(store).map_err(runtime_error)?;
    let names = boards::board_names(&all);
    let data = json!({ "boards": names });
    let text = if names.is_empty() {
        "No boards found.".to_string()
    } else {
        names.join("\n")
    };

    Ok(CommandOutput {
        command: "board list",
        data,
        text,
    })
}

fn task_list(store: &Store, args: TaskListArgs) -> CliResult<CommandOutput> {
    let all = tasks::all(store).map_err(runtime_error)?;
    let status = args
        .status
        .as_deref()
        .map(parse_status)
        .transpose()?;

    let listed: Vec<&Task> = match (args.board.as_deref(), status) {
        (Some(board), Some(status)) => boards::filter_by_board_and_status(&all, board, status),
        (Some(board), None) => boards::filter_by_board(&all, board),
        (None, Some(status)) => all.iter().filter(|task| task.status == status).collect(),
        (None, None) => all.iter().collect(),
    };

    let data = json!({
        "tasks": listed.iter().map(|task| task_json(task)).collect::<Vec<_>>()
    });
    let text = render_task_list_text(&listed);

    Ok(CommandOutput {
        command: "task list",
        data,
        text,
    })
}

fn task_create(store: &mut Store, args: TaskCreateArgs) -> CliResult<CommandOutput> {
    if args.board.trim().is_empty() {
        return Err(usage_error("BOARD_REQUIRED", "--board cannot be empty"));
    }

    let draft = TaskDraft {
        title: args.title,
        description: args.description,
        status: parse_status(&args.status)?,
        board: args.board,
    };
    let created = tasks::create(store, draft).map_err(runtime_error)?;

    let data = json!({ "task": task_json(&created) });
    Ok(CommandOutput {
        command: "task create",
        data,
        text: format!("created task {} ({})", created.title, created.id),
    })
}

fn task_update(store: &mut Store, args: TaskUpdateArgs) -> CliResult<CommandOutput> {
    if args.title.is_none()
        && args.description.is_none()
        && args.status.is_none()
        && args.board.is_none()
    {
        return Err(usage_error(
            "TASK_UPDATE_EMPTY",
            "provide at least one of --title, --description, --status, or --board",
        ));
    }

    let id = resolve_task_id(store, &args.id)?;
    let all = tasks::all(store).map_err(runtime_error)?;
    let current = all
        .iter()
        .find(|task| task.id == id)
        .ok_or_else(|| task_not_found(&args.id))?;

    let edited = Task {
        id,
        title: args.title.unwrap_or_else(|| current.title.clone()),
        description: args
            .description
            .unwrap_or_else(|| current.description.clone()),
        status: match args.status.as_deref() {
            Some(raw) => parse_status(raw)?,
            None => current.status,
        },
        board: args.board.unwrap_or_else(|| current.board.clone()),
    };

    let replaced = tasks::replace(store, id, edited).map_err(runtime_error)?;
    let data = json!({ "task": task_json(&replaced) });
    Ok(CommandOutput {
        command: "task update",
        data,
        text: format!("updated task {} ({})", replaced.title, replaced.id),
    })
}

fn task_delete(store: &mut Store, args: TaskDeleteArgs) -> CliResult<CommandOutput> {
    let id = resolve_task_id(store, &args.id)?;
    tasks::remove(store, id).map_err(runtime_error)?;

    let data = json!({ "deleted": id });
    Ok(CommandOutput {
        command: "task delete",
        data,
        text: format!("deleted task {id}"),
    })
}

fn task_show(store: &Store, args: TaskShowArgs) -> CliResult<CommandOutput> {
    let id = resolve_task_id(store, &args.id)?;
    let all = tasks::all(store).map_err(runtime_error)?;
    let task = all
        .iter()
        .find(|task| task.id == id)
        .ok_or_else(|| task_not_found(&args.id))?;

    let data = json!({ "task": task_json(task) });
    Ok(CommandOutput {
        command: "task show",
        data,
        text: format!("{} {}", task.id, task.title),
    })
}

/// Accepts a full uuid or a unique id prefix.
fn resolve_task_id(store: &Store, selector: &str) -> CliResult<Uuid> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(usage_error("TASK_ID_REQUIRED", "task id cannot be empty"));
    }

    if let Ok(parsed) = Uuid::parse_str(trimmed) {
        return Ok(parsed);
    }

    let needle = trimmed.to_ascii_lowercase();
    let all = tasks::all(store).map_err(runtime_error)?;

    let mut unique_matches = Vec::new();
    let mut seen = HashSet::new();
    for task in all {
        let full = task.id.to_string().to_ascii_lowercase();
        let simple = task.id.as_simple().to_string();
        if (full.starts_with(&needle) || simple.starts_with(&needle)) && seen.insert(task.id) {
            unique_matches.push(task.id);
        }
    }

    match unique_matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(task_not_found(selector)),
        many => Err(CliError {
            exit_code: 4,
            code: "TASK_ID_AMBIGUOUS",
            message: format!(
                "task id prefix '{}' matches {} tasks; use a longer id",
                selector,
                many.len()
            ),
        }),
    }
}

fn parse_status(raw: &str) -> CliResult<Status> {
    Status::from_str(raw).map_err(|()| {
        usage_error(
            "INVALID_STATUS",
            format!("invalid status '{raw}'; expected todo, doing, or done"),
        )
    })
}

fn task_json(task: &Task) -> Value {
    json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "status": task.status.as_str(),
        "board": task.board,
    })
}

fn render_task_list_text(listed: &[&Task]) -> String {
    if listed.is_empty() {
        return "No tasks found.".to_string();
    }

    let headers = ["ID", "Status", "Board", "Title"];
    let rows = listed
        .iter()
        .map(|task| {
            let id = task.id.to_string();
            let short_id = id.chars().take(8).collect::<String>();
            let title = task.title.replace('\n', " ");

            vec![
                short_id,
                task.status.as_str().to_string(),
                task.board.clone(),
                title,
            ]
        })
        .collect::<Vec<_>>();

    render_text_table(&headers, &rows)
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();

    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            if width > widths[index] {
                widths[index] = width;
            }
        }
    }

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|width| "-".repeat(*width + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut lines = Vec::new();
    lines.push(border.clone());
    lines.push(format_row(
        &headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
        &widths,
    ));
    lines.push(border.clone());
    for row in rows {
        lines.push(format_row(row, &widths));
    }
    lines.push(border);

    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("| {padded} |")
}

fn usage_error(code: &'static str, message: impl Into<String>) -> CliError {
    CliError {
        exit_code: 2,
        code,
        message: message.into(),
    }
}

fn task_not_found(selector: &str) -> CliError {
    CliError {
        exit_code: 3,
        code: "TASK_NOT_FOUND",
        message: format!("task '{selector}' not found"),
    }
}

fn runtime_error(err: impl std::fmt::Display) -> CliError {
    CliError {
        exit_code: 5,
        code: "RUNTIME_ERROR",
        message: err.to_string(),
    }
}

fn print_success(output: CommandOutput, json_output: bool, quiet: bool) {
    if json_output {
        let payload = json!({
            "schema_version": SCHEMA_VERSION,
            "command": output.command,
            "data": output.data
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(value) => println!("{value}"),
            Err(_) => println!("{}", payload),
        }
        return;
    }

    if quiet {
        return;
    }

    if output.text.is_empty() {
        println!("ok");
    } else {
        println!("{}", output.text);
    }
}

fn print_error(err: &CliError, json_output: bool) {
    error!(
        code = err.code,
        message = %err.message,
        "cli command failed"
    );

    if json_output {
        let payload = json!({
            "schema_version": SCHEMA_VERSION,
            "error": {
                "code": err.code,
                "message": err.message
            }
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(value) => eprintln!("{value}"),
            Err(_) => eprintln!("{}", payload),
        }
        return;
    }

    eprintln!("error[{}]: {}", err.code, err.message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_store(dir: &TempDir) -> Store {
        let mut store = Store::open(dir.path().join("store.json")).expect("failed to open store");
        let draft = TaskDraft {
            title: "Existing".to_string(),
            description: String::new(),
            status: Status::Todo,
            board: "X".to_string(),
        };
        tasks::create(&mut store, draft).expect("failed to create fixture task");
        store
    }

    #[test]
    fn test_board_list() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = seeded_store(&dir);

        let output = board_list(&store).expect("board list failed");
        assert_eq!(output.data["boards"], json!(["X"]));
        assert_eq!(output.text, "X");
    }

    #[test]
    fn test_task_create_and_list_filters() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = seeded_store(&dir);

        task_create(
            &mut store,
            TaskCreateArgs {
                title: "On Y".to_string(),
                description: String::new(),
                status: "doing".to_string(),
                board: "Y".to_string(),
            },
        )
        .expect("task create failed");

        let output = task_list(
            &store,
            TaskListArgs {
                board: Some("Y".to_string()),
                status: Some("doing".to_string()),
            },
        )
        .expect("task list failed");
        let listed = output.data["tasks"].as_array().expect("tasks should be an array");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["title"], "On Y");
    }

    #[test]
    fn test_task_list_board_only_filter() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = seeded_store(&dir);

        task_create(
            &mut store,
            TaskCreateArgs {
                title: "Also on X".to_string(),
                description: String::new(),
                status: "done".to_string(),
                board: "X".to_string(),
            },
        )
        .expect("task create failed");
        task_create(
            &mut store,
            TaskCreateArgs {
                title: "On Y".to_string(),
                description: String::new(),
                status: "todo".to_string(),
                board: "Y".to_string(),
            },
        )
        .expect("task create failed");

        let output = task_list(
            &store,
            TaskListArgs {
                board: Some("X".to_string()),
                status: None,
            },
        )
        .expect("task list failed");
        let listed = output.data["tasks"].as_array().expect("tasks should be an array");
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|task| task["board"] == "X"));
    }

    #[test]
    fn test_task_create_rejects_bad_status() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = seeded_store(&dir);

        let err = task_create(
            &mut store,
            TaskCreateArgs {
                title: "Bad".to_string(),
                description: String::new(),
                status: "archived".to_string(),
                board: "X".to_string(),
            },
        )
        .expect_err("invalid status should fail");
        assert_eq!(err.code, "INVALID_STATUS");
        assert_eq!(err.exit_code, 2);
    }

    #[test]
    fn test_task_update_by_prefix() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = seeded_store(&dir);
        let id = tasks::all(&store).expect("decode failed")[0].id;
        let prefix: String = id.to_string().chars().take(8).collect();

        let output = task_update(
            &mut store,
            TaskUpdateArgs {
                id: prefix,
                title: None,
                description: None,
                status: Some("done".to_string()),
                board: None,
            },
        )
        .expect("task update failed");
        assert_eq!(output.data["task"]["status"], "done");

        let all = tasks::all(&store).expect("decode failed");
        assert_eq!(all[0].status, Status::Done);
        assert_eq!(all[0].title, "Existing");
    }

    #[test]
    fn test_task_update_missing_id_is_not_found() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = seeded_store(&dir);

        let err = task_update(
            &mut store,
            TaskUpdateArgs {
                id: Uuid::new_v4().to_string(),
                title: Some("x".to_string()),
                description: None,
                status: None,
                board: None,
            },
        )
        .expect_err("missing task should fail");
        assert_eq!(err.code, "TASK_NOT_FOUND");
        assert_eq!(err.exit_code, 3);
    }

    #[test]
    fn test_task_delete_then_show_fails() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = seeded_store(&dir);
        let id = tasks::all(&store).expect("decode failed")[0].id;

        task_delete(
            &mut store,
            TaskDeleteArgs {
                id: id.to_string(),
            },
        )
        .expect("task delete failed");

        let err = task_show(
            &store,
            TaskShowArgs {
                id: id.to_string(),
            },
        )
        .expect_err("deleted task should not show");
        assert_eq!(err.code, "TASK_NOT_FOUND");
    }

    #[test]
    fn test_render_text_table_alignment() {
        let table = render_text_table(
            &["A", "Board"],
            &[vec!["1".to_string(), "X".to_string()]],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("A"));
        assert!(lines[3].contains("X"));
        assert!(lines.iter().all(|line| line.len() == lines[0].len()));
    }
}
