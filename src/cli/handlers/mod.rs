use std::io::{BufRead, Write};
use std::path::PathBuf;

use serde_json::json;

use crate::api::client::{Backend, HttpBackend};
use crate::cli::commands::*;
use crate::cli::output;
use crate::io::{config_io, session_io};
use crate::model::filter::TaskFilter;
use crate::model::session::{Session, parse_role};
use crate::model::task::{Task, parse_status};
use crate::ops::browser::{DeleteOutcome, TaskBrowser};
use crate::ops::editor::EditorForm;
use crate::ops::policy;

type CliError = Box<dyn std::error::Error>;

/// Everything a command needs: where the session lives and how to reach the
/// backend.
struct Context {
    config_dir: PathBuf,
    backend: HttpBackend,
}

impl Context {
    fn new(config_dir_flag: Option<&str>) -> Self {
        let config_dir = config_io::config_dir(config_dir_flag);
        let config = config_io::read_config(&config_dir);
        Context {
            config_dir,
            backend: HttpBackend::new(config.backend.url),
        }
    }

    fn session(&self) -> Result<Session, CliError> {
        session_io::read_session(&self.config_dir)
            .ok_or_else(|| "not logged in (run `td login`)".into())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    let ctx = Context::new(cli.config_dir.as_deref());

    match cli.command {
        None => unreachable!("no-subcommand launches the TUI from main"),
        Some(cmd) => match cmd {
            Commands::Login(args) => cmd_login(&ctx, args, json),
            Commands::Register(args) => cmd_register(&ctx, args),
            Commands::Logout => cmd_logout(&ctx),
            Commands::Whoami => cmd_whoami(&ctx, json),
            Commands::List(args) => cmd_list(&ctx, args, json),
            Commands::Create(args) => cmd_create(&ctx, args, json),
            Commands::Update(args) => cmd_update(&ctx, args, json),
            Commands::Status(args) => cmd_status(&ctx, args, json),
            Commands::Delete(args) => cmd_delete(&ctx, args),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_password(flag: Option<String>) -> Result<String, CliError> {
    if let Some(password) = flag {
        return Ok(password);
    }
    std::env::var("TASKDECK_PASSWORD")
        .map_err(|_| "password required (use --password or TASKDECK_PASSWORD)".into())
}

/// Find a task by id. The backend has no single-task GET, so this goes
/// through the unfiltered listing.
fn find_task(ctx: &Context, session: &Session, id: &str) -> Result<Task, CliError> {
    let tasks = ctx
        .backend
        .list_tasks(session, &TaskFilter::default())
        .map_err(|e| e.banner("Failed to fetch tasks"))?;
    tasks
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| format!("no task with id '{}'", id).into())
}

/// Interactive y/N prompt on stdin. Anything but y/Y declines.
fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y")
}

fn print_task(task: &Task, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!("{}", output::format_task_line(task));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

fn cmd_login(ctx: &Context, args: LoginArgs, json: bool) -> Result<(), CliError> {
    let session = if let Some(token) = args.token {
        // Store an existing credential without touching the network
        let role = parse_role(&args.role.unwrap_or_default())?;
        let username = args.token_username.unwrap_or_default();
        if username.is_empty() {
            return Err("--token requires --username".into());
        }
        Session::new(token, role, username)
    } else {
        let username = args
            .username
            .ok_or("username required (or use --token/--role/--username)")?;
        let password = resolve_password(args.password)?;
        let login = ctx
            .backend
            .login(&username, &password)
            .map_err(|e| e.banner("Login failed"))?;
        Session::new(login.token, login.role, login.username)
    };

    session_io::write_session(&ctx.config_dir, &session)?;
    if json {
        println!(
            "{}",
            json!({ "username": session.username, "role": session.role })
        );
    } else {
        println!("logged in as {}", output::format_session(&session));
    }
    Ok(())
}

fn cmd_register(ctx: &Context, args: RegisterArgs) -> Result<(), CliError> {
    let role = parse_role(&args.role)?;
    let password = resolve_password(args.password)?;
    ctx.backend
        .register(&args.username, &password, role)
        .map_err(|e| e.banner("Registration failed"))?;
    println!("registered '{}' — now run `td login`", args.username);
    Ok(())
}

fn cmd_logout(ctx: &Context) -> Result<(), CliError> {
    session_io::clear_session(&ctx.config_dir)?;
    println!("logged out");
    Ok(())
}

fn cmd_whoami(ctx: &Context, json: bool) -> Result<(), CliError> {
    let session = ctx.session()?;
    if json {
        println!(
            "{}",
            json!({ "username": session.username, "role": session.role })
        );
    } else {
        println!("{}", output::format_session(&session));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> Result<(), CliError> {
    let session = ctx.session()?;
    let filter = TaskFilter {
        status: args.status.as_deref().map(parse_status).transpose()?,
        assignee: args.assignee,
    };
    let tasks = ctx
        .backend
        .list_tasks(&session, &filter)
        .map_err(|e| e.banner("Failed to fetch tasks"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else if tasks.is_empty() {
        println!("no tasks");
    } else {
        for line in output::format_task_table(&tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_create(ctx: &Context, args: CreateArgs, json: bool) -> Result<(), CliError> {
    let session = ctx.session()?;
    let mut form = EditorForm::create();
    form.title = args.title;
    form.assigned_to = args.assignee;
    form.description = args.description;
    form.status = parse_status(&args.status)?;

    let saved = form.submit(&ctx.backend, &session)?;
    print_task(&saved, json)
}

fn cmd_update(ctx: &Context, args: UpdateArgs, json: bool) -> Result<(), CliError> {
    let session = ctx.session()?;
    let task = find_task(ctx, &session, &args.id)?;
    let mut form = EditorForm::edit(task);
    let access = form.access(&session);

    // Refuse edits to fields the role cannot write instead of silently
    // dropping them.
    if args.title.is_some() && !access.title {
        return Err("your role cannot change the title".into());
    }
    if args.description.is_some() && !access.description {
        return Err("your role cannot change the description".into());
    }
    if args.assignee.is_some() && !access.assigned_to {
        return Err("your role cannot reassign tasks".into());
    }
    if args.status.is_some() && !access.status {
        return Err("Members can only change status on their own tasks".into());
    }

    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(assignee) = args.assignee {
        form.assigned_to = assignee;
    }
    if let Some(status) = args.status {
        form.status = parse_status(&status)?;
    }

    let saved = form.submit(&ctx.backend, &session)?;
    print_task(&saved, json)
}

fn cmd_status(ctx: &Context, args: StatusArgs, json: bool) -> Result<(), CliError> {
    let session = ctx.session()?;
    let status = parse_status(&args.status)?;
    let task = find_task(ctx, &session, &args.id)?;

    if !policy::can_set_status_inline(session.role, &task.assigned_to, &session.username) {
        return Err("Members can only change status on their own tasks".into());
    }

    let updated = ctx
        .backend
        .set_status(&session, &args.id, status)
        .map_err(|e| e.banner("Failed to update status"))?;
    print_task(&updated, json)
}

fn cmd_delete(ctx: &Context, args: DeleteArgs) -> Result<(), CliError> {
    let session = ctx.session()?;
    if !policy::can_delete(session.role) {
        return Err("only Admins and Managers can delete tasks".into());
    }

    let mut browser = TaskBrowser::new();
    browser.refresh(&ctx.backend, &session);
    if let Some(error) = browser.error.take() {
        return Err(error.into());
    }

    for id in &args.ids {
        let confirmed = args.yes || confirm(&format!("Delete task '{}'?", id));
        match browser.delete(&ctx.backend, &session, id, confirmed) {
            DeleteOutcome::Deleted => println!("deleted {}", id),
            DeleteOutcome::Cancelled => println!("skipped {}", id),
            DeleteOutcome::Failed => {
                return Err(browser
                    .error
                    .take()
                    .unwrap_or_else(|| "Failed to delete task".to_string())
                    .into());
            }
        }
    }
    Ok(())
}
