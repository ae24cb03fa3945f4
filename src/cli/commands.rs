use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("[>] taskdeck v", env!("CARGO_PKG_VERSION"), " - your team's tasks from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config directory (session + config.toml)
    #[arg(long = "config-dir", global = true, value_name = "DIR")]
    pub config_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(LoginArgs),
    /// Register a new account
    Register(RegisterArgs),
    /// Clear the stored session
    Logout,
    /// Show the logged-in user and role
    Whoami,
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Create a task
    Create(CreateArgs),
    /// Update a task's fields
    Update(UpdateArgs),
    /// Change a task's status
    Status(StatusArgs),
    /// Delete tasks
    Delete(DeleteArgs),
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    /// Username to authenticate as (omit when using --token)
    pub username: Option<String>,
    /// Password (read from the TASKDECK_PASSWORD env var if omitted)
    #[arg(long)]
    pub password: Option<String>,
    /// Store an existing bearer token instead of authenticating
    #[arg(long, requires = "role", requires = "token_username")]
    pub token: Option<String>,
    /// Role for --token (Admin, Manager, Member)
    #[arg(long)]
    pub role: Option<String>,
    /// Username for --token
    #[arg(long = "username", value_name = "NAME", id = "token_username")]
    pub token_username: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Username for the new account
    pub username: String,
    /// Password (read from the TASKDECK_PASSWORD env var if omitted)
    #[arg(long)]
    pub password: Option<String>,
    /// Role to request (Admin, Manager, Member)
    #[arg(long, default_value = "Member")]
    pub role: String,
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (todo, in-progress, done)
    #[arg(long)]
    pub status: Option<String>,
    /// Filter by assignee username
    #[arg(long)]
    pub assignee: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Task title
    pub title: String,
    /// Username the task is assigned to
    pub assignee: String,
    /// Task description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Initial status (todo, in-progress, done)
    #[arg(long, default_value = "todo")]
    pub status: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Task id
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long)]
    pub description: Option<String>,
    /// New assignee username
    #[arg(long)]
    pub assignee: Option<String>,
    /// New status (todo, in-progress, done)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Task id
    pub id: String,
    /// New status (todo, in-progress, done)
    pub status: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ids to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}
