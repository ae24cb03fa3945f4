use serde::{Deserialize, Serialize};

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// The label the backend stores and displays
    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Next status in display order, wrapping around (TUI selector)
    pub fn cycle(self) -> Status {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Todo,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a status from CLI input. Accepts short forms and the exact labels.
pub fn parse_status(s: &str) -> Result<Status, String> {
    match s {
        "todo" | "To Do" => Ok(Status::Todo),
        "in-progress" | "In Progress" => Ok(Status::InProgress),
        "done" | "Done" => Ok(Status::Done),
        _ => Err(format!(
            "unknown status '{}' (expected: todo, in-progress, done)",
            s
        )),
    }
}

/// A task as the backend returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "assignedTo")]
    pub assigned_to: String,
    pub status: Status,
}

/// The body of a create (POST) or full update (PUT) request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "assignedTo")]
    pub assigned_to: String,
    pub status: Status,
}

impl TaskDraft {
    /// The draft that would recreate an existing task's editable fields
    pub fn from_task(task: &Task) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            assigned_to: task.assigned_to.clone(),
            status: task.status,
        }
    }
}
