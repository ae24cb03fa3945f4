use unicode_width::UnicodeWidthStr;

use crate::model::session::Session;
use crate::model::task::{Status, Task};

/// One-character status marker, markdown checkbox style
pub fn status_char(status: Status) -> char {
    match status {
        Status::Todo => ' ',
        Status::InProgress => '>',
        Status::Done => 'x',
    }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {} {} @{}",
        status_char(task.status),
        task.id,
        task.title,
        task.assigned_to
    )
}

fn pad(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    for _ in current..width {
        out.push(' ');
    }
    out
}

/// Format tasks as an aligned table: id, title, assignee, status.
pub fn format_task_table(tasks: &[Task]) -> Vec<String> {
    let headers = ["ID", "TITLE", "ASSIGNED TO", "STATUS"];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for task in tasks {
        widths[0] = widths[0].max(UnicodeWidthStr::width(task.id.as_str()));
        widths[1] = widths[1].max(UnicodeWidthStr::width(task.title.as_str()));
        widths[2] = widths[2].max(UnicodeWidthStr::width(task.assigned_to.as_str()));
        widths[3] = widths[3].max(task.status.label().len());
    }

    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(format!(
        "{}  {}  {}  {}",
        pad(headers[0], widths[0]),
        pad(headers[1], widths[1]),
        pad(headers[2], widths[2]),
        headers[3]
    ));
    for task in tasks {
        lines.push(format!(
            "{}  {}  {}  {}",
            pad(&task.id, widths[0]),
            pad(&task.title, widths[1]),
            pad(&task.assigned_to, widths[2]),
            task.status.label()
        ));
    }
    lines
}

/// Format the whoami line
pub fn format_session(session: &Session) -> String {
    format!("{} ({})", session.username, session.role)
}
