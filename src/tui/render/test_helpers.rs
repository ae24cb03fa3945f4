use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::api::fake::FakeBackend;
use crate::model::session::{Role, Session};
use crate::model::task::{Status, Task};
use crate::tui::app::App;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn sample_task(id: &str, title: &str, assigned_to: &str, status: Status) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        description: String::new(),
        assigned_to: assigned_to.into(),
        status,
    }
}

/// Build an App over a fake backend seeded with the given tasks, with the
/// list already fetched.
pub fn app_with_tasks(role: Role, username: &str, tasks: Vec<Task>) -> App {
    let mut app = App::new(
        Session::new("test-token", role, username),
        Box::new(FakeBackend::seeded(tasks)),
    );
    app.refresh();
    app
}
