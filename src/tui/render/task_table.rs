use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::model::session::Session;
use crate::model::task::Task;
use crate::ops::policy;
use crate::tui::app::App;

/// The status cell text: angle brackets mark a live inline selector, plain
/// text a read-only status.
fn status_cell(task: &Task, session: &Session) -> String {
    if policy::can_set_status_inline(session.role, &task.assigned_to, &session.username) {
        format!("< {} >", task.status.label())
    } else {
        task.status.label().to_string()
    }
}

fn pad(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    for _ in current..width {
        out.push(' ');
    }
    out
}

/// Render the task list as an aligned table with a cursor row
pub fn render_task_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.browser.tasks.is_empty() {
        let text = if app.browser.error.is_some() {
            ""
        } else {
            "  no tasks — n creates one"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(app.theme.dim).bg(bg),
            )))
            .style(Style::default().bg(bg)),
            area,
        );
        return;
    }

    // Column widths over the whole list
    let mut title_w = "TITLE".len();
    let mut assignee_w = "ASSIGNED TO".len();
    for task in &app.browser.tasks {
        title_w = title_w.max(UnicodeWidthStr::width(task.title.as_str()));
        assignee_w = assignee_w.max(UnicodeWidthStr::width(task.assigned_to.as_str()));
    }

    // Keep the cursor visible (header takes one row)
    let visible = (area.height as usize).saturating_sub(1).max(1);
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible {
        app.scroll_offset = app.cursor + 1 - visible;
    }

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "  {}  {}  STATUS",
            pad("TITLE", title_w),
            pad("ASSIGNED TO", assignee_w)
        ),
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));

    for (i, task) in app
        .browser
        .tasks
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
    {
        let is_cursor = i == app.cursor;
        let marker = if is_cursor { "> " } else { "  " };
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
        let text_style = Style::default()
            .fg(if is_cursor {
                app.theme.text_bright
            } else {
                app.theme.text
            })
            .bg(row_bg);

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(
                format!("{}  {}  ", pad(&task.title, title_w), pad(&task.assigned_to, assignee_w)),
                text_style,
            ),
            Span::styled(
                status_cell(task, &app.session),
                Style::default()
                    .fg(app.theme.status_color(task.status))
                    .bg(row_bg),
            ),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::model::session::Role;
    use crate::model::task::Status;
    use crate::tui::render::test_helpers::render_to_string;

    fn task(id: &str, title: &str, assigned_to: &str, status: Status) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            assigned_to: assigned_to.into(),
            status,
        }
    }

    fn app(role: Role, username: &str, tasks: Vec<Task>) -> App {
        let mut app = App::new(
            Session::new("tok", role, username),
            Box::new(FakeBackend::seeded(tasks)),
        );
        app.refresh();
        app
    }

    #[test]
    fn member_sees_selector_on_own_row_and_text_on_others() {
        let mut app = app(
            Role::Member,
            "bob",
            vec![
                task("t1", "Mine", "bob", Status::Todo),
                task("t2", "Theirs", "carol", Status::Todo),
            ],
        );
        let text = render_to_string(60, 10, |frame, area| {
            render_task_table(frame, &mut app, area);
        });
        let own = text.lines().find(|l| l.contains("Mine")).unwrap();
        let other = text.lines().find(|l| l.contains("Theirs")).unwrap();
        // bob's own row gets the live selector, carol's stays read-only
        assert!(own.contains("< To Do >"));
        assert!(!other.contains("< To Do >"));
        assert!(other.contains("To Do"));
    }

    #[test]
    fn manager_sees_selectors_everywhere() {
        let mut app = app(
            Role::Manager,
            "alice",
            vec![task("t1", "Any", "carol", Status::Done)],
        );
        let text = render_to_string(60, 10, |frame, area| {
            render_task_table(frame, &mut app, area);
        });
        assert!(text.contains("< Done >"));
    }

    #[test]
    fn cursor_row_is_marked() {
        let mut app = app(
            Role::Manager,
            "alice",
            vec![
                task("t1", "First", "bob", Status::Todo),
                task("t2", "Second", "bob", Status::Todo),
            ],
        );
        app.cursor = 1;
        let text = render_to_string(60, 10, |frame, area| {
            render_task_table(frame, &mut app, area);
        });
        assert!(text.contains("> Second"));
        assert!(!text.contains("> First"));
    }

    #[test]
    fn empty_list_hint() {
        let mut app = app(Role::Admin, "alice", vec![]);
        let text = render_to_string(60, 10, |frame, area| {
            render_task_table(frame, &mut app, area);
        });
        assert!(text.contains("no tasks"));
    }
}
