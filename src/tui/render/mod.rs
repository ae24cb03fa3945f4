pub mod status_row;
pub mod task_form;
pub mod task_table;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::{App, Mode};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | filter row | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_filter_row(frame, app, chunks[1]);

    if app.mode == Mode::Edit && app.form.is_some() {
        task_form::render_task_form(frame, app, chunks[2]);
    } else {
        task_table::render_task_table(frame, app, chunks[2]);
    }

    status_row::render_status_row(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let line = Line::from(vec![
        Span::styled(
            " taskdeck ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("— {} ({})", app.session.username, app.session.role),
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.background)),
        area,
    );
}

fn render_filter_row(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let status = app
        .browser
        .filter
        .status
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "All".to_string());
    let assignee = app
        .browser
        .filter
        .assignee
        .clone()
        .unwrap_or_else(|| "(any)".to_string());

    let line = Line::from(vec![
        Span::styled(
            " status: ",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ),
        Span::styled(
            status,
            Style::default().fg(app.theme.cyan).bg(app.theme.background),
        ),
        Span::styled(
            "  assignee: ",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ),
        Span::styled(
            assignee,
            Style::default().fg(app.theme.cyan).bg(app.theme.background),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(app.theme.background)),
        area,
    );
}
