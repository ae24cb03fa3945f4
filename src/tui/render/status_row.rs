use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ConfirmAction, Mode};

/// Render the bottom status row: confirm prompts and filter input take
/// priority, then errors, then transient messages, then key hints.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let line = match app.mode {
        Mode::Confirm => {
            let prompt = match &app.confirm {
                Some(ConfirmAction::DeleteTask { title, .. }) => {
                    format!(" Delete task \"{}\"? (y/n)", title)
                }
                None => String::new(),
            };
            Line::from(Span::styled(
                prompt,
                Style::default()
                    .fg(app.theme.yellow)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ))
        }
        Mode::FilterAssignee => Line::from(vec![
            Span::styled(
                " assignee: ",
                Style::default().fg(app.theme.text).bg(bg),
            ),
            Span::styled(
                format!("{}▌", app.filter_input),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled(
                "  Enter apply  Esc cancel",
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ]),
        Mode::Edit => Line::from(Span::styled(
            " Tab next field  Enter save  Esc discard",
            Style::default().fg(app.theme.dim).bg(bg),
        )),
        Mode::Navigate => {
            if let Some(error) = &app.browser.error {
                Line::from(Span::styled(
                    format!(" {}", error),
                    Style::default().fg(app.theme.red).bg(bg),
                ))
            } else if let Some(message) = &app.status_message {
                Line::from(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            } else {
                Line::from(Span::styled(
                    " n new  e edit  space status  d delete  s/a filter  r refresh  q quit",
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            }
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
