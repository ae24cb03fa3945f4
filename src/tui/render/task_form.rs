use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, FormField};

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Title => "Title",
        FormField::Description => "Description",
        FormField::AssignedTo => "Assigned to",
        FormField::Status => "Status",
    }
}

/// Render the create/edit form
pub fn render_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let bg = app.theme.background;
    let access = form.access(&app.session);

    let mut lines: Vec<Line> = Vec::new();
    let heading = if form.is_edit() {
        " Edit Task"
    } else {
        " Create Task"
    };
    lines.push(Line::from(Span::styled(
        heading,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" ! {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    }
    lines.push(Line::from(""));

    for field in FormField::ORDER {
        let enabled = match field {
            FormField::Title => access.title,
            FormField::Description => access.description,
            FormField::AssignedTo => access.assigned_to,
            FormField::Status => access.status,
        };
        let on_field = app.form_field == field;
        let marker = if on_field { "> " } else { "  " };

        let value = match field {
            FormField::Title => form.title.clone(),
            FormField::Description => form.description.clone(),
            FormField::AssignedTo => form.assigned_to.clone(),
            FormField::Status => {
                if enabled {
                    format!("< {} >", form.status.label())
                } else {
                    form.status.label().to_string()
                }
            }
        };

        let value_style = if enabled {
            Style::default().fg(app.theme.text).bg(bg)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(
                format!("{:<12} ", field_label(field)),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
            Span::styled(value, value_style),
        ];
        if on_field && enabled && field != FormField::Status {
            spans.push(Span::styled(
                "▌",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
        if !enabled {
            spans.push(Span::styled(
                "  (locked)",
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
