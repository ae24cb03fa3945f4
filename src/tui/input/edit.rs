use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::policy::FormAccess;
use crate::tui::app::{App, FormField, Mode};

fn field_enabled(field: FormField, access: FormAccess) -> bool {
    match field {
        FormField::Title => access.title,
        FormField::Description => access.description,
        FormField::AssignedTo => access.assigned_to,
        FormField::Status => access.status,
    }
}

/// Next writable field in the given direction, wrapping. Stays put when no
/// other field is writable.
fn step_field(current: FormField, access: FormAccess, forward: bool) -> FormField {
    let order = FormField::ORDER;
    let len = order.len();
    let start = order.iter().position(|f| *f == current).unwrap_or(0);
    for i in 1..len {
        let idx = if forward {
            (start + i) % len
        } else {
            (start + len - i) % len
        };
        if field_enabled(order[idx], access) {
            return order[idx];
        }
    }
    current
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let access = match &app.form {
        Some(form) => form.access(&app.session),
        None => {
            app.mode = Mode::Navigate;
            return;
        }
    };

    match key.code {
        KeyCode::Esc => {
            // Discard unsaved edits
            app.form = None;
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => {
            app.form_field = step_field(app.form_field, access, true);
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form_field = step_field(app.form_field, access, false);
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if app.form_field == FormField::Status =>
        {
            if access.status
                && let Some(form) = app.form.as_mut()
            {
                form.status = form.status.cycle();
            }
        }
        KeyCode::Backspace => {
            if field_enabled(app.form_field, access)
                && let Some(form) = app.form.as_mut()
            {
                match app.form_field {
                    FormField::Title => {
                        form.title.pop();
                    }
                    FormField::Description => {
                        form.description.pop();
                    }
                    FormField::AssignedTo => {
                        form.assigned_to.pop();
                    }
                    FormField::Status => {}
                }
            }
        }
        KeyCode::Char(c) => {
            if field_enabled(app.form_field, access)
                && let Some(form) = app.form.as_mut()
            {
                match app.form_field {
                    FormField::Title => form.title.push(c),
                    FormField::Description => form.description.push(c),
                    FormField::AssignedTo => form.assigned_to.push(c),
                    FormField::Status => {}
                }
            }
        }
        _ => {}
    }
}
