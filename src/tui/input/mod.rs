mod confirm;
mod edit;
mod filter;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Any keypress retires the previous transient message
    if app.mode == Mode::Navigate {
        app.status_message = None;
    }

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Edit => edit::handle_edit(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
        Mode::FilterAssignee => filter::handle_filter(app, key),
    }
}
