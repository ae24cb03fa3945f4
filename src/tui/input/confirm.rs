use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm: y
        KeyCode::Char('y') => {
            let action = app.confirm.take();
            app.mode = Mode::Navigate;
            if let Some(action) = action {
                app.execute_confirmed(action);
            }
        }
        // Decline: n or Esc — silent abort, no error
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirm = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
