use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => {
            if !app.browser.tasks.is_empty() {
                app.cursor = (app.cursor + 1).min(app.browser.tasks.len() - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => app.cursor = 0,
        KeyCode::Char('G') => {
            app.cursor = app.browser.tasks.len().saturating_sub(1);
        }

        // Filters
        KeyCode::Char('s') => app.cycle_status_filter(),
        KeyCode::Char('a') => {
            app.filter_input = app.browser.filter.assignee.clone().unwrap_or_default();
            app.mode = Mode::FilterAssignee;
        }

        // Actions
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('n') => app.open_create_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char(' ') => app.cycle_selected_status(),
        KeyCode::Char('d') => app.request_delete(),

        _ => {}
    }
}
