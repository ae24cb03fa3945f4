use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

pub(super) fn handle_filter(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.apply_assignee_filter(),
        KeyCode::Esc => {
            app.filter_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Char(c) => app.filter_input.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use crate::model::session::{Role, Session};
    use crate::model::task::{Status, Task};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn task(id: &str, assigned_to: &str) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {}", id),
            description: String::new(),
            assigned_to: assigned_to.into(),
            status: Status::Todo,
        }
    }

    fn app() -> App {
        let mut app = App::new(
            Session::new("tok", Role::Manager, "alice"),
            Box::new(FakeBackend::seeded(vec![
                task("t1", "bob"),
                task("t2", "carol"),
            ])),
        );
        app.refresh();
        app.mode = Mode::FilterAssignee;
        app
    }

    #[test]
    fn typing_then_enter_applies_the_filter() {
        let mut app = app();
        for c in "bob".chars() {
            handle_filter(&mut app, key(KeyCode::Char(c)));
        }
        handle_filter(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.browser.filter.assignee.as_deref(), Some("bob"));
        assert_eq!(app.browser.tasks.len(), 1);
    }

    #[test]
    fn empty_input_clears_the_filter() {
        let mut app = app();
        app.browser.filter.assignee = Some("bob".into());
        app.filter_input.clear();
        handle_filter(&mut app, key(KeyCode::Enter));
        assert!(app.browser.filter.assignee.is_none());
        assert_eq!(app.browser.tasks.len(), 2);
    }

    #[test]
    fn esc_cancels_without_touching_the_filter() {
        let mut app = app();
        app.browser.filter.assignee = Some("carol".into());
        for c in "bob".chars() {
            handle_filter(&mut app, key(KeyCode::Char(c)));
        }
        handle_filter(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.browser.filter.assignee.as_deref(), Some("carol"));
        assert!(app.filter_input.is_empty());
    }
}
