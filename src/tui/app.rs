use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::client::{Backend, HttpBackend};
use crate::io::{config_io, session_io};
use crate::model::session::{Role, Session};
use crate::model::task::{Status, Task};
use crate::ops::browser::{DeleteOutcome, TaskBrowser};
use crate::ops::editor::EditorForm;
use crate::ops::policy;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// The create/edit form owns input
    Edit,
    /// A y/N question owns input
    Confirm,
    /// Typing into the assignee filter
    FilterAssignee,
}

/// Which form field the edit-mode cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    AssignedTo,
    Status,
}

impl FormField {
    pub const ORDER: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::AssignedTo,
        FormField::Status,
    ];
}

/// A destructive action awaiting its y/N answer
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteTask { id: String, title: String },
}

/// Main application state
pub struct App {
    pub session: Session,
    pub backend: Box<dyn Backend>,
    pub browser: TaskBrowser,
    pub mode: Mode,
    /// Present only in Edit mode
    pub form: Option<EditorForm>,
    pub form_field: FormField,
    pub confirm: Option<ConfirmAction>,
    /// Buffer for the assignee filter prompt
    pub filter_input: String,
    /// Cursor into the task list
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Transient feedback shown in the status row
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub theme: Theme,
}

impl App {
    pub fn new(session: Session, backend: Box<dyn Backend>) -> Self {
        App {
            session,
            backend,
            browser: TaskBrowser::new(),
            mode: Mode::Navigate,
            form: None,
            form_field: FormField::Title,
            confirm: None,
            filter_input: String::new(),
            cursor: 0,
            scroll_offset: 0,
            status_message: None,
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.browser.tasks.get(self.cursor)
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.browser.tasks.len();
        if count == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(count - 1);
        }
    }

    /// Refetch with current filters.
    pub fn refresh(&mut self) {
        self.browser.refresh(self.backend.as_ref(), &self.session);
        self.clamp_cursor();
    }

    /// Cycle the status filter: All → To Do → In Progress → Done → All.
    /// Eager: each step refetches.
    pub fn cycle_status_filter(&mut self) {
        let next = match self.browser.filter.status {
            None => Some(Status::Todo),
            Some(Status::Todo) => Some(Status::InProgress),
            Some(Status::InProgress) => Some(Status::Done),
            Some(Status::Done) => None,
        };
        self.browser
            .set_status_filter(self.backend.as_ref(), &self.session, next);
        self.clamp_cursor();
    }

    pub fn apply_assignee_filter(&mut self) {
        let assignee = if self.filter_input.is_empty() {
            None
        } else {
            Some(self.filter_input.clone())
        };
        self.browser
            .set_assignee_filter(self.backend.as_ref(), &self.session, assignee);
        self.clamp_cursor();
        self.mode = Mode::Navigate;
    }

    /// Cycle the selected row's status inline, when the role allows it.
    pub fn cycle_selected_status(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, assignee, next) = (task.id.clone(), task.assigned_to.clone(), task.status.cycle());
        if !policy::can_set_status_inline(self.session.role, &assignee, &self.session.username) {
            self.status_message = Some("You cannot change this task's status".to_string());
            return;
        }
        self.browser
            .set_status(self.backend.as_ref(), &self.session, &id, next);
    }

    /// Open a blank create form. Members are refused up front instead of
    /// being handed a form with every field locked.
    pub fn open_create_form(&mut self) {
        if self.session.role == Role::Member {
            self.status_message = Some("Members cannot create tasks".to_string());
            return;
        }
        self.form = Some(EditorForm::create());
        self.form_field = FormField::Title;
        self.mode = Mode::Edit;
    }

    /// Open the edit form for the selected task, cursor on the first field
    /// the role can actually write.
    pub fn open_edit_form(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        let form = EditorForm::edit(task);
        let access = form.access(&self.session);
        self.form_field = if access.title {
            FormField::Title
        } else {
            FormField::Status
        };
        self.form = Some(form);
        self.mode = Mode::Edit;
    }

    /// Submit the form. Success returns to the list and invalidates it; the
    /// saved task's row is re-fetched rather than remounted.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.submit(self.backend.as_ref(), &self.session) {
            Ok(saved) => {
                self.form = None;
                self.mode = Mode::Navigate;
                self.status_message = Some(format!("saved \"{}\"", saved.title));
                self.browser
                    .invalidate(self.backend.as_ref(), &self.session);
                self.clamp_cursor();
            }
            Err(_) => {
                // Banner already set on the form; stay in Edit for retry
            }
        }
    }

    /// Ask for delete confirmation on the selected task.
    pub fn request_delete(&mut self) {
        if !policy::can_delete(self.session.role) {
            self.status_message = Some("Only Admins and Managers can delete tasks".to_string());
            return;
        }
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, title) = (task.id.clone(), task.title.clone());
        self.confirm = Some(ConfirmAction::DeleteTask { id, title });
        self.mode = Mode::Confirm;
    }

    /// Execute a confirmed action.
    pub fn execute_confirmed(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteTask { id, title } => {
                match self
                    .browser
                    .delete(self.backend.as_ref(), &self.session, &id, true)
                {
                    DeleteOutcome::Deleted => {
                        self.status_message = Some(format!("deleted \"{}\"", title));
                        self.clamp_cursor();
                    }
                    DeleteOutcome::Cancelled | DeleteOutcome::Failed => {
                        // Failure banner lives on the browser
                    }
                }
            }
        }
    }
}

/// Run the TUI application
pub fn run(config_dir_flag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = config_io::config_dir(config_dir_flag);
    let session = session_io::read_session(&config_dir)
        .ok_or("not logged in (run `td login`)")?;
    let config = config_io::read_config(&config_dir);
    let backend = HttpBackend::new(config.backend.url);

    let mut app = App::new(session, Box::new(backend));
    app.refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
