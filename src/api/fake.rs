//! In-memory [`Backend`] used by unit tests. Lives in the crate so the
//! editor, browser, and TUI tests share one implementation.

use std::cell::{Cell, RefCell};

use crate::api::client::{ApiError, Backend, LoginResponse};
use crate::model::filter::TaskFilter;
use crate::model::session::{Role, Session};
use crate::model::task::{Status, Task, TaskDraft};

pub struct FakeBackend {
    pub tasks: RefCell<Vec<Task>>,
    /// Total network calls observed (validation tests assert this stays 0)
    pub calls: Cell<usize>,
    /// When set, the next call is rejected with this (status, message)
    fail_next: RefCell<Option<(u16, Option<String>)>>,
    next_id: Cell<usize>,
}

impl FakeBackend {
    pub fn new() -> Self {
        FakeBackend {
            tasks: RefCell::new(Vec::new()),
            calls: Cell::new(0),
            fail_next: RefCell::new(None),
            next_id: Cell::new(1),
        }
    }

    pub fn seeded(tasks: Vec<Task>) -> Self {
        let backend = Self::new();
        *backend.tasks.borrow_mut() = tasks;
        backend
    }

    pub fn fail_next(&self, status: u16, message: Option<&str>) {
        *self.fail_next.borrow_mut() = Some((status, message.map(str::to_string)));
    }

    fn check(&self) -> Result<(), ApiError> {
        self.calls.set(self.calls.get() + 1);
        if let Some((status, message)) = self.fail_next.borrow_mut().take() {
            return Err(ApiError::Rejected { status, message });
        }
        Ok(())
    }
}

impl Backend for FakeBackend {
    fn login(&self, username: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        self.check()?;
        Ok(LoginResponse {
            token: format!("tok-{}", username),
            role: Role::Member,
            username: username.to_string(),
        })
    }

    fn register(&self, _username: &str, _password: &str, _role: Role) -> Result<(), ApiError> {
        self.check()
    }

    fn list_tasks(&self, _session: &Session, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        self.check()?;
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| {
                filter
                    .assignee
                    .as_ref()
                    .is_none_or(|a| &t.assigned_to == a)
            })
            .cloned()
            .collect())
    }

    fn create_task(&self, _session: &Session, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.check()?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let task = Task {
            id: format!("t{}", id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            assigned_to: draft.assigned_to.clone(),
            status: draft.status,
        };
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    fn update_task(
        &self,
        _session: &Session,
        id: &str,
        draft: &TaskDraft,
    ) -> Result<Task, ApiError> {
        self.check()?;
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::Rejected {
                status: 404,
                message: Some("Task not found".into()),
            })?;
        task.title = draft.title.clone();
        task.description = draft.description.clone();
        task.assigned_to = draft.assigned_to.clone();
        task.status = draft.status;
        Ok(task.clone())
    }

    fn set_status(&self, _session: &Session, id: &str, status: Status) -> Result<Task, ApiError> {
        self.check()?;
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::Rejected {
                status: 404,
                message: Some("Task not found".into()),
            })?;
        task.status = status;
        Ok(task.clone())
    }

    fn delete_task(&self, _session: &Session, id: &str) -> Result<(), ApiError> {
        self.check()?;
        let mut tasks = self.tasks.borrow_mut();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(ApiError::Rejected {
                status: 404,
                message: Some("Task not found".into()),
            });
        }
        Ok(())
    }
}
