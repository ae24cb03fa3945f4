//! Task editor controller: a create-or-edit form over the backend.

use crate::api::client::{ApiError, Backend};
use crate::model::session::Session;
use crate::model::task::{Status, Task, TaskDraft};
use crate::ops::policy::{self, FormAccess};

/// Why a submit attempt went nowhere. Submit failures never clear the form;
/// the user fixes the fields and retries.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Members cannot create tasks")]
    NotPermitted,
    #[error("{0}")]
    Backend(String),
}

/// Form state for creating or editing a single task.
///
/// In edit mode the form carries the task being edited; handing it a new
/// task resets all field buffers to that task's values, discarding any
/// unsaved edits.
#[derive(Debug, Clone)]
pub struct EditorForm {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub status: Status,
    /// The task under edit, or None in create mode
    pub editing: Option<Task>,
    /// Last submit failure, replaced on every attempt
    pub error: Option<String>,
}

impl EditorForm {
    /// A blank create form.
    pub fn create() -> Self {
        EditorForm {
            title: String::new(),
            description: String::new(),
            assigned_to: String::new(),
            status: Status::Todo,
            editing: None,
            error: None,
        }
    }

    /// An edit form populated from an existing task.
    pub fn edit(task: Task) -> Self {
        EditorForm {
            title: task.title.clone(),
            description: task.description.clone(),
            assigned_to: task.assigned_to.clone(),
            status: task.status,
            editing: Some(task),
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Field access for the current session, tracking the assignee value
    /// currently displayed in the form.
    pub fn access(&self, session: &Session) -> FormAccess {
        policy::form_access(session.role, self.editing.as_ref(), &self.assigned_to)
    }

    /// Local presence validation. Runs before any network call.
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.title.trim().is_empty() {
            return Err(SubmitError::MissingField("title"));
        }
        if self.assigned_to.trim().is_empty() {
            return Err(SubmitError::MissingField("assignedTo"));
        }
        Ok(())
    }

    fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            assigned_to: self.assigned_to.clone(),
            status: self.status,
        }
    }

    /// Submit the form: POST in create mode, full-body PUT in edit mode.
    ///
    /// On success the saved task is returned so the caller can invalidate
    /// its task browser; create mode also clears the form. On failure the
    /// form stays populated and `error` holds the banner text.
    pub fn submit(
        &mut self,
        backend: &dyn Backend,
        session: &Session,
    ) -> Result<Task, SubmitError> {
        let outcome = self.try_submit(backend, session);
        match &outcome {
            Ok(_) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }
        outcome
    }

    fn try_submit(
        &mut self,
        backend: &dyn Backend,
        session: &Session,
    ) -> Result<Task, SubmitError> {
        if !self.access(session).submit {
            return Err(SubmitError::NotPermitted);
        }
        self.validate()?;

        let result = match &self.editing {
            None => backend.create_task(session, &self.draft()),
            Some(task) => backend.update_task(session, &task.id, &self.draft()),
        };

        match result {
            Ok(saved) => {
                if self.editing.is_none() {
                    // Create mode clears for the next task; edit mode keeps
                    // the saved values on screen.
                    *self = EditorForm::create();
                }
                Ok(saved)
            }
            Err(err) => Err(SubmitError::Backend(backend_banner(&err))),
        }
    }
}

fn backend_banner(err: &ApiError) -> String {
    err.banner("Failed to save task")
}
