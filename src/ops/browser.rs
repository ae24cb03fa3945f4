//! Task browser controller: the filtered list view and its inline actions.

use crate::api::client::{ApiError, Backend};
use crate::model::filter::TaskFilter;
use crate::model::session::Session;
use crate::model::task::{Status, Task};
use crate::ops::policy;

const FETCH_FALLBACK: &str = "Failed to fetch tasks";
const STATUS_FALLBACK: &str = "Failed to update status";
const DELETE_FALLBACK: &str = "Failed to delete task";

/// Outcome of a delete request routed through the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Row removed from local state
    Deleted,
    /// User declined the confirmation; nothing happened, no error shown
    Cancelled,
    /// Backend refused; list unchanged, banner set
    Failed,
}

/// The task list, its filters, and the single error banner.
///
/// Fetches are stamped with a monotonically increasing sequence number so a
/// slow response from an old filter can never overwrite a newer list.
#[derive(Debug, Default)]
pub struct TaskBrowser {
    pub tasks: Vec<Task>,
    pub filter: TaskFilter,
    /// One banner per browser, replaced on every attempt
    pub error: Option<String>,
    next_seq: u64,
    applied_seq: u64,
}

impl TaskBrowser {
    pub fn new() -> Self {
        TaskBrowser::default()
    }

    /// Stamp a fetch that is about to be issued.
    pub fn begin_fetch(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Apply a fetch response. Stale responses (an earlier stamp than the
    /// newest applied one) are dropped without touching state. Returns
    /// whether the response was applied.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<Task>, ApiError>) -> bool {
        if seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = seq;
        match result {
            Ok(tasks) => {
                // Replace verbatim; the backend's ordering is authoritative
                self.tasks = tasks;
                self.error = None;
            }
            Err(err) => self.error = Some(err.banner(FETCH_FALLBACK)),
        }
        true
    }

    /// Issue a fetch with the current filters and apply it. The blocking
    /// call keeps stamp and response adjacent; the stamping still guards
    /// any caller that interleaves fetches.
    pub fn refresh(&mut self, backend: &dyn Backend, session: &Session) {
        let seq = self.begin_fetch();
        let result = backend.list_tasks(session, &self.filter);
        self.apply_fetch(seq, result);
    }

    /// Filter setters: eager, no debounce. Each change refetches.
    pub fn set_status_filter(
        &mut self,
        backend: &dyn Backend,
        session: &Session,
        status: Option<Status>,
    ) {
        self.filter.status = status;
        self.refresh(backend, session);
    }

    pub fn set_assignee_filter(
        &mut self,
        backend: &dyn Backend,
        session: &Session,
        assignee: Option<String>,
    ) {
        self.filter.assignee = assignee.filter(|a| !a.is_empty());
        self.refresh(backend, session);
    }

    /// Inline status change: PUT carrying only `{status}`. On success the
    /// server's returned task replaces the row (authoritative merge); on
    /// failure the row is untouched and the banner is set.
    pub fn set_status(
        &mut self,
        backend: &dyn Backend,
        session: &Session,
        id: &str,
        status: Status,
    ) -> bool {
        if let Some(task) = self.tasks.iter().find(|t| t.id == id)
            && !policy::can_set_status_inline(session.role, &task.assigned_to, &session.username)
        {
            return false;
        }
        match backend.set_status(session, id, status) {
            Ok(updated) => {
                if let Some(row) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *row = updated;
                }
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err.banner(STATUS_FALLBACK));
                false
            }
        }
    }

    /// Delete a task. `confirmed` is the answer from the interactive
    /// prompt; a declined prompt aborts silently. On success the row is
    /// removed locally by id, with no refetch.
    pub fn delete(
        &mut self,
        backend: &dyn Backend,
        session: &Session,
        id: &str,
        confirmed: bool,
    ) -> DeleteOutcome {
        if !confirmed {
            return DeleteOutcome::Cancelled;
        }
        match backend.delete_task(session, id) {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                self.error = None;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                self.error = Some(err.banner(DELETE_FALLBACK));
                DeleteOutcome::Failed
            }
        }
    }

    /// Explicit invalidation hook for "a task was saved elsewhere" (the
    /// editor). Just a refetch with current filters.
    pub fn invalidate(&mut self, backend: &dyn Backend, session: &Session) {
        self.refresh(backend, session);
    }
}
