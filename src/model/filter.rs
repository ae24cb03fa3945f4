use crate::model::task::Status;

/// Client-local list filter state. Never persisted; drives the task query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub assignee: Option<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assignee.is_none()
    }

    /// Query parameters for the task listing. Unset filters are omitted
    /// entirely so the unfiltered request has no query string.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.label().to_string()));
        }
        if let Some(assignee) = &self.assignee {
            pairs.push(("assignedTo", assignee.clone()));
        }
        pairs
    }
}
