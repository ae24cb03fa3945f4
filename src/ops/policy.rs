//! Role-based authorization matrix.
//!
//! Every decision here is a pure function of (role, whether the task is new,
//! the task's current assignee, the current username). The UI layers never
//! make their own calls on permissions.

use crate::model::session::Role;
use crate::model::task::Task;

/// Which editor form fields are writable, and whether submit is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormAccess {
    pub title: bool,
    pub description: bool,
    pub assigned_to: bool,
    pub status: bool,
    pub submit: bool,
}

impl FormAccess {
    pub const ALL: FormAccess = FormAccess {
        title: true,
        description: true,
        assigned_to: true,
        status: true,
        submit: true,
    };

    pub const NONE: FormAccess = FormAccess {
        title: false,
        description: false,
        assigned_to: false,
        status: false,
        submit: false,
    };
}

/// Field access for the task editor.
///
/// - Admin/Manager: everything writable, create and edit alike.
/// - Member creating: nothing writable and submit blocked (Members cannot
///   create tasks).
/// - Member editing: only the status selector, and only while the task's
///   current assignee matches the assignee shown in the form — a Member may
///   move status on their own tasks only.
pub fn form_access(role: Role, existing: Option<&Task>, displayed_assignee: &str) -> FormAccess {
    match role {
        Role::Admin | Role::Manager => FormAccess::ALL,
        Role::Member => match existing {
            None => FormAccess::NONE,
            Some(task) => FormAccess {
                status: task.assigned_to == displayed_assignee,
                submit: true,
                ..FormAccess::NONE
            },
        },
    }
}

/// Whether this role may delete tasks at all.
pub fn can_delete(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}

/// Whether the inline status selector is live for a given row.
pub fn can_set_status_inline(role: Role, task_assignee: &str, username: &str) -> bool {
    match role {
        Role::Admin | Role::Manager => true,
        Role::Member => task_assignee == username,
    }
}
