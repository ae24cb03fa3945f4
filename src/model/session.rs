use serde::{Deserialize, Serialize};

/// Authorization role attached to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
    Member,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Member => "Member",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a role string as the backend sends it. Case-insensitive for CLI use.
pub fn parse_role(s: &str) -> Result<Role, String> {
    match s.to_ascii_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "manager" => Ok(Role::Manager),
        "member" => Ok(Role::Member),
        _ => Err(format!(
            "unknown role '{}' (expected: Admin, Manager, Member)",
            s
        )),
    }
}

/// An authenticated session: the bearer token plus the identity the
/// authorization matrix keys on. Constructed at login, restored from durable
/// storage at startup, and passed by reference to everything that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, username: impl Into<String>) -> Self {
        Session {
            token: token.into(),
            role,
            username: username.into(),
        }
    }
}
