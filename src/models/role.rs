use std::fmt;

use serde::{Deserialize, Serialize};

/// Access roles the directory hands out. The remote side stores roles as
/// free strings; anything we do not recognize is presented as `User`
/// without touching the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Editor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Editor, Role::Admin];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "user" => Some(Role::User),
            "editor" => Some(Role::Editor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Presentation fallback: unrecognized raw values degrade to `User`.
    pub fn from_raw(s: &str) -> Self {
        Self::parse(s).unwrap_or(Role::User)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table-level role filter: everything, or exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    /// Parse a query/flag value. Unknown values fall back to `All` so a
    /// stale link never hides the whole table.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "all" => RoleFilter::All,
            other => Role::parse(other).map(RoleFilter::Only).unwrap_or(RoleFilter::All),
        }
    }

    pub fn matches(&self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => role == *wanted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleFilter::All => "all",
            RoleFilter::Only(r) => r.as_str(),
        }
    }
}
