//! Inventory user model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access level of an inventory user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access including deletes and user management
    Admin,
    /// Day-to-day catalogue and stock work
    #[default]
    Staff,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" | "administrator" => Some(Self::Admin),
            "staff" | "user" => Some(Self::Staff),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
        }
    }
}

/// A person who can log in to the inventory system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,

    /// Argon2 PHC string
    pub password_hash: String,

    #[serde(default)]
    pub role: Role,

    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Whether this user may act on `other`'s account (self or admin)
    pub fn can_manage(&self, other: &str) -> bool {
        self.role.is_admin() || self.username.eq_ignore_ascii_case(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("staff"), Some(Role::Staff));
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn test_can_manage() {
        let admin = User::new("admin", "x", Role::Admin);
        let clerk = User::new("clerk", "x", Role::Staff);

        assert!(admin.can_manage("clerk"));
        assert!(clerk.can_manage("CLERK"));
        assert!(!clerk.can_manage("admin"));
    }
}
