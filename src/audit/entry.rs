//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    AtmAccount,
    Product,
    User,
}

impl EntityType {
    /// Parse an entity type from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "atm" | "atm_account" => Some(Self::AtmAccount),
            "product" | "products" => Some(Self::Product),
            "user" | "users" => Some(Self::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::AtmAccount => write!(f, "ATM"),
            EntityType::Product => write!(f, "Product"),
            EntityType::User => write!(f, "User"),
        }
    }
}

/// A single audit log entry
///
/// `before`/`after` hold JSON snapshots of the entity. Secret fields are
/// stripped before the snapshot is taken (see [`AuditEntry::scrub`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Who did it: an inventory username, or "atm" for keypad sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn base(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            actor: None,
            entity_name: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::base(Operation::Create, entity_type, entity_id.into());
        entry.entity_name = entity_name;
        entry.after = Self::scrub(entity);
        entry
    }

    /// Entry for a modified entity
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        let mut entry = Self::base(Operation::Update, entity_type, entity_id.into());
        entry.entity_name = entity_name;
        entry.before = Self::scrub(before);
        entry.after = Self::scrub(after);
        entry.diff_summary = diff_summary;
        entry
    }

    /// Entry for a removed entity
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::base(Operation::Delete, entity_type, entity_id.into());
        entry.entity_name = entity_name;
        entry.before = Self::scrub(entity);
        entry
    }

    /// Attribute the entry to a user
    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Serialize an entity, dropping credential fields and the ATM history
    fn scrub<T: Serialize>(entity: &T) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(entity).ok()?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("password_hash");
            obj.remove("pin_hash");
            obj.remove("transactions");
        }
        Some(value)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(actor) = &self.actor {
            output.push_str(&format!(" by {}", actor));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry() {
        let data = json!({"id": "P0004", "name": "USB-C Hub", "quantity": 12});
        let entry = AuditEntry::create(
            EntityType::Product,
            "P0004",
            Some("USB-C Hub".to_string()),
            &data,
        )
        .by("admin");

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.actor.as_deref(), Some("admin"));
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["quantity"], 12);
    }

    #[test]
    fn test_scrub_removes_credentials() {
        let before = json!({"username": "clerk", "password_hash": "$argon2id$a", "role": "staff"});
        let after = json!({"username": "clerk", "password_hash": "$argon2id$b", "role": "admin"});

        let entry = AuditEntry::update(
            EntityType::User,
            "clerk",
            None,
            &before,
            &after,
            Some("role: \"staff\" -> \"admin\"".into()),
        );

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"role\":\"admin\""));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(EntityType::Product, "P0003", None, &json!({"name": "Stand"}));
        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let entry = AuditEntry::create(EntityType::AtmAccount, "atm", None, &json!({"balance": 1}));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"entity_type\":\"atm_account\""));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entity_type, EntityType::AtmAccount);
    }

    #[test]
    fn test_entity_type_parse() {
        assert_eq!(EntityType::parse("ATM"), Some(EntityType::AtmAccount));
        assert_eq!(EntityType::parse("products"), Some(EntityType::Product));
        assert_eq!(EntityType::parse("stock"), None);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Product,
            "P0002",
            Some("Wireless Mouse".to_string()),
            &json!({"price": 2550}),
            &json!({"price": 2799}),
            Some("price: 2550 -> 2799".into()),
        )
        .by("clerk");

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE Product P0002 (Wireless Mouse) by clerk"));
        assert!(formatted.contains("Changes: price: 2550 -> 2799"));
    }
}
