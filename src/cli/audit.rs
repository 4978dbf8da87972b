//! Audit log CLI command

use clap::Args;

use crate::audit::{AuditFilter, EntityType};
use crate::error::{KioskError, KioskResult};
use crate::storage::Storage;

/// Audit log arguments
#[derive(Args)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Only this entity type (atm, product, user)
    #[arg(short, long)]
    pub entity: Option<String>,

    /// Only this entity ID (e.g., P0002 or a username)
    #[arg(long)]
    pub id: Option<String>,

    /// Only changes made by this user ("atm" for keypad sessions)
    #[arg(short, long)]
    pub actor: Option<String>,
}

/// Show recent audit entries, newest first
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> KioskResult<()> {
    let entity_type = args
        .entity
        .as_deref()
        .map(|e| {
            EntityType::parse(e).ok_or_else(|| {
                KioskError::Validation(format!(
                    "Invalid entity type: '{}'. Valid types: atm, product, user",
                    e
                ))
            })
        })
        .transpose()?;

    let filter = AuditFilter {
        entity_type,
        entity_id: args.id,
        actor: args.actor,
    };
    let entries = storage.audit().query(&filter, args.limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
