//! Backup CLI commands
//!
//! Implements CLI commands for backup management. Restoring and pruning
//! are limited to administrators.

use clap::Subcommand;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::KioskPaths;
use crate::config::settings::Settings;
use crate::error::{KioskError, KioskResult};
use crate::models::User;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Restore from a backup (administrators only)
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Delete old backups according to retention policy (administrators only)
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &KioskPaths,
    settings: &Settings,
    user: &User,
    cmd: BackupCommands,
) -> KioskResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let (backup_path, deleted) = manager.create_backup_with_retention()?;
            let filename = backup_path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| backup_path.display().to_string());
            println!("Backup created: {}", filename);
            println!("Location: {}", backup_path.display());
            if !deleted.is_empty() {
                println!("Removed {} old backup(s) per retention policy.", deleted.len());
            }
        }

        BackupCommands::List { detailed } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: kiosk backup create");
                return Ok(());
            }

            println!("Available Backups");
            println!("=================");
            println!();

            for (i, backup) in backups.iter().enumerate() {
                let age = chrono::Utc::now().signed_duration_since(backup.created_at);
                let monthly_marker = if backup.is_monthly { " [monthly]" } else { "" };

                if detailed {
                    println!(
                        "{}. {}{}\n   Created: {}\n   Size: {}\n   Age: {}\n",
                        i + 1,
                        backup.filename,
                        monthly_marker,
                        backup.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_size(backup.size_bytes),
                        format_duration(age),
                    );
                } else {
                    println!(
                        "  {}. {} ({} ago, {}){}",
                        i + 1,
                        backup.filename,
                        format_duration(age),
                        format_size(backup.size_bytes),
                        monthly_marker,
                    );
                }
            }

            println!();
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            require_admin(user, "restore backups")?;
            let backup_path = manager.resolve(&backup)?;

            let restore_manager = RestoreManager::new(paths.clone());
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!(
                "Created: {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Status: {}", validation.summary());
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  kiosk backup restore {} --force", backup);
                return Ok(());
            }

            let pre_restore = manager.create_backup()?;
            println!("Current data saved to: {}", pre_restore.display());

            let result = restore_manager.restore_from_file(&backup_path)?;
            println!("Restore complete!");
            println!("{}", result.summary());
            if !result.all_restored() {
                println!("Note: some data files were not present in the backup and were left unchanged.");
            }
        }

        BackupCommands::Prune { force } => {
            require_admin(user, "prune backups")?;
            let retention = &settings.backup_retention;
            let backups = manager.list_backups()?;
            let (monthly, daily): (Vec<_>, Vec<_>) = backups.iter().partition(|b| b.is_monthly);

            let to_delete = daily.len().saturating_sub(retention.daily_count as usize)
                + monthly.len().saturating_sub(retention.monthly_count as usize);

            println!(
                "Retention policy: {} daily, {} monthly",
                retention.daily_count, retention.monthly_count
            );
            println!(
                "Current backups: {} daily, {} monthly",
                daily.len(),
                monthly.len()
            );

            if to_delete == 0 {
                println!("No backups to prune.");
                return Ok(());
            }
            if !force {
                println!("{} backup(s) would be deleted.", to_delete);
                println!("To delete them, run again with --force flag:");
                println!("  kiosk backup prune --force");
                return Ok(());
            }

            let deleted = manager.enforce_retention()?;
            println!("Deleted {} backup(s).", deleted.len());
        }
    }

    Ok(())
}

fn require_admin(user: &User, action: &str) -> KioskResult<()> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(KioskError::PermissionDenied(format!(
            "Only administrators can {}",
            action
        )))
    }
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let minutes = duration.num_minutes();
    if minutes < 1 {
        return format!("{}s", duration.num_seconds().max(0));
    }
    if minutes < 60 {
        return format!("{}m", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    if days < 30 {
        format!("{}d", days)
    } else {
        format!("{}mo", days / 30)
    }
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
