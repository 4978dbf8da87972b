//! User service
//!
//! Login and account management for the inventory side. Only administrators
//! create or delete accounts; anyone may change their own password.

use crate::audit::EntityType;
use crate::crypto::{hash_secret, verify_secret};
use crate::error::{KioskError, KioskResult};
use crate::models::{Role, User};
use crate::storage::Storage;

const MIN_PASSWORD_LEN: usize = 6;

pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check credentials and return the matching user
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub fn authenticate(&self, username: &str, password: &str) -> KioskResult<User> {
        let invalid = || KioskError::Authentication("Invalid username or password".into());

        let user = self.storage.users.get(username)?.ok_or_else(|| {
            tracing::warn!(user = %username, "login for unknown user");
            invalid()
        })?;
        if !verify_secret(password, &user.password_hash)? {
            tracing::warn!(user = %user.username, "login with wrong password");
            return Err(invalid());
        }

        tracing::debug!(user = %user.username, role = %user.role, "authenticated");
        Ok(user)
    }

    pub fn get(&self, username: &str) -> KioskResult<Option<User>> {
        self.storage.users.get(username)
    }

    /// All users, sorted by username
    pub fn list(&self) -> KioskResult<Vec<User>> {
        self.storage.users.get_all()
    }

    /// Create an account (admins only)
    pub fn create(&self, actor: &User, username: &str, password: &str, role: Role) -> KioskResult<User> {
        require_admin(actor, "create users")?;

        let username = username.trim();
        if username.is_empty() {
            return Err(KioskError::Validation("Username is required".into()));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(KioskError::Validation(
                "Username cannot contain spaces".into(),
            ));
        }
        if self.storage.users.exists(username)? {
            return Err(KioskError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }
        check_password(password)?;

        let user = User::new(username, hash_secret(password)?, role);
        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;
        self.storage.log_create(
            &actor.username,
            EntityType::User,
            user.username.clone(),
            None,
            &user,
        )?;

        tracing::info!(user = %user.username, role = %role, by = %actor.username, "user created");
        Ok(user)
    }

    /// Delete an account (admins only, never yourself or the last admin)
    pub fn delete(&self, actor: &User, username: &str) -> KioskResult<User> {
        require_admin(actor, "delete users")?;

        let target = self
            .storage
            .users
            .get(username)?
            .ok_or_else(|| KioskError::user_not_found(username.trim()))?;

        if target.username.eq_ignore_ascii_case(&actor.username) {
            return Err(KioskError::Validation(
                "You cannot delete your own account".into(),
            ));
        }
        if target.role.is_admin() && self.storage.users.admin_count()? <= 1 {
            return Err(KioskError::Validation(
                "Cannot delete the last administrator".into(),
            ));
        }

        self.storage.users.delete(&target.username)?;
        self.storage.users.save()?;
        self.storage.log_delete(
            &actor.username,
            EntityType::User,
            target.username.clone(),
            None,
            &target,
        )?;

        tracing::info!(user = %target.username, by = %actor.username, "user deleted");
        Ok(target)
    }

    /// Set a new password for yourself, or for anyone if you are an admin
    pub fn change_password(&self, actor: &User, username: &str, new_password: &str) -> KioskResult<()> {
        if !actor.can_manage(username) {
            return Err(KioskError::PermissionDenied(
                "You can only change your own password".into(),
            ));
        }
        let before = self
            .storage
            .users
            .get(username)?
            .ok_or_else(|| KioskError::user_not_found(username.trim()))?;
        check_password(new_password)?;

        let mut user = before.clone();
        user.password_hash = hash_secret(new_password)?;
        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;
        self.storage.log_update(
            &actor.username,
            EntityType::User,
            user.username.clone(),
            None,
            &before,
            &user,
        )?;

        tracing::info!(user = %user.username, by = %actor.username, "password changed");
        Ok(())
    }
}

fn require_admin(actor: &User, action: &str) -> KioskResult<()> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        Err(KioskError::PermissionDenied(format!(
            "Only administrators can {}",
            action
        )))
    }
}

fn check_password(password: &str) -> KioskResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(KioskError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
