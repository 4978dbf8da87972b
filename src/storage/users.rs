//! User repository
//!
//! Users are keyed by lower-cased username in `users.json`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::KioskResult;
use crate::models::User;

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct UserData {
    pub(crate) users: Vec<User>,
}

/// Repository for inventory users
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<String, User>>,
}

fn key(username: &str) -> String {
    username.trim().to_lowercase()
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> KioskResult<()> {
        let file_data: UserData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_poisoned)?;
        data.clear();
        for user in file_data.users {
            data.insert(key(&user.username), user);
        }
        Ok(())
    }

    pub fn save(&self) -> KioskResult<()> {
        let data = self.data.read().map_err(lock_poisoned)?;
        let file_data = UserData {
            users: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Look up a user (case-insensitive)
    pub fn get(&self, username: &str) -> KioskResult<Option<User>> {
        Ok(self.data.read().map_err(lock_poisoned)?.get(&key(username)).cloned())
    }

    /// All users, sorted by username
    pub fn get_all(&self) -> KioskResult<Vec<User>> {
        Ok(self.data.read().map_err(lock_poisoned)?.values().cloned().collect())
    }

    pub fn exists(&self, username: &str) -> KioskResult<bool> {
        Ok(self.data.read().map_err(lock_poisoned)?.contains_key(&key(username)))
    }

    pub fn admin_count(&self) -> KioskResult<usize> {
        let data = self.data.read().map_err(lock_poisoned)?;
        Ok(data.values().filter(|u| u.role.is_admin()).count())
    }

    pub fn upsert(&self, user: User) -> KioskResult<()> {
        self.data
            .write()
            .map_err(lock_poisoned)?
            .insert(key(&user.username), user);
        Ok(())
    }

    pub fn delete(&self, username: &str) -> KioskResult<Option<User>> {
        Ok(self.data.write().map_err(lock_poisoned)?.remove(&key(username)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

    #[test]
    fn test_case_insensitive_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        repo.upsert(User::new("Clerk", "hash", Role::Staff)).unwrap();

        assert!(repo.exists("clerk").unwrap());
        assert_eq!(repo.get("CLERK").unwrap().unwrap().username, "Clerk");
    }

    #[test]
    fn test_admin_count_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");
        let repo = UserRepository::new(path.clone());
        repo.upsert(User::new("admin", "hash", Role::Admin)).unwrap();
        repo.upsert(User::new("clerk", "hash", Role::Staff)).unwrap();
        repo.save().unwrap();

        let reloaded = UserRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.admin_count().unwrap(), 1);
        assert!(reloaded.delete("clerk").unwrap().is_some());
        assert!(reloaded.delete("clerk").unwrap().is_none());
        assert_eq!(reloaded.get_all().unwrap().len(), 1);
    }
}
