//! ATM account repository
//!
//! The ATM keeps a single account in `atm.json`.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{KioskError, KioskResult};
use crate::models::AtmAccount;

use super::file_io::{read_json, write_json_atomic};
use super::lock_poisoned;

/// Repository for the single ATM account
pub struct AtmRepository {
    path: PathBuf,
    account: RwLock<Option<AtmAccount>>,
}

impl AtmRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            account: RwLock::new(None),
        }
    }

    /// Load the account from disk; a missing file leaves the repository empty
    pub fn load(&self) -> KioskResult<()> {
        let loaded: Option<AtmAccount> = read_json(&self.path)?;
        *self.account.write().map_err(lock_poisoned)? = loaded;
        Ok(())
    }

    /// Save the account to disk
    pub fn save(&self) -> KioskResult<()> {
        let account = self.account.read().map_err(lock_poisoned)?;
        match account.as_ref() {
            Some(account) => write_json_atomic(&self.path, account),
            None => Ok(()),
        }
    }

    /// The current account state
    pub fn get(&self) -> KioskResult<AtmAccount> {
        self.account
            .read()
            .map_err(lock_poisoned)?
            .clone()
            .ok_or_else(|| {
                KioskError::Storage("ATM account is not set up; run `kiosk init`".into())
            })
    }

    pub fn exists(&self) -> KioskResult<bool> {
        Ok(self.account.read().map_err(lock_poisoned)?.is_some())
    }

    /// Replace the stored account
    pub fn set(&self, account: AtmAccount) -> KioskResult<()> {
        *self.account.write().map_err(lock_poisoned)? = Some(account);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AtmTransactionKind, Money};
    use tempfile::TempDir;

    #[test]
    fn test_empty_until_set() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AtmRepository::new(temp_dir.path().join("atm.json"));
        repo.load().unwrap();

        assert!(!repo.exists().unwrap());
        assert!(repo.get().is_err());
        repo.save().unwrap();
        assert!(!temp_dir.path().join("atm.json").exists());
    }

    #[test]
    fn test_set_save_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("atm.json");

        let repo = AtmRepository::new(path.clone());
        let mut account = AtmAccount::new("hash", Money::from_dollars(1000));
        account.record(AtmTransactionKind::Deposit(Money::from_dollars(50)), 20);
        repo.set(account).unwrap();
        repo.save().unwrap();

        let reloaded = AtmRepository::new(path);
        reloaded.load().unwrap();
        let account = reloaded.get().unwrap();
        assert_eq!(account.balance, Money::from_dollars(1000));
        assert_eq!(account.transactions.len(), 1);
    }
}
