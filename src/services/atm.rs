//! ATM service
//!
//! Business rules for the single ATM account: PIN checks, withdrawals in
//! fixed steps above a reserved balance, deposits, PIN changes and the
//! mini statement. Every operation is persisted before it returns and
//! leaves an entry in the account history.

use crate::audit::EntityType;
use crate::config::settings::AtmSettings;
use crate::crypto::{hash_secret, verify_secret};
use crate::error::{KioskError, KioskResult};
use crate::models::atm::is_well_formed_pin;
use crate::models::{AtmAccount, AtmTransaction, AtmTransactionKind, Money};
use crate::storage::Storage;

/// Actor name used for ATM audit entries
const ATM_ACTOR: &str = "atm";

/// Service for ATM operations
pub struct AtmService<'a> {
    storage: &'a Storage,
    rules: &'a AtmSettings,
}

/// Snapshot returned by [`AtmService::statement`]
#[derive(Debug, Clone)]
pub struct Statement {
    /// Most recent events, newest first
    pub entries: Vec<AtmTransaction>,
    pub balance: Money,
}

impl<'a> AtmService<'a> {
    pub fn new(storage: &'a Storage, rules: &'a AtmSettings) -> Self {
        Self { storage, rules }
    }

    pub fn rules(&self) -> &AtmSettings {
        self.rules
    }

    /// Check a PIN against the stored one
    pub fn verify_pin(&self, pin: &str) -> KioskResult<()> {
        if !is_well_formed_pin(pin) {
            return Err(KioskError::Validation("PIN must be 4 digits".into()));
        }
        let account = self.storage.atm.get()?;
        if verify_secret(pin, &account.pin_hash)? {
            Ok(())
        } else {
            tracing::warn!("ATM login with incorrect PIN");
            Err(KioskError::Authentication("Incorrect PIN".into()))
        }
    }

    /// Current balance; recorded as a balance check
    pub fn balance(&self) -> KioskResult<Money> {
        let mut account = self.storage.atm.get()?;
        account.record(AtmTransactionKind::BalanceCheck, self.rules.history_limit);
        let balance = account.balance;
        self.commit(account)?;
        Ok(balance)
    }

    /// Withdraw `amount`, returning the new balance
    pub fn withdraw(&self, amount: Money) -> KioskResult<Money> {
        let step = self.rules.withdrawal_step;
        if !amount.is_positive() || !amount.is_multiple_of(step) {
            return Err(KioskError::Validation(format!(
                "Amount must be in multiples of {}",
                step.format_whole()
            )));
        }

        let mut account = self.storage.atm.get()?;
        let available = account.balance - self.rules.minimum_balance;
        if amount >= available {
            tracing::info!(requested = %amount, available = %available, "withdrawal refused");
            return Err(KioskError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        let before = account.clone();
        account.balance -= amount;
        account.record(AtmTransactionKind::Withdrawal(amount), self.rules.history_limit);
        self.commit_audited(&before, account.clone())?;

        tracing::info!(amount = %amount, balance = %account.balance, "withdrawal");
        Ok(account.balance)
    }

    /// Deposit `amount`, returning the new balance
    pub fn deposit(&self, amount: Money) -> KioskResult<Money> {
        if !amount.is_positive() {
            return Err(KioskError::Validation(
                "Deposit amount must be greater than 0".into(),
            ));
        }

        let mut account = self.storage.atm.get()?;
        let before = account.clone();
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| KioskError::Validation("Amount is too large".into()))?;
        account.record(AtmTransactionKind::Deposit(amount), self.rules.history_limit);
        self.commit_audited(&before, account.clone())?;

        tracing::info!(amount = %amount, balance = %account.balance, "deposit");
        Ok(account.balance)
    }

    /// Validate a proposed new PIN and its confirmation without storing it
    pub fn check_new_pin(&self, new_pin: &str, confirm: &str) -> KioskResult<()> {
        if !is_well_formed_pin(new_pin) || !is_well_formed_pin(confirm) {
            return Err(KioskError::Validation("PIN must be 4 digits".into()));
        }
        if new_pin != confirm {
            return Err(KioskError::Validation("PINs don't match".into()));
        }
        Ok(())
    }

    /// Verify the current PIN as the first step of a PIN change
    pub fn verify_current_pin(&self, current: &str) -> KioskResult<()> {
        match self.verify_pin(current) {
            Err(KioskError::Authentication(_)) => {
                Err(KioskError::Authentication("Incorrect current PIN".into()))
            }
            other => other,
        }
    }

    /// Store a new PIN that has already been verified and confirmed
    pub fn set_pin(&self, new_pin: &str) -> KioskResult<()> {
        if !is_well_formed_pin(new_pin) {
            return Err(KioskError::Validation("PIN must be 4 digits".into()));
        }
        let mut account = self.storage.atm.get()?;
        let before = account.clone();
        account.pin_hash = hash_secret(new_pin)?;
        account.record(AtmTransactionKind::PinChanged, self.rules.history_limit);
        self.commit_audited(&before, account)?;

        tracing::info!("ATM PIN changed");
        Ok(())
    }

    /// Change the PIN in one step
    pub fn change_pin(&self, current: &str, new_pin: &str, confirm: &str) -> KioskResult<()> {
        self.verify_current_pin(current)?;
        self.check_new_pin(new_pin, confirm)?;
        self.set_pin(new_pin)
    }

    /// Latest events, newest first, plus the balance
    ///
    /// The snapshot is taken before the viewing itself is recorded.
    pub fn statement(&self) -> KioskResult<Statement> {
        let mut account = self.storage.atm.get()?;
        let statement = Statement {
            entries: account.recent(self.rules.statement_size),
            balance: account.balance,
        };
        account.record(AtmTransactionKind::StatementViewed, self.rules.history_limit);
        self.commit(account)?;
        Ok(statement)
    }

    fn commit(&self, account: AtmAccount) -> KioskResult<()> {
        self.storage.atm.set(account)?;
        self.storage.atm.save()
    }

    fn commit_audited(&self, before: &AtmAccount, account: AtmAccount) -> KioskResult<()> {
        self.commit(account.clone())?;
        self.storage.log_update(
            ATM_ACTOR,
            EntityType::AtmAccount,
            "atm",
            None,
            before,
            &account,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KioskPaths;
    use crate::config::settings::Settings;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KioskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        initialize_storage(&paths, &settings).unwrap();
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage, settings)
    }

    #[test]
    fn test_verify_pin() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        assert!(atm.verify_pin("1234").is_ok());
        assert!(matches!(
            atm.verify_pin("4321"),
            Err(KioskError::Authentication(_))
        ));
        let err = atm.verify_pin("123").unwrap_err();
        assert_eq!(err.notice(), "PIN must be 4 digits");
    }

    #[test]
    fn test_withdraw_not_multiple() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        let err = atm.withdraw(Money::from_dollars(150)).unwrap_err();
        assert_eq!(err.notice(), "Amount must be in multiples of $100");
        assert_eq!(storage.atm.get().unwrap().balance, Money::from_dollars(1000));
    }

    #[test]
    fn test_withdraw_keeps_reserve() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        let err = atm.withdraw(Money::from_dollars(900)).unwrap_err();
        assert!(matches!(err, KioskError::InsufficientFunds { .. }));
        assert_eq!(err.notice(), "Insufficient funds");

        assert_eq!(
            atm.withdraw(Money::from_dollars(800)).unwrap(),
            Money::from_dollars(200)
        );
        assert!(atm.withdraw(Money::from_dollars(100)).is_err());
    }

    #[test]
    fn test_withdraw_zero_rejected() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);
        assert!(atm.withdraw(Money::zero()).unwrap_err().is_validation());
    }

    #[test]
    fn test_deposit() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        assert_eq!(
            atm.deposit(Money::from_dollars(50)).unwrap(),
            Money::from_dollars(1050)
        );
        assert!(atm.deposit(Money::zero()).is_err());

        let account = storage.atm.get().unwrap();
        assert_eq!(
            account.transactions.last().unwrap().kind,
            AtmTransactionKind::Deposit(Money::from_dollars(50))
        );
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        let err = atm.deposit(Money::from_cents(i64::MAX - 50)).unwrap_err();
        assert_eq!(err.notice(), "Amount is too large");

        let account = storage.atm.get().unwrap();
        assert_eq!(account.balance, Money::from_dollars(1000));
        assert!(account.transactions.is_empty());
    }

    #[test]
    fn test_change_pin() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        assert_eq!(
            atm.change_pin("0000", "5678", "5678").unwrap_err().notice(),
            "Incorrect current PIN"
        );
        assert_eq!(
            atm.change_pin("1234", "5678", "5679").unwrap_err().notice(),
            "PINs don't match"
        );

        atm.change_pin("1234", "5678", "5678").unwrap();
        assert!(atm.verify_pin("5678").is_ok());
        assert!(atm.verify_pin("1234").is_err());
    }

    #[test]
    fn test_history_capped() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        for _ in 0..25 {
            atm.balance().unwrap();
        }
        assert_eq!(storage.atm.get().unwrap().transactions.len(), 20);
    }

    #[test]
    fn test_statement_newest_first() {
        let (_temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);

        for dollars in 1..=6 {
            atm.deposit(Money::from_dollars(dollars)).unwrap();
        }
        let statement = atm.statement().unwrap();

        assert_eq!(statement.entries.len(), 5);
        assert_eq!(
            statement.entries[0].kind,
            AtmTransactionKind::Deposit(Money::from_dollars(6))
        );
        assert_eq!(statement.balance, Money::from_dollars(1021));

        let account = storage.atm.get().unwrap();
        assert_eq!(
            account.transactions.last().unwrap().kind,
            AtmTransactionKind::StatementViewed
        );
    }

    #[test]
    fn test_changes_persist_and_audit() {
        let (temp, storage, settings) = create_test_storage();
        let atm = AtmService::new(&storage, &settings.atm);
        atm.withdraw(Money::from_dollars(200)).unwrap();

        let reopened =
            Storage::open(KioskPaths::with_base_dir(temp.path().to_path_buf())).unwrap();
        assert_eq!(reopened.atm.get().unwrap().balance, Money::from_dollars(800));

        let audit = reopened.audit().read_recent(1).unwrap();
        assert_eq!(audit[0].entity_type, EntityType::AtmAccount);
        assert!(audit[0].diff_summary.as_deref().unwrap().contains("balance"));
    }
}
