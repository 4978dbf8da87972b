//! ATM account model
//!
//! A single cash account guarded by a 4-digit PIN, with a short rolling
//! statement of the most recent events.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Number of digits in an ATM PIN
pub const PIN_LENGTH: usize = 4;

/// What happened in an ATM event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtmTransactionKind {
    BalanceCheck,
    Withdrawal(Money),
    Deposit(Money),
    PinChanged,
    StatementViewed,
}

impl fmt::Display for AtmTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BalanceCheck => write!(f, "Balance Check"),
            Self::Withdrawal(amount) => write!(f, "Withdrawal: {}", amount.format_whole()),
            Self::Deposit(amount) => write!(f, "Deposit: {}", amount.format_whole()),
            Self::PinChanged => write!(f, "PIN Changed"),
            Self::StatementViewed => write!(f, "Statement Viewed"),
        }
    }
}

/// One line of the ATM statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmTransaction {
    #[serde(rename = "type")]
    pub kind: AtmTransactionKind,

    /// Balance right after the event
    pub balance: Money,

    /// Local wall-clock time of the event
    pub date: NaiveDateTime,
}

impl AtmTransaction {
    /// Create a transaction stamped with the current local time
    pub fn now(kind: AtmTransactionKind, balance: Money) -> Self {
        Self {
            kind,
            balance,
            date: Local::now().naive_local(),
        }
    }
}

/// The ATM account as persisted in atm.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmAccount {
    /// Argon2 PHC string of the PIN
    pub pin_hash: String,

    /// Current balance
    pub balance: Money,

    /// Most recent events, oldest first
    #[serde(default)]
    pub transactions: Vec<AtmTransaction>,
}

impl AtmAccount {
    /// Create an account with an already-hashed PIN
    pub fn new(pin_hash: impl Into<String>, balance: Money) -> Self {
        Self {
            pin_hash: pin_hash.into(),
            balance,
            transactions: Vec::new(),
        }
    }

    /// Append an event, keeping only the newest `limit` entries
    ///
    /// A limit of zero is treated as one so the latest event is always kept.
    pub fn record(&mut self, kind: AtmTransactionKind, limit: usize) -> &AtmTransaction {
        let limit = limit.max(1);
        self.transactions.push(AtmTransaction::now(kind, self.balance));
        if self.transactions.len() > limit {
            let excess = self.transactions.len() - limit;
            self.transactions.drain(..excess);
        }
        &self.transactions[self.transactions.len() - 1]
    }

    /// The newest `count` events, newest first
    pub fn recent(&self, count: usize) -> Vec<AtmTransaction> {
        self.transactions.iter().rev().take(count).cloned().collect()
    }
}

/// Check that a PIN is exactly four ASCII digits
pub fn is_well_formed_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(
            AtmTransactionKind::Withdrawal(Money::from_dollars(200)).to_string(),
            "Withdrawal: $200"
        );
        assert_eq!(
            AtmTransactionKind::Deposit(Money::from_dollars(50)).to_string(),
            "Deposit: $50"
        );
        assert_eq!(AtmTransactionKind::PinChanged.to_string(), "PIN Changed");
    }

    #[test]
    fn test_record_caps_history() {
        let mut account = AtmAccount::new("hash", Money::from_dollars(1000));
        for _ in 0..25 {
            account.record(AtmTransactionKind::BalanceCheck, 20);
        }
        assert_eq!(account.transactions.len(), 20);
    }

    #[test]
    fn test_record_keeps_newest() {
        let mut account = AtmAccount::new("hash", Money::from_dollars(1000));
        account.record(AtmTransactionKind::BalanceCheck, 2);
        account.record(AtmTransactionKind::PinChanged, 2);
        account.record(AtmTransactionKind::StatementViewed, 2);

        let kinds: Vec<_> = account.transactions.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![AtmTransactionKind::PinChanged, AtmTransactionKind::StatementViewed]
        );
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut account = AtmAccount::new("hash", Money::from_dollars(1000));
        account.record(AtmTransactionKind::BalanceCheck, 20);
        account.record(AtmTransactionKind::PinChanged, 20);

        let recent = account.recent(5);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].kind, AtmTransactionKind::PinChanged);
    }

    #[test]
    fn test_pin_shape() {
        assert!(is_well_formed_pin("1234"));
        assert!(is_well_formed_pin("0000"));
        assert!(!is_well_formed_pin("123"));
        assert!(!is_well_formed_pin("12345"));
        assert!(!is_well_formed_pin("12a4"));
    }

    #[test]
    fn test_serialization_shape() {
        let mut account = AtmAccount::new("hash", Money::from_dollars(900));
        account.record(AtmTransactionKind::Withdrawal(Money::from_dollars(100)), 20);

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["balance"], 90_000);
        assert_eq!(json["transactions"][0]["type"]["withdrawal"], 10_000);
    }
}
