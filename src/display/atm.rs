//! ATM statement formatting

use crate::services::Statement;

/// Timestamp format used on statement lines ("06/14 09:30")
pub const STATEMENT_DATE_FORMAT: &str = "%m/%d %H:%M";

/// Statement as screen lines: a header, three lines per event, then the balance
pub fn statement_lines(statement: &Statement, size: usize) -> Vec<String> {
    let mut lines = vec![format!("=== Last {} Transactions ===", size)];
    if statement.entries.is_empty() {
        lines.push("No transactions yet".to_string());
    }
    for txn in &statement.entries {
        lines.push(format!(
            "{}: {}",
            txn.date.format(STATEMENT_DATE_FORMAT),
            txn.kind
        ));
        lines.push(format!("Balance: {}", txn.balance.format_whole()));
        lines.push("-".repeat(40));
    }
    lines.push(format!(
        "Current Balance: {}",
        statement.balance.format_whole()
    ));
    lines
}

/// Statement as a single block of text
pub fn format_statement(statement: &Statement, size: usize) -> String {
    let mut output = statement_lines(statement, size).join("\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AtmTransaction, AtmTransactionKind, Money};
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_statement_lines() {
        let statement = Statement {
            entries: vec![
                AtmTransaction {
                    kind: AtmTransactionKind::Withdrawal(Money::from_dollars(200)),
                    balance: Money::from_dollars(800),
                    date: at(9, 30),
                },
                AtmTransaction {
                    kind: AtmTransactionKind::BalanceCheck,
                    balance: Money::from_dollars(1000),
                    date: at(9, 5),
                },
            ],
            balance: Money::from_dollars(800),
        };

        let lines = statement_lines(&statement, 5);
        assert_eq!(lines[0], "=== Last 5 Transactions ===");
        assert_eq!(lines[1], "06/14 09:30: Withdrawal: $200");
        assert_eq!(lines[2], "Balance: $800");
        assert_eq!(lines[4], "06/14 09:05: Balance Check");
        assert_eq!(lines.last().unwrap(), "Current Balance: $800");
    }

    #[test]
    fn test_empty_statement() {
        let statement = Statement {
            entries: Vec::new(),
            balance: Money::from_dollars(1000),
        };
        let text = format_statement(&statement, 5);
        assert!(text.contains("No transactions yet"));
        assert!(text.ends_with("Current Balance: $1000\n"));
    }
}
