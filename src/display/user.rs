//! User display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// Format users as a table; password hashes are never shown
pub fn format_user_table(users: &[User], date_format: &str) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let rows = users.iter().map(|user| UserRow {
        username: user.username.clone(),
        role: user.role.to_string(),
        created: user.created_at.format(date_format).to_string(),
    });

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_user_table_hides_hash() {
        let users = vec![
            User::new("admin", "$argon2id$secret", Role::Admin),
            User::new("clerk", "$argon2id$other", Role::Staff),
        ];
        let table = format_user_table(&users, "%Y-%m-%d");

        assert!(table.contains("admin"));
        assert!(table.contains("staff"));
        assert!(!table.contains("argon2"));
    }
}
