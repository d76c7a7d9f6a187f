/*! Database schema initialization and seeding. */

use rusqlite::Connection;
use time::macros::date;

use crate::{
    Error,
    category::{NewCategory, create_category, create_category_table},
    transaction::{
        NewTransaction, TransactionType, count_transactions, create_transaction,
        create_transaction_table,
    },
};

/// Create the tables for the domain models if they do not already exist.
///
/// The tables are created in a single transaction so that a
/// database is never left half initialized.
///
/// # Errors
/// Returns an [Error::SqlError] if any of the tables cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Has no effect inside a transaction, so it must be set first.
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction = connection.unchecked_transaction()?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// The categories every new database starts with: (name, type, color).
const DEFAULT_CATEGORIES: [(&str, TransactionType, &str); 10] = [
    ("給与", TransactionType::Income, "#4caf50"),
    ("副収入", TransactionType::Income, "#8bc34a"),
    ("投資収入", TransactionType::Income, "#2e7d32"),
    ("食費", TransactionType::Expense, "#f44336"),
    ("交通費", TransactionType::Expense, "#ff9800"),
    ("住居費", TransactionType::Expense, "#e91e63"),
    ("光熱費", TransactionType::Expense, "#9c27b0"),
    ("通信費", TransactionType::Expense, "#673ab7"),
    ("娯楽費", TransactionType::Expense, "#3f51b5"),
    ("医療費", TransactionType::Expense, "#009688"),
];

/// Insert the default categories, skipping any that already exist.
///
/// # Errors
/// Returns an [Error::SqlError] if a category cannot be inserted.
pub fn seed_categories(connection: &Connection) -> Result<(), Error> {
    for (name, kind, color) in DEFAULT_CATEGORIES {
        create_category(NewCategory::new(name, kind, color), connection)?;
    }

    Ok(())
}

fn sample_transactions() -> Vec<NewTransaction> {
    vec![
        NewTransaction {
            date: date!(2024 - 01 - 15),
            description: "月給".to_owned(),
            category: "給与".to_owned(),
            amount: 300_000.0,
            kind: TransactionType::Income,
            tags: vec!["毎月".to_owned(), "固定収入".to_owned()],
        },
        NewTransaction {
            date: date!(2024 - 01 - 16),
            description: "スーパーでの買い物".to_owned(),
            category: "食費".to_owned(),
            amount: 3_500.0,
            kind: TransactionType::Expense,
            tags: vec!["日用品".to_owned(), "食材".to_owned()],
        },
        NewTransaction {
            date: date!(2024 - 01 - 17),
            description: "電車定期券".to_owned(),
            category: "交通費".to_owned(),
            amount: 12_000.0,
            kind: TransactionType::Expense,
            tags: vec!["通勤".to_owned(), "定期".to_owned()],
        },
    ]
}

/// Seed the database with the default categories and, if there are no
/// transactions yet, a handful of sample transactions.
///
/// Running this more than once does not duplicate any data.
///
/// # Errors
/// Returns an [Error::SqlError] if the data cannot be inserted.
pub fn seed(connection: &Connection) -> Result<(), Error> {
    seed_categories(connection)?;

    if count_transactions(connection)? > 0 {
        tracing::info!("Skipping sample transactions, the database already has transactions");
        return Ok(());
    }

    for transaction in sample_transactions() {
        create_transaction(transaction, connection)?;
    }

    Ok(())
}
