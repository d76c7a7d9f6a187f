//! Database functions for storing and listing transactions.

use rusqlite::{Connection, Row, types::Type};

use crate::{Error, database_id::new_id};

use super::core::{NewTransaction, Transaction};

/// Store a validated transaction and return it with its generated ID.
///
/// The category is looked up by name at insert time.
///
/// # Errors
/// This function will return a:
/// - [Error::CategoryNotFound] if no category has the transaction's category name,
/// - [Error::JSONSerializationError] if the tags cannot be encoded,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let id = new_id();
    let tags = serde_json::to_string(&new_transaction.tags)?;

    let rows_inserted = connection.execute(
        "INSERT INTO \"transaction\" (id, date, description, amount, type, tags, category_id)
         SELECT ?1, ?2, ?3, ?4, ?5, ?6, category.id FROM category WHERE category.name = ?7",
        (
            &id,
            new_transaction.date,
            &new_transaction.description,
            new_transaction.amount,
            new_transaction.kind,
            &tags,
            &new_transaction.category,
        ),
    )?;

    if rows_inserted == 0 {
        return Err(Error::CategoryNotFound(new_transaction.category));
    }

    Ok(new_transaction.with_id(id))
}

/// Retrieve every transaction with its category name, newest first.
///
/// Transactions on the same date are returned in the order they were created.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be mapped.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT t.id, t.date, t.description, c.name, t.amount, t.type, t.tags
             FROM \"transaction\" t
             INNER JOIN category c ON t.category_id = c.id
             ORDER BY t.date DESC, t.rowid ASC",
        )?
        .query_map([], map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount > 0),
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            tags TEXT NOT NULL DEFAULT '[]',
            category_id TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE RESTRICT
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns id, date, description, category name, amount, type, tags.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_tags: String = row.get(6)?;
    let tags = serde_json::from_str(&raw_tags).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(error))
    })?;

    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        amount: row.get(4)?,
        kind: row.get(5)?,
        tags,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::{initialize, seed_categories},
        transaction::{NewTransaction, TransactionType},
    };

    use super::{count_transactions, create_transaction, get_all_transactions};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        seed_categories(&conn).unwrap();
        conn
    }

    fn new_transaction(day: u8, category: &str) -> NewTransaction {
        NewTransaction {
            date: date!(2024 - 01 - 01).replace_day(day).unwrap(),
            description: format!("transaction on day {day}"),
            category: category.to_owned(),
            amount: 100.0,
            kind: TransactionType::Expense,
            tags: vec!["tag".to_owned()],
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let transaction = create_transaction(new_transaction(16, "食費"), &conn)
            .expect("Could not create transaction");

        assert!(!transaction.id.is_empty());
        assert_eq!(transaction.category, "食費");
        assert_eq!(get_all_transactions(&conn).unwrap(), vec![transaction]);
    }

    #[test]
    fn create_assigns_unique_ids() {
        let conn = get_test_connection();

        let first = create_transaction(new_transaction(1, "食費"), &conn).unwrap();
        let second = create_transaction(new_transaction(1, "食費"), &conn).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn create_fails_on_missing_category() {
        let conn = get_test_connection();

        let result = create_transaction(new_transaction(1, "存在しない"), &conn);

        assert_eq!(result, Err(Error::CategoryNotFound("存在しない".to_owned())));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn tags_round_trip_in_order() {
        let conn = get_test_connection();
        let mut transaction = new_transaction(17, "交通費");
        transaction.tags = vec!["通勤".to_owned(), "定期".to_owned()];

        create_transaction(transaction, &conn).unwrap();

        let stored = get_all_transactions(&conn).unwrap();
        assert_eq!(stored[0].tags, vec!["通勤", "定期"]);
    }

    #[test]
    fn get_all_orders_by_date_descending_then_insertion() {
        let conn = get_test_connection();
        let middle_first = create_transaction(new_transaction(15, "食費"), &conn).unwrap();
        let oldest = create_transaction(new_transaction(2, "食費"), &conn).unwrap();
        let newest = create_transaction(new_transaction(28, "食費"), &conn).unwrap();
        let middle_second = create_transaction(new_transaction(15, "食費"), &conn).unwrap();

        let got = get_all_transactions(&conn).unwrap();

        assert_eq!(got, vec![newest, middle_first, middle_second, oldest]);
    }
}
