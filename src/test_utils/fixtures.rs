use time::{Date, macros::date};

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

fn category(id: &str, name: &str, kind: TransactionType, color: &str) -> Category {
    Category {
        id: id.to_owned(),
        name: name.to_owned(),
        kind,
        color: color.to_owned(),
    }
}

/// The default categories, without touching a database.
pub(crate) fn seed_category_list() -> Vec<Category> {
    vec![
        category("c1", "給与", TransactionType::Income, "#4caf50"),
        category("c2", "副収入", TransactionType::Income, "#8bc34a"),
        category("c3", "投資収入", TransactionType::Income, "#2e7d32"),
        category("c4", "食費", TransactionType::Expense, "#f44336"),
        category("c5", "交通費", TransactionType::Expense, "#ff9800"),
        category("c6", "住居費", TransactionType::Expense, "#e91e63"),
        category("c7", "光熱費", TransactionType::Expense, "#9c27b0"),
        category("c8", "通信費", TransactionType::Expense, "#673ab7"),
        category("c9", "娯楽費", TransactionType::Expense, "#3f51b5"),
        category("c10", "医療費", TransactionType::Expense, "#009688"),
    ]
}

pub(crate) fn make_transaction(
    id: &str,
    date: Date,
    amount: f64,
    kind: TransactionType,
    category: &str,
) -> Transaction {
    Transaction {
        id: id.to_owned(),
        date,
        description: format!("transaction {id}"),
        category: category.to_owned(),
        amount,
        kind,
        tags: Vec::new(),
    }
}

/// The three sample transactions, oldest first.
pub(crate) fn seed_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "t1".to_owned(),
            date: date!(2024 - 01 - 15),
            description: "月給".to_owned(),
            category: "給与".to_owned(),
            amount: 300000.0,
            kind: TransactionType::Income,
            tags: vec!["毎月".to_owned(), "固定収入".to_owned()],
        },
        Transaction {
            id: "t2".to_owned(),
            date: date!(2024 - 01 - 16),
            description: "スーパーでの買い物".to_owned(),
            category: "食費".to_owned(),
            amount: 3500.0,
            kind: TransactionType::Expense,
            tags: vec!["日用品".to_owned(), "食材".to_owned()],
        },
        Transaction {
            id: "t3".to_owned(),
            date: date!(2024 - 01 - 17),
            description: "電車定期券".to_owned(),
            category: "交通費".to_owned(),
            amount: 12000.0,
            kind: TransactionType::Expense,
            tags: vec!["通勤".to_owned(), "定期".to_owned()],
        },
    ]
}
