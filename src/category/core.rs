//! Core category domain types.

use serde::{Deserialize, Serialize};

use crate::{database_id::CategoryId, transaction::TransactionType};

/// A named, typed grouping for transactions (e.g., '食費', '給与').
///
/// The name is unique and is what transactions use to refer to the category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Whether this category is meant for income or expenses.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// A CSS color used when displaying the category, e.g. "#4caf50".
    pub color: String,
}

/// The data needed to store a new category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub kind: TransactionType,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: &str, kind: TransactionType, color: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            color: color.to_owned(),
        }
    }
}
