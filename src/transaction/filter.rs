//! Filtering and sorting of an in-memory list of transactions.
//!
//! The list page, the CSV export and any other view of the transaction list
//! share the same [TransactionsQuery], parsed from the URL query string.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::core::{Transaction, TransactionType};

/// Restricts a view to income, expenses, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    fn matches(self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionType::Income,
            TypeFilter::Expense => kind == TransactionType::Expense,
        }
    }
}

/// Restricts a view to a single category, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

/// The criteria a transaction must meet to be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: TypeFilter,
    pub category: CategoryFilter,
    /// Matched case-insensitively against the description and each tag.
    /// An empty string matches everything.
    pub search_term: String,
}

impl TransactionFilter {
    /// Whether `transaction` passes every criterion of the filter.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let category_match = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => &transaction.category == name,
        };

        self.kind.matches(transaction.kind)
            && category_match
            && contains_search_term(transaction, &self.search_term.to_lowercase())
    }
}

fn contains_search_term(transaction: &Transaction, lowercase_term: &str) -> bool {
    lowercase_term.is_empty()
        || transaction
            .description
            .to_lowercase()
            .contains(lowercase_term)
        || transaction
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(lowercase_term))
}

/// The field to sort transactions by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Description,
    Amount,
    Category,
    Type,
}

impl SortKey {
    /// The name used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Description => "description",
            SortKey::Amount => "amount",
            SortKey::Category => "category",
            SortKey::Type => "type",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Description => a.description.cmp(&b.description),
            SortKey::Amount => a.amount.total_cmp(&b.amount),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Type => a.kind.as_str().cmp(b.kind.as_str()),
        }
    }
}

/// The order to sort transactions in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Sort in order of increasing value.
    #[serde(rename = "asc")]
    Ascending,
    /// Sort in order of decreasing value.
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The name used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Filter `transactions` and sort the survivors by `key` in `direction`.
///
/// The sort is stable in both directions: transactions with equal keys keep
/// their relative input order. The input is left untouched.
pub fn filter_and_sort(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    key: SortKey,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut filtered: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| match direction {
        SortDirection::Ascending => key.compare(a, b),
        SortDirection::Descending => key.compare(a, b).reverse(),
    });

    filtered
}

/// View options for the transaction list, as found in the URL query string.
///
/// Missing parameters fall back to showing everything, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsQuery {
    #[serde(default, rename = "type")]
    pub kind: TypeFilter,
    /// A category name, or "all".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub order: SortDirection,
}

/// The query value that selects every category.
pub const ALL_CATEGORIES: &str = "all";

impl TransactionsQuery {
    /// The filter criteria described by the query.
    pub fn filter(&self) -> TransactionFilter {
        let category = match self.category.as_deref() {
            None | Some("") | Some(ALL_CATEGORIES) => CategoryFilter::All,
            Some(name) => CategoryFilter::Named(name.to_owned()),
        };

        TransactionFilter {
            kind: self.kind,
            category,
            search_term: self.search.clone(),
        }
    }

    /// Apply the query's filter and sort to `transactions`.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        filter_and_sort(transactions, &self.filter(), self.sort, self.order)
    }

    /// The query for clicking the column header for `key`.
    ///
    /// Clicking the active column while it is ascending switches to
    /// descending, anything else sorts ascending by `key`.
    pub fn with_sort_toggled(&self, key: SortKey) -> Self {
        let order = if self.sort == key && self.order == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        Self {
            sort: key,
            order,
            ..self.clone()
        }
    }

    /// Encode the query for use in a link, e.g. "type=expense&sort=date&order=asc".
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self)
            .inspect_err(|error| tracing::error!("could not encode transactions query: {error}"))
            .unwrap_or_default()
    }

    /// Build a URL to `route` carrying this query.
    pub fn to_url(&self, route: &str) -> String {
        format!("{route}?{}", self.to_query_string())
    }
}
