//! Transaction management for the household ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated `NewTransaction`
//! - Validation of creation requests against the known categories
//! - Database functions for storing and reading transactions
//! - Filtering and sorting driven by the list page's query string
//! - JSON endpoints, the CSV export, the transactions page and the new
//!   transaction form

mod api;
mod core;
mod create_page;
mod db;
mod export;
mod filter;
mod transactions_page;
mod validation;

pub use api::{
    create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
    get_transactions_endpoint,
};
pub use core::{NewTransaction, Transaction, TransactionType};
pub use create_page::{create_transaction_form_endpoint, get_create_transaction_page};
pub use db::{
    count_transactions, create_transaction, create_transaction_table, get_all_transactions,
};
pub use export::export_transactions_endpoint;
pub use transactions_page::get_transactions_page;
pub use validation::validate_transaction;
