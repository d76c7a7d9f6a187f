//! Defines the JSON endpoints for listing, creating, editing and deleting transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error, category::get_all_categories, database_id::TransactionId,
    error::ErrorBody,
};

use super::{
    core::Transaction,
    db::{create_transaction, get_all_transactions},
    validation::{TransactionPayload, validate_transaction},
};

/// The state needed to read or create transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TransactionList {
    transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
struct CreatedTransaction {
    transaction: Transaction,
    message: &'static str,
}

/// A route handler that returns every transaction, newest first, as
/// `{"transactions": [...]}`.
pub async fn get_transactions_endpoint(State(state): State<TransactionState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match get_all_transactions(&connection) {
        Ok(transactions) => Json(TransactionList { transactions }).into_response(),
        Err(error) => {
            tracing::error!("could not get transactions: {error}");
            error.into_json_response()
        }
    }
}

/// A route handler for creating a new transaction from a JSON body.
///
/// Responds with `201 Created` and the stored transaction on success, or
/// `400 Bad Request` with `{"error": "..."}` if the request is invalid or
/// names a category that does not exist.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("rejected transaction body: {rejection}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    let result = get_all_categories(&connection)
        .and_then(|categories| validate_transaction(payload, &categories))
        .and_then(|new_transaction| create_transaction(new_transaction, &connection));

    match result {
        Ok(transaction) => {
            tracing::info!(
                "Created transaction {} for {} on {}",
                transaction.id,
                transaction.amount,
                transaction.date
            );

            (
                StatusCode::CREATED,
                Json(CreatedTransaction {
                    transaction,
                    message: "Transaction created successfully",
                }),
            )
                .into_response()
        }
        Err(error) => {
            tracing::debug!("could not create transaction: {error}");
            error.into_json_response()
        }
    }
}

/// A route handler for editing a transaction.
///
/// Editing is shown in the UI but not supported yet, so this always responds
/// with `501 Not Implemented`.
pub async fn edit_transaction_endpoint(Path(transaction_id): Path<TransactionId>) -> Response {
    tracing::debug!("Received edit request for transaction {transaction_id}");
    Error::NotImplemented("Editing transactions").into_json_response()
}

/// A route handler for deleting a transaction.
///
/// Deleting is shown in the UI but not supported yet, so this always responds
/// with `501 Not Implemented`.
pub async fn delete_transaction_endpoint(Path(transaction_id): Path<TransactionId>) -> Response {
    tracing::debug!("Received delete request for transaction {transaction_id}");
    Error::NotImplemented("Deleting transactions").into_json_response()
}
