//! Exports the transaction list as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use csv::{QuoteStyle, WriterBuilder};
use rusqlite::Connection;
use time::Date;

use crate::{AppState, Error, timezone::current_local_date};

use super::{
    core::{Transaction, TransactionType},
    db::get_all_transactions,
    filter::TransactionsQuery,
};

const HEADERS: [&str; 6] = ["日付", "摘要", "カテゴリ", "金額", "種別", "タグ"];

/// The state needed to export transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that downloads the filtered and sorted transaction list
/// as `transactions_YYYY-MM-DD.csv`.
///
/// Accepts the same query parameters as the transactions page, so the export
/// matches what the user is looking at.
pub async fn export_transactions_endpoint(
    State(state): State<ExportState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let csv = transactions_to_csv(&query.apply(&transactions))?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(today)),
            ),
        ],
        csv,
    )
        .into_response())
}

fn export_file_name(date: Date) -> String {
    format!("transactions_{date}.csv")
}

/// The label written to the type column.
fn type_label(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => "収入",
        TransactionType::Expense => "支出",
    }
}

/// Write `transactions` as CSV with a header row, quoting every cell.
///
/// The header row and the type column use the Japanese labels. Tags are
/// joined into a single cell separated by "; ".
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for transaction in transactions {
        writer.write_record([
            transaction.date.to_string(),
            transaction.description.clone(),
            transaction.category.clone(),
            transaction.amount.to_string(),
            type_label(transaction.kind).to_owned(),
            transaction.tags.join("; "),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}
