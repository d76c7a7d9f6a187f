//! Defines the app level error type and conversions to rendered HTML pages and JSON bodies.
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    html::error_view, internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// The ways a transaction creation request can be malformed or incomplete.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// A required field was absent, empty, or zero.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The amount was not a number, or not greater than zero.
    #[error("Amount must be a positive number")]
    NonPositiveAmount,

    /// The transaction type was something other than "income" or "expense".
    #[error("Type must be either income or expense, got \"{0}\"")]
    InvalidType(String),

    /// The date could not be parsed as a calendar date.
    #[error("Invalid date \"{0}\", expected a date in the format YYYY-MM-DD")]
    InvalidDate(String),
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction creation request failed validation.
    ///
    /// The client should fix the request and try again, retrying the same
    /// request will fail again.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The category name used to create a transaction does not refer to an
    /// existing category.
    #[error("Category not found: \"{0}\"")]
    CategoryNotFound(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The operation is acknowledged by the UI but has no backing implementation.
    #[error("{0} is not yet available")]
    NotImplemented(&'static str),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while writing transactions as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

/// The JSON body sent to API clients when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// A human readable reason for the failure.
    pub error: String,
}

impl Error {
    /// The HTTP status code that best describes the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::CategoryNotFound(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into an HTTP response with a JSON body of the form
    /// `{"error": "..."}`.
    ///
    /// Errors that are not the client's fault are logged and replaced with a
    /// generic message.
    pub fn into_json_response(self) -> Response {
        let status_code = self.status_code();

        let message = match self {
            Error::Validation(error) => error.to_string(),
            Error::CategoryNotFound(_) => "Category not found".to_owned(),
            Error::NotFound => "The requested resource could not be found".to_owned(),
            Error::NotImplemented(feature) => format!("{feature} is not yet available"),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
        };

        (status_code, Json(ErrorBody { error: message })).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            error @ (Error::Validation(_) | Error::CategoryNotFound(_)) => (
                StatusCode::BAD_REQUEST,
                Html(
                    error_view(
                        "Bad Request",
                        "400",
                        &error.to_string(),
                        "Check your input and try again.",
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::NotImplemented(feature) => (
                StatusCode::NOT_IMPLEMENTED,
                Html(
                    error_view(
                        "Not Implemented",
                        "501",
                        &format!("{feature} is not yet available."),
                        "This feature will be added in a future version.",
                    )
                    .into_string(),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
