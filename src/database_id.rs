//! Identifier types for stored records.

/// Identifier of a stored transaction, a UUID v4 string.
pub type TransactionId = String;

/// Identifier of a stored category, a UUID v4 string.
pub type CategoryId = String;

/// Generate a fresh identifier for a new record.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
