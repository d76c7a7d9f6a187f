//! Validation of transaction creation requests.

use serde::Deserialize;
use serde_json::Value;
use time::{Date, macros::format_description};

use crate::{Error, category::Category, error::ValidationError};

use super::core::{NewTransaction, TransactionType};

/// A transaction creation request as sent by a client.
///
/// Every field is optional so that missing fields can be reported with a
/// useful message instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPayload {
    /// The date in the format YYYY-MM-DD.
    pub date: Option<String>,
    pub description: Option<String>,
    /// The name of an existing category.
    pub category: Option<String>,
    /// Kept as raw JSON so that non-numeric amounts can be rejected with a
    /// validation error.
    pub amount: Option<Value>,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Check a creation request against the required-field and type constraints
/// and resolve its category against `categories`.
///
/// Empty strings count as missing, and so do an amount of zero, `""` or
/// `false`. On success the
/// description is trimmed and the tags default to an empty list.
///
/// # Errors
/// This function will return a:
/// - [Error::Validation] if a field is missing or malformed,
/// - or [Error::CategoryNotFound] if no category in `categories` has the
///   requested name.
pub fn validate_transaction(
    payload: TransactionPayload,
    categories: &[Category],
) -> Result<NewTransaction, Error> {
    let date = require_text(payload.date, "date")?;
    let description = require_text(payload.description, "description")?;
    let category = require_text(payload.category, "category")?;
    let amount = match payload.amount {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            return Err(ValidationError::MissingField("amount").into());
        }
        Some(Value::String(text)) if text.is_empty() => {
            return Err(ValidationError::MissingField("amount").into());
        }
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => {
            return Err(ValidationError::MissingField("amount").into());
        }
        Some(amount) => amount,
    };
    let kind = require_text(payload.kind, "type")?;

    let amount = match amount.as_f64() {
        Some(amount) if amount > 0.0 && amount.is_finite() => amount,
        _ => return Err(ValidationError::NonPositiveAmount.into()),
    };

    let kind: TransactionType = kind.parse()?;

    let date = parse_date(&date)?;

    let description = description.trim().to_owned();
    if description.is_empty() {
        return Err(ValidationError::MissingField("description").into());
    }

    if !categories.iter().any(|candidate| candidate.name == category) {
        return Err(Error::CategoryNotFound(category));
    }

    Ok(NewTransaction {
        date,
        description,
        category,
        amount,
        kind,
        tags: payload.tags.unwrap_or_default(),
    })
}

fn require_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn parse_date(text: &str) -> Result<Date, ValidationError> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        Error, error::ValidationError, test_utils::seed_category_list,
        transaction::TransactionType,
    };

    use super::{TransactionPayload, validate_transaction};

    fn payload(amount: serde_json::Value) -> TransactionPayload {
        serde_json::from_value(json!({
            "date": "2024-01-17",
            "description": "  電車定期券  ",
            "category": "交通費",
            "amount": amount,
            "type": "expense",
            "tags": ["通勤", "定期"],
        }))
        .expect("Could not build payload")
    }

    #[test]
    fn accepts_complete_payload() {
        let categories = seed_category_list();

        let got = validate_transaction(payload(json!(12000)), &categories)
            .expect("Could not validate payload");

        assert_eq!(got.date, date!(2024 - 01 - 17));
        assert_eq!(got.description, "電車定期券");
        assert_eq!(got.category, "交通費");
        assert_eq!(got.amount, 12000.0);
        assert_eq!(got.kind, TransactionType::Expense);
        assert_eq!(got.tags, vec!["通勤", "定期"]);
    }

    #[test]
    fn accepts_smallest_positive_amount() {
        let categories = seed_category_list();

        let got = validate_transaction(payload(json!(0.01)), &categories);

        assert_eq!(got.map(|transaction| transaction.amount), Ok(0.01));
    }

    #[test]
    fn rejects_zero_amount() {
        let categories = seed_category_list();

        let got = validate_transaction(payload(json!(0)), &categories);

        assert_eq!(
            got,
            Err(Error::Validation(ValidationError::MissingField("amount")))
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let categories = seed_category_list();

        let got = validate_transaction(payload(json!(-5)), &categories);

        assert_eq!(got, Err(ValidationError::NonPositiveAmount.into()));
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let categories = seed_category_list();

        let got = validate_transaction(payload(json!("12000")), &categories);

        assert_eq!(got, Err(ValidationError::NonPositiveAmount.into()));
    }

    #[test]
    fn empty_string_and_false_amounts_count_as_missing() {
        let categories = seed_category_list();

        for amount in [json!(""), json!(false), json!(null)] {
            assert_eq!(
                validate_transaction(payload(amount.clone()), &categories),
                Err(ValidationError::MissingField("amount").into()),
                "expected {amount} to be reported as a missing amount"
            );
        }
    }

    #[test]
    fn rejects_missing_fields() {
        let categories = seed_category_list();
        let complete = payload(json!(100));

        let cases = [
            (
                "date",
                TransactionPayload {
                    date: None,
                    ..complete.clone()
                },
            ),
            (
                "description",
                TransactionPayload {
                    description: Some(String::new()),
                    ..complete.clone()
                },
            ),
            (
                "category",
                TransactionPayload {
                    category: None,
                    ..complete.clone()
                },
            ),
            (
                "amount",
                TransactionPayload {
                    amount: None,
                    ..complete.clone()
                },
            ),
            (
                "type",
                TransactionPayload {
                    kind: None,
                    ..complete.clone()
                },
            ),
        ];

        for (field, payload) in cases {
            assert_eq!(
                validate_transaction(payload, &categories),
                Err(ValidationError::MissingField(field).into()),
                "expected missing {field} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_description() {
        let categories = seed_category_list();
        let payload = TransactionPayload {
            description: Some("   ".to_owned()),
            ..payload(json!(100))
        };

        assert_eq!(
            validate_transaction(payload, &categories),
            Err(ValidationError::MissingField("description").into())
        );
    }

    #[test]
    fn rejects_unknown_type() {
        let categories = seed_category_list();
        let payload = TransactionPayload {
            kind: Some("transfer".to_owned()),
            ..payload(json!(100))
        };

        assert_eq!(
            validate_transaction(payload, &categories),
            Err(ValidationError::InvalidType("transfer".to_owned()).into())
        );
    }

    #[test]
    fn rejects_malformed_date() {
        let categories = seed_category_list();
        let payload = TransactionPayload {
            date: Some("2024/01/17".to_owned()),
            ..payload(json!(100))
        };

        assert_eq!(
            validate_transaction(payload, &categories),
            Err(ValidationError::InvalidDate("2024/01/17".to_owned()).into())
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let categories = seed_category_list();
        let payload = TransactionPayload {
            category: Some("存在しない".to_owned()),
            ..payload(json!(100))
        };

        assert_eq!(
            validate_transaction(payload, &categories),
            Err(Error::CategoryNotFound("存在しない".to_owned()))
        );
    }

    #[test]
    fn tags_default_to_empty() {
        let categories = seed_category_list();
        let payload = TransactionPayload {
            tags: None,
            ..payload(json!(100))
        };

        let got = validate_transaction(payload, &categories).unwrap();

        assert!(got.tags.is_empty());
    }
}
