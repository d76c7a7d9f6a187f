//! Defines the page and form handler for recording a new transaction.
//!
//! The form works without JavaScript: switching the type, adding a tag and
//! removing a tag all post the form back and re-render it with the entered
//! values kept. Only the "Save" button creates the transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
// axum_extra's Form collects repeated fields, e.g. `tags`, into a Vec.
use axum_extra::extract::Form;
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Number, Value};
use time::Date;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    endpoints,
    html::{
        ALERT_ERROR_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE, TAG_BADGE_STYLE, base,
    },
    navigation::NavBar,
    timezone::current_local_date,
};

use super::{
    core::TransactionType,
    db::create_transaction,
    validation::{TransactionPayload, validate_transaction},
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The database connection for reading categories and storing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string for the new transaction page.
#[derive(Debug, Default, Deserialize)]
pub struct NewTransactionQuery {
    /// The type selected when the page opens, expense if absent.
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionType>,
}

/// The form data posted by the new transaction page.
///
/// Fields are kept as text so that a rejected form can be shown again with
/// exactly what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionForm {
    /// The date in the format YYYY-MM-DD.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    /// The name of a category of the selected type.
    #[serde(default)]
    pub category: String,
    /// The amount in yen.
    #[serde(default)]
    pub amount: String,
    /// Either "income" or "expense".
    #[serde(default, rename = "type")]
    pub kind: String,
    /// The tags added so far.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Text in the tag input that has not been added yet.
    #[serde(default)]
    pub new_tag: String,
    /// Set by the "Add" button next to the tag input.
    #[serde(default)]
    pub add_tag: Option<String>,
    /// Set by the remove button on a tag, holds the tag to remove.
    #[serde(default)]
    pub remove_tag: Option<String>,
    /// Set by the type toggle, holds the type to switch to.
    #[serde(default)]
    pub switch_type: Option<String>,
}

impl TransactionForm {
    fn blank(date: Date, kind: TransactionType) -> Self {
        Self {
            date: date.to_string(),
            kind: kind.as_str().to_owned(),
            ..Default::default()
        }
    }

    /// The selected type, falling back to expense for unknown values.
    fn transaction_type(&self) -> TransactionType {
        self.kind.parse().unwrap_or(TransactionType::Expense)
    }

    /// Move the pending tag text into the tag list, skipping blanks and
    /// duplicates.
    fn push_pending_tag(&mut self) {
        let tag = self.new_tag.trim().to_owned();
        self.new_tag.clear();

        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    fn to_payload(&self) -> TransactionPayload {
        TransactionPayload {
            date: Some(self.date.clone()),
            description: Some(self.description.clone()),
            category: Some(self.category.clone()),
            amount: Some(amount_value(&self.amount)),
            kind: Some(self.kind.clone()),
            tags: Some(self.tags.clone()),
        }
    }
}

/// Numeric text becomes a JSON number, anything else stays a string so that
/// validation can reject it.
fn amount_value(amount: &str) -> Value {
    let amount = amount.trim();

    match amount.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(amount.to_owned()),
    }
}

/// Render the new transaction page with today's date and no category chosen.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
    Query(query): Query<NewTransactionQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let categories = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_categories(&connection)
            .inspect_err(|error| tracing::error!("could not get categories: {error}"))?
    };

    let form = TransactionForm::blank(today, query.kind.unwrap_or(TransactionType::Expense));

    Ok(create_transaction_view(&form, &categories, None).into_response())
}

/// A route handler for the new transaction form.
///
/// Saving validates the form and, on success, stores the transaction and
/// redirects to the transactions page. A rejected form is shown again with
/// the reason and a 400 status. The type toggle and the tag buttons only
/// re-render the form.
pub async fn create_transaction_form_endpoint(
    State(state): State<CreateTransactionPageState>,
    Form(mut form): Form<TransactionForm>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

    let switch_to = form
        .switch_type
        .take()
        .and_then(|kind| kind.parse::<TransactionType>().ok());
    if let Some(kind) = switch_to {
        form.kind = kind.as_str().to_owned();
        form.category.clear();
        return Ok(create_transaction_view(&form, &categories, None).into_response());
    }

    if let Some(tag) = form.remove_tag.take() {
        form.tags.retain(|existing| *existing != tag);
        return Ok(create_transaction_view(&form, &categories, None).into_response());
    }

    form.push_pending_tag();
    if form.add_tag.take().is_some() {
        return Ok(create_transaction_view(&form, &categories, None).into_response());
    }

    let result = validate_transaction(form.to_payload(), &categories)
        .and_then(|new_transaction| create_transaction(new_transaction, &connection));

    match result {
        Ok(transaction) => {
            tracing::info!(
                "created transaction {} ({} {})",
                transaction.id,
                transaction.kind,
                transaction.amount
            );
            Ok(Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response())
        }
        Err(error @ (Error::Validation(_) | Error::CategoryNotFound(_))) => {
            tracing::debug!("rejected new transaction form: {error}");
            let message = error.to_string();

            Ok((
                StatusCode::BAD_REQUEST,
                create_transaction_view(&form, &categories, Some(&message)),
            )
                .into_response())
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            Err(error)
        }
    }
}

/// Pressing Enter in the tag input adds the tag, anywhere else it saves.
fn enter_key_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(
        r#"document.addEventListener("keydown", (event) => {
    if (event.key !== "Enter" || event.target.tagName !== "INPUT" || !event.target.form) {
        return;
    }

    event.preventDefault();
    const buttonId = event.target.id === "new-tag" ? "add-tag-button" : "submit-button";
    document.getElementById(buttonId).click();
});"#
            .to_owned(),
    ))
}

fn create_transaction_view(
    form: &TransactionForm,
    categories: &[Category],
    error_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let kind = form.transaction_type();
    let type_choices = [TransactionType::Income, TransactionType::Expense];
    let category_choices: Vec<&Category> = categories
        .iter()
        .filter(|category| category.kind == kind)
        .collect();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                method="post"
                action=(endpoints::NEW_TRANSACTION_VIEW)
                id="transaction-form"
                class="w-full space-y-4 md:space-y-6"
            {
                h1 class="text-xl font-bold" { "New Transaction" }

                @if let Some(message) = error_message {
                    div id="form-error" role="alert" class=(ALERT_ERROR_STYLE) { (message) }
                }

                input type="hidden" name="type" value=(kind.as_str());

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    div class="flex gap-2"
                    {
                        @for choice in type_choices {
                            button
                                type="submit"
                                name="switch_type"
                                value=(choice.as_str())
                                aria-pressed=(if choice == kind { "true" } else { "false" })
                                formnovalidate
                                class=(BUTTON_SECONDARY_STYLE)
                            {
                                (choice.label())
                            }
                        }
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(form.date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        required
                        value=(form.description)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[form.category.is_empty()]
                        {
                            "Select a category"
                        }

                        @for category in &category_choices {
                            option
                                value=(category.name)
                                selected[form.category == category.name]
                            {
                                (category.name)
                            }
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount (¥)" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="1"
                        min="1"
                        placeholder="0"
                        required
                        value=(form.amount)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="new-tag" class=(FORM_LABEL_STYLE) { "Tags" }

                    div class="flex gap-2"
                    {
                        input
                            name="new_tag"
                            id="new-tag"
                            type="text"
                            placeholder="Press Enter to add a tag"
                            value=(form.new_tag)
                            class=(FORM_TEXT_INPUT_STYLE);

                        button
                            type="submit"
                            name="add_tag"
                            value="true"
                            id="add-tag-button"
                            formnovalidate
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Add"
                        }
                    }

                    ul id="tag-list" class="flex flex-wrap gap-1 mt-2"
                    {
                        @for tag in &form.tags {
                            li class=(TAG_BADGE_STYLE) data-tag=(tag)
                            {
                                input type="hidden" name="tags" value=(tag);
                                (tag)
                                button
                                    type="submit"
                                    name="remove_tag"
                                    value=(tag)
                                    formnovalidate
                                    aria-label={ "Remove " (tag) }
                                    class="ms-1"
                                {
                                    "×"
                                }
                            }
                        }
                    }
                }

                div class="flex justify-between items-center"
                {
                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Cancel" }

                    button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                    {
                        "Save"
                    }
                }
            }
        }
    };

    base("New Transaction", &[enter_key_script()], &content)
}
