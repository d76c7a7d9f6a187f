//! Defines the route handler for the page that displays transactions as a
//! filterable, sortable table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    endpoints::{self, format_endpoint},
    html::{
        ALERT_ERROR_STYLE, BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TAG_BADGE_STYLE, base, format_currency,
    },
    navigation::NavBar,
};

use super::{
    core::{Transaction, TransactionType},
    db::get_all_transactions,
    filter::{ALL_CATEGORIES, SortDirection, SortKey, TransactionsQuery, TypeFilter},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The database connection for reading transactions and categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the transactions page, filtered and sorted by the query string.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let (transactions, categories) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let transactions = get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
        let categories = get_all_categories(&connection)
            .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

        (transactions, categories)
    };

    let visible = query.apply(&transactions);

    Ok(transactions_view(&query, &visible, transactions.len(), &categories).into_response())
}

fn amount_class(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => "text-green-700 dark:text-green-300",
        TransactionType::Expense => "text-red-700 dark:text-red-300",
    }
}

fn transactions_view(
    query: &TransactionsQuery,
    transactions: &[Transaction],
    total_count: usize,
    categories: &[Category],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let export_url = query.to_url(endpoints::EXPORT_API);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    div class="flex gap-4 items-center"
                    {
                        a href=(export_url) class=(LINK_STYLE) download { "Export CSV" }

                        a
                            href=(endpoints::NEW_TRANSACTION_VIEW)
                            id="new-transaction-link"
                            class=(BUTTON_PRIMARY_STYLE)
                        {
                            "New Transaction"
                        }
                    }
                }

                div id="notice" role="status" hidden class=(ALERT_ERROR_STYLE) {}

                (filter_form(query, categories))

                p id="result-count" class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Showing " (transactions.len()) " of " (total_count) " transactions"
                }

                div class="overflow-x-auto rounded"
                {
                    table class="w-full my-2 text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                (sort_header(query, SortKey::Date, "Date"))
                                (sort_header(query, SortKey::Description, "Description"))
                                (sort_header(query, SortKey::Category, "Category"))
                                (sort_header(query, SortKey::Type, "Type"))
                                (sort_header(query, SortKey::Amount, "Amount"))
                                th scope="col" class=(TABLE_CELL_STYLE) { "Tags" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row_view(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="7"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No transactions match the current filters."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[row_actions_script()], &content)
}

/// Sends the request for an edit or delete button and shows the server's
/// message in the notice box. The page reloads when the request succeeds.
fn row_actions_script() -> HeadElement {
    HeadElement::ScriptSource(PreEscaped(
        r#"document.addEventListener("click", async (event) => {
    const button = event.target.closest("button[data-action]");
    if (!button) {
        return;
    }

    if (button.dataset.action === "delete" && !confirm("Delete this transaction?")) {
        return;
    }

    const notice = document.getElementById("notice");
    try {
        const response = await fetch(button.dataset.url, { method: button.dataset.method });
        if (response.ok) {
            window.location.reload();
            return;
        }

        const body = await response.json();
        notice.textContent = body.error;
    } catch (error) {
        notice.textContent = "Could not reach the server, please try again.";
    }
    notice.hidden = false;
});"#
            .to_owned(),
    ))
}

fn filter_form(query: &TransactionsQuery, categories: &[Category]) -> Markup {
    let selected_category = query.category.as_deref().unwrap_or(ALL_CATEGORIES);
    let type_options = [
        (TypeFilter::All, "all", "All types"),
        (TypeFilter::Income, "income", "Income"),
        (TypeFilter::Expense, "expense", "Expense"),
    ];

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end"
        {
            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }
                input
                    type="search"
                    name="search"
                    id="search"
                    placeholder="Description or tag"
                    value=(query.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (filter, value, label) in type_options {
                        option value=(value) selected[query.kind == filter] { (label) }
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(ALL_CATEGORIES) selected[selected_category == ALL_CATEGORIES]
                    {
                        "All categories"
                    }

                    @for category in categories {
                        option
                            value=(category.name)
                            selected[selected_category == category.name]
                        {
                            (category.name)
                        }
                    }
                }
            }

            input type="hidden" name="sort" value=(query.sort.as_str());
            input type="hidden" name="order" value=(query.order.as_str());

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    }
}

/// A column header that sorts by `key` when clicked.
fn sort_header(query: &TransactionsQuery, key: SortKey, title: &str) -> Markup {
    let url = query
        .with_sort_toggled(key)
        .to_url(endpoints::TRANSACTIONS_VIEW);
    let (indicator, aria_sort) = match (query.sort == key, query.order) {
        (true, SortDirection::Ascending) => (" ↑", "ascending"),
        (true, SortDirection::Descending) => (" ↓", "descending"),
        (false, _) => ("", "none"),
    };

    html! {
        th scope="col" class=(TABLE_CELL_STYLE) aria-sort=(aria_sort)
        {
            a href=(url) class="hover:underline" { (title) (indicator) }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let url = format_endpoint(endpoints::TRANSACTION, &transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.date) { (transaction.date) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { (transaction.kind.label()) }
            td class={ "px-6 py-4 text-right " (amount_class(transaction.kind)) }
            {
                (format_currency(transaction.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex flex-wrap gap-1"
                {
                    @for tag in &transaction.tags {
                        span class=(TAG_BADGE_STYLE) { (tag) }
                    }
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    button
                        type="button"
                        data-action="edit"
                        data-method="PUT"
                        data-url=(url)
                        class=(LINK_STYLE)
                    {
                        "Edit"
                    }

                    button
                        type="button"
                        data-action="delete"
                        data-method="DELETE"
                        data-url=(url)
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}
