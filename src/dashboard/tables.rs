//! Table views for dashboard data display.
//!
//! Provides HTML tables for the monthly rollup and the most recent transactions.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::MonthlySummary,
    endpoints,
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Transaction, TransactionType},
};

const TABLE_HEADER_CELL_STYLE: &str = "px-3 py-3 text-center min-w-[100px]";
const TABLE_DATA_CELL_STYLE: &str = "text-center whitespace-nowrap";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

/// Renders a table with one row per month, oldest first.
pub(super) fn monthly_summary_table(monthly: &[MonthlySummary]) -> Markup {
    html! {
        div class="w-full mb-8"
        {
            h3 class="text-xl font-semibold mb-4" { "Monthly Summary" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table id="monthly-summary" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class="text-xs text-gray-900 uppercase bg-gray-100 dark:bg-gray-700 dark:text-gray-400"
                    {
                        tr
                        {
                            th scope="col" class="px-3 py-3 text-left" { "Month" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Income" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Expenses" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Net" }
                        }
                    }
                    tbody
                    {
                        @for month in monthly {
                            tr class=(TABLE_ROW_STYLE) data-month=(month.label)
                            {
                                th scope="row" class="px-3 py-4 font-medium text-gray-900 dark:text-white"
                                {
                                    (month.label)
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_GREEN_STYLE)}
                                {
                                    (format_currency(month.income))
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_RED_STYLE)}
                                {
                                    (format_currency(month.expense))
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (amount_color_class(month.net))}
                                {
                                    (format_currency(month.net))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the most recent transactions with a link to the full list.
pub(super) fn recent_transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="w-full mb-8"
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Recent Transactions" }
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
            }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table id="recent-transactions" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    tbody
                    {
                        @for transaction in transactions {
                            @let (sign, color) = match transaction.kind {
                                TransactionType::Income => ("+", TABLE_CELL_GREEN_STYLE),
                                TransactionType::Expense => ("-", TABLE_CELL_RED_STYLE),
                            };

                            tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
                            {
                                td class=(TABLE_CELL_STYLE) { (transaction.date) }
                                td class=(TABLE_CELL_STYLE) { (transaction.description) }
                                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                                td class={(TABLE_CELL_STYLE) " text-right " (color)}
                                {
                                    (sign) (format_currency(transaction.amount))
                                }
                            }
                        }

                        @if transactions.is_empty() {
                            tr
                            {
                                td class="px-6 py-4 text-center" data-empty-state="true"
                                {
                                    "No transactions yet."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
