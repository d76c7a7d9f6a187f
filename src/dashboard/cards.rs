//! Card components for the dashboard.
//!
//! Provides:
//! - Income, expense and net totals
//! - Per-category breakdown with each category's share of its type's total

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{CategoryStats, Totals},
    html::format_currency,
    transaction::TransactionType,
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

/// Formats a fraction between 0.0 and 1.0 as a whole percentage, avoiding "-0%".
fn format_percentage(fraction: f64) -> String {
    let rounded = (fraction * 100.0).round();
    if rounded.abs() < 0.5 {
        "0%".to_owned()
    } else {
        format!("{rounded:.0}%")
    }
}

fn net_color_class(net: f64) -> &'static str {
    if net >= 0.0 {
        "text-green-600 dark:text-green-400"
    } else {
        "text-red-600 dark:text-red-400"
    }
}

/// Renders the three totals cards.
pub(super) fn totals_cards_view(totals: &Totals) -> Markup {
    html! {
        section id="totals" class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-8"
        {
            div class=(CARD_STYLE) data-total="income"
            {
                h3 class="text-sm text-gray-600 dark:text-gray-400" { "Income" }
                p class="text-3xl font-bold text-green-600 dark:text-green-400"
                {
                    (format_currency(totals.income))
                }
            }

            div class=(CARD_STYLE) data-total="expense"
            {
                h3 class="text-sm text-gray-600 dark:text-gray-400" { "Expenses" }
                p class="text-3xl font-bold text-red-600 dark:text-red-400"
                {
                    (format_currency(totals.expense))
                }
            }

            div class=(CARD_STYLE) data-total="net"
            {
                h3 class="text-sm text-gray-600 dark:text-gray-400" { "Net" }
                p class={ "text-3xl font-bold " (net_color_class(totals.net)) }
                {
                    (format_currency(totals.net))
                }
            }
        }
    }
}

/// Renders one card per category, split into income and expense sections.
///
/// Shows an empty state if no category has any transactions.
pub(super) fn category_cards_view(stats: &[CategoryStats]) -> Markup {
    if stats.is_empty() {
        return html! {
            section class="w-full mb-8"
            {
                h3 class="text-xl font-semibold mb-4" { "By Category" }
                p class="text-gray-600 dark:text-gray-400" { "No categorized transactions yet." }
            }
        };
    }

    let sections = [
        (TransactionType::Income, "Income by Category"),
        (TransactionType::Expense, "Expenses by Category"),
    ];

    html! {
        @for (kind, title) in sections {
            @let cards: Vec<&CategoryStats> = stats
                .iter()
                .filter(|stat| stat.category.kind == kind)
                .collect();

            @if !cards.is_empty() {
                section class="w-full mb-8" data-category-section=(kind.as_str())
                {
                    h3 class="text-xl font-semibold mb-4" { (title) }

                    div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4"
                    {
                        @for stat in cards {
                            (category_card(stat))
                        }
                    }
                }
            }
        }
    }
}

fn category_card(stat: &CategoryStats) -> Markup {
    html! {
        div
            class=(CARD_STYLE)
            data-category=(stat.category.name)
            aria-label=(format!(
                "{}: {} across {} transactions, {} of {}",
                stat.category.name,
                format_currency(stat.total),
                stat.count,
                format_percentage(stat.percentage),
                stat.category.kind.as_str(),
            ))
        {
            div class="flex items-center gap-2 mb-3"
            {
                span
                    class="inline-block w-3 h-3 rounded-full"
                    style={ "background-color: " (stat.category.color) }
                {}
                h4 class="text-lg font-semibold truncate" title=(stat.category.name)
                {
                    (stat.category.name)
                }
            }

            div class="text-2xl font-bold mb-1" { (format_currency(stat.total)) }

            div class="text-sm text-gray-600 dark:text-gray-400 mb-2"
            {
                span data-percentage { (format_percentage(stat.percentage)) }
                " · " (stat.count) " transactions"
            }

            (progress_bar(stat.percentage, &stat.category.color))
        }
    }
}

fn progress_bar(fraction: f64, color: &str) -> Markup {
    let width = (fraction * 100.0).clamp(0.0, 100.0);

    html! {
        div class="w-full bg-gray-200 rounded-full h-2 dark:bg-gray-700"
        {
            div
                class="h-2 rounded-full"
                style=(format!("width: {width:.1}%; background-color: {color}"))
            {}
        }
    }
}
