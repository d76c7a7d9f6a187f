//! Aggregation of transactions into the figures shown on the dashboard.
//!
//! Every function here is pure: it takes the full list of transactions (and
//! categories where needed) and derives a summary without touching storage.

use std::cmp::Ordering;

use serde::Serialize;
use time::Date;

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

/// The number of months shown in the monthly rollup unless asked otherwise.
pub const DEFAULT_MONTHS: u32 = 6;

/// The number of transactions listed under "recent transactions".
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

/// Income and expense totals for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    /// Income minus expense, negative when more was spent than earned.
    pub net: f64,
}

/// Sum income and expense amounts separately.
pub fn totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let (income, expense) = transactions.into_iter().fold(
        (0.0, 0.0),
        |(income, expense), transaction| match transaction.kind {
            TransactionType::Income => (income + transaction.amount, expense),
            TransactionType::Expense => (income, expense + transaction.amount),
        },
    );

    Totals {
        income,
        expense,
        net: income - expense,
    }
}

/// How much was earned or spent in a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub total: f64,
    pub count: usize,
    /// The share of the total for the category's type, from 0.0 to 1.0.
    pub percentage: f64,
}

/// Summarize each category that has at least one non-zero total.
///
/// A category's percentage is its share of all income if it is an income
/// category, otherwise its share of all expenses. The result is ordered by
/// total, largest first, with ties left in the order of `categories`.
pub fn category_stats(transactions: &[Transaction], categories: &[Category]) -> Vec<CategoryStats> {
    let overall = totals(transactions);

    let mut stats: Vec<CategoryStats> = categories
        .iter()
        .filter_map(|category| {
            let (total, count) = transactions
                .iter()
                .filter(|transaction| transaction.category == category.name)
                .fold((0.0, 0), |(total, count), transaction| {
                    (total + transaction.amount, count + 1)
                });

            if total == 0.0 {
                return None;
            }

            let type_total = match category.kind {
                TransactionType::Income => overall.income,
                TransactionType::Expense => overall.expense,
            };
            let percentage = if type_total > 0.0 {
                total / type_total
            } else {
                0.0
            };

            Some(CategoryStats {
                category: category.clone(),
                total,
                count,
                percentage,
            })
        })
        .collect();

    stats.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

    stats
}

/// Income, expense and net for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    /// The month number, 1 for January through 12 for December.
    pub month: u8,
    /// The month formatted as "YYYY-MM".
    pub label: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

/// Summarize the `n_months` calendar months ending with the month of
/// `reference_date`, oldest first.
///
/// Months without transactions are included with zero totals, so the result
/// always has exactly `n_months` entries.
pub fn monthly_rollup(
    transactions: &[Transaction],
    n_months: u32,
    reference_date: Date,
) -> Vec<MonthlySummary> {
    let reference_index = month_index(reference_date.year(), u8::from(reference_date.month()));

    (0..i64::from(n_months))
        .rev()
        .map(|months_ago| {
            let index = reference_index - months_ago;
            let year = index.div_euclid(12) as i32;
            let month = (index.rem_euclid(12) + 1) as u8;

            let Totals {
                income,
                expense,
                net,
            } = totals(transactions.iter().filter(|transaction| {
                transaction.date.year() == year && u8::from(transaction.date.month()) == month
            }));

            MonthlySummary {
                year,
                month,
                label: format!("{year:04}-{month:02}"),
                income,
                expense,
                net,
            }
        })
        .collect()
}

/// Count months from year zero so that stepping back across a year boundary
/// is plain subtraction.
fn month_index(year: i32, month: u8) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

/// The `limit` most recent transactions, newest first.
///
/// Transactions on the same date keep their input order.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut recent = transactions.to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(limit);

    recent
}

/// Everything the dashboard shows, computed in one pass over the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub totals: Totals,
    pub category_stats: Vec<CategoryStats>,
    pub monthly: Vec<MonthlySummary>,
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    pub fn build(
        transactions: &[Transaction],
        categories: &[Category],
        n_months: u32,
        reference_date: Date,
    ) -> Self {
        Self {
            totals: totals(transactions),
            category_stats: category_stats(transactions, categories),
            monthly: monthly_rollup(transactions, n_months, reference_date),
            recent_transactions: recent_transactions(transactions, RECENT_TRANSACTION_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        test_utils::{make_transaction, seed_category_list, seed_transactions},
        transaction::{Transaction, TransactionType},
    };

    use super::{
        DashboardSummary, Totals, category_stats, monthly_rollup, recent_transactions, totals,
    };

    #[test]
    fn totals_of_sample_data() {
        let got = totals(&seed_transactions());

        assert_eq!(
            got,
            Totals {
                income: 300000.0,
                expense: 15500.0,
                net: 284500.0,
            }
        );
    }

    #[test]
    fn totals_of_nothing_is_zero() {
        assert_eq!(totals(&Vec::<Transaction>::new()), Totals::default());
    }

    #[test]
    fn net_can_be_negative() {
        let transactions = [
            make_transaction("1", date!(2024 - 01 - 01), 100.0, TransactionType::Income, "給与"),
            make_transaction("2", date!(2024 - 01 - 02), 250.0, TransactionType::Expense, "食費"),
        ];

        assert_eq!(totals(&transactions).net, -150.0);
    }

    #[test]
    fn category_stats_of_sample_data() {
        let got = category_stats(&seed_transactions(), &seed_category_list());

        let names: Vec<&str> = got.iter().map(|stats| stats.category.name.as_str()).collect();
        assert_eq!(names, vec!["給与", "交通費", "食費"]);

        assert_eq!(got[0].total, 300000.0);
        assert_eq!(got[0].count, 1);
        assert_eq!(got[0].percentage, 1.0);

        let transport = &got[1];
        assert_eq!(transport.total, 12000.0);
        assert!((transport.percentage - 12000.0 / 15500.0).abs() < 1e-9);

        let food = &got[2];
        assert!((food.percentage - 3500.0 / 15500.0).abs() < 1e-9);
    }

    #[test]
    fn category_stats_skips_unused_categories() {
        let got = category_stats(&[], &seed_category_list());

        assert!(got.is_empty());
    }

    #[test]
    fn category_stats_ties_keep_category_order() {
        let categories = seed_category_list();
        let transactions = [
            make_transaction("1", date!(2024 - 01 - 01), 500.0, TransactionType::Expense, "通信費"),
            make_transaction("2", date!(2024 - 01 - 02), 500.0, TransactionType::Expense, "食費"),
        ];

        let got = category_stats(&transactions, &categories);

        // 食費 comes before 通信費 in the category list.
        assert_eq!(got[0].category.name, "食費");
        assert_eq!(got[1].category.name, "通信費");
        assert_eq!(got[0].percentage, 0.5);
    }

    #[test]
    fn category_percentage_is_zero_when_type_total_is_zero() {
        let categories = seed_category_list();
        // Recorded as income but filed under an expense category.
        let transactions = [make_transaction(
            "1",
            date!(2024 - 01 - 01),
            80.0,
            TransactionType::Income,
            "食費",
        )];

        let got = category_stats(&transactions, &categories);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].percentage, 0.0);
    }

    #[test]
    fn monthly_rollup_spans_year_boundary() {
        let transactions = [
            make_transaction("1", date!(2023 - 11 - 30), 10.0, TransactionType::Expense, "食費"),
            make_transaction("2", date!(2024 - 01 - 01), 20.0, TransactionType::Income, "給与"),
            make_transaction("3", date!(2024 - 01 - 31), 5.0, TransactionType::Expense, "食費"),
            make_transaction("4", date!(2023 - 10 - 31), 99.0, TransactionType::Expense, "食費"),
        ];

        let got = monthly_rollup(&transactions, 3, date!(2024 - 01 - 15));

        let labels: Vec<&str> = got.iter().map(|month| month.label.as_str()).collect();
        assert_eq!(labels, vec!["2023-11", "2023-12", "2024-01"]);
        assert_eq!(got[0].expense, 10.0);
        assert_eq!(got[1].income, 0.0);
        assert_eq!(got[1].expense, 0.0);
        assert_eq!(got[2].income, 20.0);
        assert_eq!(got[2].net, 15.0);
    }

    #[test]
    fn monthly_rollup_has_exactly_n_entries() {
        for n_months in [0, 1, 6, 12, 25] {
            let got = monthly_rollup(&[], n_months, date!(2024 - 03 - 01));

            assert_eq!(got.len(), n_months as usize);
            assert!(got.iter().all(|month| month.net == 0.0));
        }
    }

    #[test]
    fn monthly_rollup_matches_sample_data() {
        let got = monthly_rollup(&seed_transactions(), 6, date!(2024 - 01 - 31));

        assert_eq!(got[0].label, "2023-08");
        let january = &got[5];
        assert_eq!((january.year, january.month), (2024, 1));
        assert_eq!(january.income, 300000.0);
        assert_eq!(january.expense, 15500.0);
        assert_eq!(january.net, 284500.0);
    }

    #[test]
    fn recent_transactions_are_newest_first() {
        let mut transactions = seed_transactions();
        transactions.push(make_transaction(
            "same-day",
            date!(2024 - 01 - 17),
            1.0,
            TransactionType::Expense,
            "食費",
        ));

        let got = recent_transactions(&transactions, 2);

        let ids: Vec<&str> = got.iter().map(|transaction| transaction.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "same-day"]);
    }

    #[test]
    fn summary_bundles_every_figure() {
        let summary = DashboardSummary::build(
            &seed_transactions(),
            &seed_category_list(),
            6,
            date!(2024 - 01 - 20),
        );

        assert_eq!(summary.totals.net, 284500.0);
        assert_eq!(summary.category_stats.len(), 3);
        assert_eq!(summary.monthly.len(), 6);
        assert_eq!(summary.recent_transactions.len(), 3);
        assert_eq!(summary.recent_transactions[0].id, "t3");
    }
}
