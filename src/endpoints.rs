//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with totals, category breakdowns and the monthly chart.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for browsing, filtering and sorting transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for recording a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";

/// The route to list or create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to download the transaction list as CSV.
pub const EXPORT_API: &str = "/api/transactions/export";
/// The route to list categories.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route for the dashboard figures as JSON.
pub const SUMMARY_API: &str = "/api/summary";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// Paths without a parameter are returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end + 1..])
        }
        _ => endpoint_path.to_owned(),
    }
}
