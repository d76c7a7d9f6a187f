//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for the dashboard page
//! - The JSON endpoint that serves the same figures to API clients
//! - HTML view functions for rendering the dashboard UI

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    dashboard::{
        aggregation::{DEFAULT_MONTHS, DashboardSummary},
        cards::{category_cards_view, totals_cards_view},
        charts::{DashboardChart, charts_script, charts_view, monthly_chart},
        tables::{monthly_summary_table, recent_transactions_table},
    },
    endpoints,
    error::ErrorBody,
    html::{HeadElement, base, link},
    navigation::NavBar,
    timezone::current_local_date,
    transaction::{Transaction, get_all_transactions},
};

/// The largest number of months the summary endpoint will roll up.
pub const MAX_MONTHS: u32 = 120;

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
///
/// Contains the database connection and timezone information required
/// by dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions and categories.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Tokyo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// How many months to include in the monthly rollup.
    pub months: Option<u32>,
}

impl SummaryQuery {
    /// The requested number of months, defaulting to [DEFAULT_MONTHS] and
    /// kept between 1 and [MAX_MONTHS].
    fn n_months(&self) -> u32 {
        self.months.unwrap_or(DEFAULT_MONTHS).clamp(1, MAX_MONTHS)
    }
}

/// Load everything and compute the summary for the month containing today.
fn load_summary(state: &DashboardState, n_months: u32) -> Result<DashboardSummary, Error> {
    let (transactions, categories) = load_data(&state.db_connection)?;
    let today = current_local_date(&state.local_timezone)?;

    Ok(DashboardSummary::build(
        &transactions,
        &categories,
        n_months,
        today,
    ))
}

fn load_data(
    db_connection: &Arc<Mutex<Connection>>,
) -> Result<(Vec<Transaction>, Vec<Category>), Error> {
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("could not get categories: {error}"))?;

    Ok((transactions, categories))
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let summary = load_summary(&state, DEFAULT_MONTHS)?;

    if summary.recent_transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    Ok(dashboard_view(nav_bar, &summary).into_response())
}

/// Serve the dashboard figures as JSON.
///
/// `?months=N` controls the length of the monthly rollup.
pub async fn get_dashboard_summary(
    State(state): State<DashboardState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    match load_summary(&state, query.n_months()) {
        Ok(summary) => Json(summary).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Totals and charts will show up here once transactions are recorded.
                See the " (transactions_link) " for details."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with totals, the monthly chart, category
/// breakdowns, and tables.
fn dashboard_view(nav_bar: NavBar<'_>, summary: &DashboardSummary) -> Markup {
    let nav_bar = nav_bar.into_html();
    let charts = [DashboardChart {
        id: "monthly-chart",
        options: monthly_chart(&summary.monthly).to_string(),
    }];

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (totals_cards_view(&summary.totals))
            (charts_view(&charts))
            (category_cards_view(&summary.category_stats))

            div class="w-full grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                (monthly_summary_table(&summary.monthly))
                (recent_transactions_table(&summary.recent_transactions))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, extract::State, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{
        db::{initialize, seed},
        endpoints,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document, select_text},
    };

    use super::{
        DashboardState, MAX_MONTHS, SummaryQuery, get_dashboard_page, get_dashboard_summary,
    };

    fn get_test_state(seeded: bool, timezone: &str) -> DashboardState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        if seeded {
            seed(&conn).unwrap();
        }

        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: timezone.to_owned(),
        }
    }

    fn get_test_server(state: DashboardState) -> TestServer {
        let app = Router::new()
            .route(endpoints::SUMMARY_API, get(get_dashboard_summary))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[test]
    fn months_default_and_bounds() {
        assert_eq!(SummaryQuery::default().n_months(), 6);
        assert_eq!(SummaryQuery { months: Some(0) }.n_months(), 1);
        assert_eq!(SummaryQuery { months: Some(12) }.n_months(), 12);
        assert_eq!(SummaryQuery { months: Some(10_000) }.n_months(), MAX_MONTHS);
    }

    #[tokio::test]
    async fn dashboard_shows_totals_and_chart() {
        let state = get_test_state(true, "Etc/UTC");

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "#totals [data-total] p"),
            vec!["¥300,000", "¥15,500", "¥284,500"]
        );
        assert_eq!(select_text(&html, "#monthly-chart").len(), 1);
        assert_eq!(
            select_text(&html, "#recent-transactions tr[data-transaction-row]").len(),
            3
        );
    }

    #[tokio::test]
    async fn dashboard_without_transactions_shows_placeholder() {
        let state = get_test_state(false, "Etc/UTC");

        let response = get_dashboard_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(select_text(&html, "h2"), vec!["Nothing here yet..."]);
    }

    #[tokio::test]
    async fn dashboard_with_invalid_timezone_is_server_error() {
        let state = get_test_state(true, "Not/AZone");

        let result = get_dashboard_page(State(state)).await;

        assert!(matches!(
            result,
            Err(crate::Error::InvalidTimezoneError(timezone)) if timezone == "Not/AZone"
        ));
    }

    #[tokio::test]
    async fn summary_endpoint_returns_requested_months() {
        let server = get_test_server(get_test_state(true, "Etc/UTC"));

        let response = server
            .get(endpoints::SUMMARY_API)
            .add_query_param("months", 3)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["totals"]["net"], 284500.0);
        assert_eq!(body["monthly"].as_array().unwrap().len(), 3);
        assert_eq!(body["category_stats"][0]["category"]["name"], "給与");
        assert_eq!(body["recent_transactions"][0]["description"], "電車定期券");
    }

    #[tokio::test]
    async fn summary_endpoint_defaults_to_six_months() {
        let server = get_test_server(get_test_state(true, "Etc/UTC"));

        let response = server.get(endpoints::SUMMARY_API).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["monthly"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn summary_endpoint_rejects_non_numeric_months() {
        let server = get_test_server(get_test_state(true, "Etc/UTC"));

        let response = server
            .get(endpoints::SUMMARY_API)
            .add_query_param("months", "many")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn summary_endpoint_reports_invalid_timezone_as_json() {
        let server = get_test_server(get_test_state(true, "Not/AZone"));

        let response = server.get(endpoints::SUMMARY_API).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json::<Value>()["error"].is_string());
    }
}
