//! Application router configuration for the HTML pages and the JSON API.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};

use crate::{
    AppState,
    category::get_categories_endpoint,
    dashboard::{get_dashboard_page, get_dashboard_summary},
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, create_transaction_form_endpoint, delete_transaction_endpoint,
        edit_transaction_endpoint, export_transactions_endpoint, get_create_transaction_page,
        get_transactions_endpoint, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page).post(create_transaction_form_endpoint),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::EXPORT_API, get(export_transactions_endpoint))
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::CATEGORIES_API, get(get_categories_endpoint))
        .route(endpoints::SUMMARY_API, get(get_dashboard_summary));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
