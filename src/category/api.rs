//! Defines the JSON endpoint for listing categories.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{AppState, Error, category::Category};

use super::get_all_categories;

/// The state needed to list categories.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection for reading categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CategoryList {
    categories: Vec<Category>,
}

/// A route handler that returns all categories ordered by name as `{"categories": [...]}`.
pub async fn get_categories_endpoint(State(state): State<CategoryState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match get_all_categories(&connection) {
        Ok(categories) => Json(CategoryList { categories }).into_response(),
        Err(error) => {
            tracing::error!("could not get categories: {error}");
            error.into_json_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{db::initialize, db::seed, endpoints};

    use super::{CategoryState, get_categories_endpoint};

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        seed(&conn).unwrap();

        let app = Router::new()
            .route(endpoints::CATEGORIES_API, get(get_categories_endpoint))
            .with_state(CategoryState {
                db_connection: Arc::new(Mutex::new(conn)),
            });

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn lists_seeded_categories_by_name() {
        let server = get_test_server();

        let response = server.get(endpoints::CATEGORIES_API).await;
        response.assert_status_ok();

        let body: Value = response.json();
        let categories = body["categories"].as_array().expect("categories array");
        assert_eq!(categories.len(), 10);

        let names: Vec<&str> = categories
            .iter()
            .map(|category| category["name"].as_str().unwrap())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let salary = categories
            .iter()
            .find(|category| category["name"] == "給与")
            .expect("salary category");
        assert_eq!(salary["type"], "income");
        assert_eq!(salary["color"], "#4caf50");
    }
}
