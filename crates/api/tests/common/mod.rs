#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use cinedex_api::config::{LogFormat, ServerConfig};
use cinedex_api::router::build_app_router;
use cinedex_api::state::AppState;
use cinedex_core::catalog::MovieCatalog;
use cinedex_core::error::StoreError;
use cinedex_core::mapper::StoreRow;
use cinedex_core::movie::Movie;
use cinedex_core::planner::{PlannedQuery, PlannerMode};
use cinedex_core::store::MovieStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// In-memory movie store that answers every query with the same rows.
///
/// Records each executed query so tests can inspect the planned SQL.
#[derive(Default)]
pub struct FakeStore {
    pub rows: Vec<StoreRow>,
    pub fail: bool,
    pub executed: Mutex<Vec<PlannedQuery>>,
}

impl FakeStore {
    pub fn with_movies(movies: &[Movie]) -> Self {
        Self {
            rows: movies.iter().map(StoreRow::from).collect(),
            ..Self::default()
        }
    }

    pub fn with_rows(rows: Vec<StoreRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn executed(&self) -> Vec<PlannedQuery> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieStore for FakeStore {
    async fn execute(&self, query: &PlannedQuery) -> Result<Vec<StoreRow>, StoreError> {
        self.executed.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(StoreError::new("connection refused"));
        }
        Ok(self.rows.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::new("connection refused"));
        }
        Ok(())
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(planner_mode: PlannerMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        planner_mode,
        database_max_connections: 1,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over the given store.
///
/// Uses the same `build_app_router` as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(store: Arc<FakeStore>, planner_mode: PlannerMode) -> Router {
    let config = test_config(planner_mode);
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: MovieCatalog::new(store, planner_mode),
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a form-encoded POST request against the app.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn movie(id: i64, title: &str, year: i32, genres: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        year,
        genres: genres.to_string(),
        imdb_id: 100_000 + id,
        rating: 4.25,
        num_raters: 17,
    }
}
