pub mod health;
pub mod movies;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /movies                                          catalog lookup (JSON)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/movies", get(handlers::movies::search_movies))
}
