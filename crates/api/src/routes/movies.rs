use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Mount the HTML document routes (root level, NOT under `/api/v1`).
///
/// ```text
/// GET  /movies    lookup via query string
/// POST /movies    lookup via form body
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/movies",
        get(movies::movie_document).post(movies::movie_document_form),
    )
}
