//! Handlers for catalog lookups.
//!
//! All three entry points pass the raw, still-escaped parameter string to the
//! core pipeline, which does its own decoding.

use axum::extract::{RawQuery, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Json;
use cinedex_core::movie::Movie;
use cinedex_core::request::RawFilterParams;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::render::render_document;
use crate::response::DataResponse;
use crate::state::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Payload of the JSON lookup endpoint.
#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub count: usize,
    pub movies: Vec<Movie>,
}

async fn run_lookup(state: &AppState, input: &str) -> AppResult<Vec<Movie>> {
    let raw = RawFilterParams::parse(input)?;
    let movies = state.catalog.search(&raw).await?;
    Ok(movies)
}

/// GET /api/v1/movies?title=&genre=&startYear=&endYear=
pub async fn search_movies(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<DataResponse<MovieListResponse>>> {
    let movies = run_lookup(&state, query.as_deref().unwrap_or_default()).await?;

    Ok(Json(DataResponse {
        data: MovieListResponse {
            count: movies.len(),
            movies,
        },
    }))
}

/// GET /movies?title=&genre=&startYear=&endYear=
///
/// Returns the results as an HTML document.
pub async fn movie_document(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Html<String>> {
    let movies = run_lookup(&state, query.as_deref().unwrap_or_default()).await?;
    Ok(Html(render_document(&movies)))
}

/// POST /movies
///
/// Accepts the `title=..&genre=..&startYear=..&endYear=..` form body and
/// returns the results as an HTML document.
pub async fn movie_document_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<Html<String>> {
    if let Some(content_type) = headers.get(CONTENT_TYPE) {
        let content_type = content_type.to_str().unwrap_or_default();
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        if !media_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
            return Err(AppError::BadRequest(format!(
                "expected {FORM_CONTENT_TYPE} body, got '{content_type}'"
            )));
        }
    }

    let movies = run_lookup(&state, &body).await?;
    Ok(Html(render_document(&movies)))
}
