//! HTTP surface of the movie catalog.
//!
//! Exposes the lookup pipeline from `cinedex_core` as a JSON API under
//! `/api/v1` and as server-rendered HTML documents at `/movies`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
