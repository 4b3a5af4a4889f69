//! The catalog record returned to callers.

use serde::Serialize;

use crate::types::DbId;

/// One catalog entry.
///
/// Built by [`map_row`](crate::mapper::map_row) from a store row and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    /// Delimited genre list, kept exactly as stored (e.g. `Action|Sci-Fi`).
    pub genres: String,
    pub imdb_id: i64,
    /// Average rating, expected in `0.0..=5.0`.
    pub rating: f32,
    pub num_raters: i32,
}

impl Movie {
    /// Id of a movie that has not been persisted.
    pub const UNSET_ID: DbId = -1;
}

impl Default for Movie {
    fn default() -> Self {
        Self {
            id: Self::UNSET_ID,
            title: String::new(),
            year: 0,
            genres: String::new(),
            imdb_id: 0,
            rating: 0.0,
            num_raters: 0,
        }
    }
}
