//! The catalog lookup pipeline: decode, plan, execute, map.

use std::sync::Arc;

use crate::error::{CoreError, StoreError};
use crate::filters::FilterSet;
use crate::mapper::map_rows;
use crate::movie::Movie;
use crate::planner::{plan, PlannedQuery, PlannerMode};
use crate::request::RawFilterParams;
use crate::store::MovieStore;

/// Answers catalog lookups against an injected [`MovieStore`].
///
/// Holds no per-request state, so one instance is shared by all requests.
#[derive(Clone)]
pub struct MovieCatalog {
    store: Arc<dyn MovieStore>,
    mode: PlannerMode,
}

impl MovieCatalog {
    pub fn new(store: Arc<dyn MovieStore>, mode: PlannerMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> PlannerMode {
        self.mode
    }

    /// Build the filter set for a request and plan its statement.
    pub fn plan(&self, raw: &RawFilterParams) -> Result<PlannedQuery, CoreError> {
        let filters = FilterSet::from_raw(raw)?;
        Ok(plan(&filters, self.mode))
    }

    /// Run one lookup and return matching movies in store order.
    pub async fn search(&self, raw: &RawFilterParams) -> Result<Vec<Movie>, CoreError> {
        let query = self.plan(raw)?;
        let shape = query.shape();
        tracing::debug!(
            shape = %shape,
            mode = %self.mode,
            params = query.params.len(),
            "Planned catalog query",
        );

        let rows = self.store.execute(&query).await.map_err(|e| {
            tracing::error!(error = %e, shape = %shape, "Catalog query failed");
            e
        })?;

        let movies = map_rows(&rows)?;
        tracing::debug!(shape = %shape, rows = movies.len(), "Catalog query complete");
        Ok(movies)
    }

    /// Check that the backing store is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::error::MappingError;
    use crate::filters::FilterField;
    use crate::mapper::{Cell, StoreRow};
    use crate::planner::BindValue;

    /// Records every executed query and answers with canned rows.
    #[derive(Default)]
    struct RecordingStore {
        rows: Vec<StoreRow>,
        fail: bool,
        executed: Mutex<Vec<PlannedQuery>>,
    }

    impl RecordingStore {
        fn with_rows(rows: Vec<StoreRow>) -> Arc<Self> {
            Arc::new(Self {
                rows,
                ..Self::default()
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                ..Self::default()
            })
        }

        fn executed(&self) -> Vec<PlannedQuery> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MovieStore for RecordingStore {
        async fn execute(&self, query: &PlannedQuery) -> Result<Vec<StoreRow>, StoreError> {
            self.executed.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(StoreError::new("connection reset by peer"));
            }
            Ok(self.rows.clone())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            if self.fail {
                Err(StoreError::new("connection refused"))
            } else {
                Ok(())
            }
        }
    }

    fn movie(id: i64, title: &str, year: i32) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year,
            genres: "Drama".to_string(),
            imdb_id: 100_000 + id,
            rating: 3.5,
            num_raters: 10,
        }
    }

    #[tokio::test]
    async fn search_returns_movies_in_store_order() {
        let expected = vec![movie(2, "Zulu", 1964), movie(1, "Alien", 1979)];
        let rows = expected.iter().map(StoreRow::from).collect();
        let store = RecordingStore::with_rows(rows);
        let catalog = MovieCatalog::new(store.clone(), PlannerMode::Uniform);

        let movies = catalog.search(&RawFilterParams::default()).await.unwrap();

        assert_eq!(movies, expected);
        assert_eq!(store.executed().len(), 1);
    }

    #[tokio::test]
    async fn search_passes_decoded_values_as_binds() {
        let store = RecordingStore::with_rows(Vec::new());
        let catalog = MovieCatalog::new(store.clone(), PlannerMode::Uniform);

        let raw = RawFilterParams::new("M%61trix", "", "1990", "");
        catalog.search(&raw).await.unwrap();

        let executed = store.executed();
        assert_eq!(
            executed[0].params,
            vec![BindValue::Text("Matrix".into()), BindValue::Int(1990)]
        );
    }

    #[tokio::test]
    async fn mode_selects_the_shape_table() {
        let raw = RawFilterParams::new("War", "", "1990", "2000");

        let legacy_store = RecordingStore::with_rows(Vec::new());
        MovieCatalog::new(legacy_store.clone(), PlannerMode::Legacy)
            .search(&raw)
            .await
            .unwrap();
        assert_eq!(legacy_store.executed()[0].params.len(), 2);

        let uniform_store = RecordingStore::with_rows(Vec::new());
        MovieCatalog::new(uniform_store.clone(), PlannerMode::Uniform)
            .search(&raw)
            .await
            .unwrap();
        assert_eq!(uniform_store.executed()[0].params.len(), 3);
    }

    #[tokio::test]
    async fn decode_error_aborts_before_the_store() {
        let store = RecordingStore::with_rows(Vec::new());
        let catalog = MovieCatalog::new(store.clone(), PlannerMode::Uniform);

        let result = catalog.search(&RawFilterParams::new("%G1", "", "", "")).await;

        assert_matches!(result, Err(CoreError::Decode { field: FilterField::Title, .. }));
        assert!(store.executed().is_empty());
    }

    #[tokio::test]
    async fn bad_year_aborts_before_the_store() {
        let store = RecordingStore::with_rows(Vec::new());
        let catalog = MovieCatalog::new(store.clone(), PlannerMode::Uniform);

        let result = catalog.search(&RawFilterParams::new("", "", "abc", "")).await;

        assert_matches!(result, Err(CoreError::FilterParse { field: FilterField::StartYear, .. }));
        assert!(store.executed().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_surfaced_once() {
        let store = RecordingStore::failing();
        let catalog = MovieCatalog::new(store.clone(), PlannerMode::Uniform);

        let result = catalog.search(&RawFilterParams::default()).await;

        assert_matches!(result, Err(CoreError::Store(_)));
        assert_eq!(store.executed().len(), 1, "store must not be retried");
    }

    #[tokio::test]
    async fn bad_row_fails_the_whole_request() {
        let good = StoreRow::from(&movie(1, "Alien", 1979));
        let mut bad = StoreRow::new();
        for (i, name) in ["title", "year", "genres", "rating", "raters", "imdb_id", "id"]
            .into_iter()
            .enumerate()
        {
            let cell = if i == 1 {
                Cell::Text("unknown".into())
            } else if i == 0 || i == 2 {
                Cell::Text("x".into())
            } else {
                Cell::Int(1)
            };
            bad.push(name, cell);
        }
        let catalog = MovieCatalog::new(RecordingStore::with_rows(vec![good, bad]), PlannerMode::Uniform);

        let result = catalog.search(&RawFilterParams::default()).await;

        assert_matches!(
            result,
            Err(CoreError::Mapping { row: 1, source: MappingError::NotNumeric { .. } })
        );
    }

    #[tokio::test]
    async fn ping_reports_store_health() {
        let healthy = MovieCatalog::new(RecordingStore::with_rows(Vec::new()), PlannerMode::Uniform);
        assert!(healthy.ping().await.is_ok());

        let down = MovieCatalog::new(RecordingStore::failing(), PlannerMode::Uniform);
        assert!(down.ping().await.is_err());
    }
}
