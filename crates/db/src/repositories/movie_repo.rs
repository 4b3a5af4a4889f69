//! Repository for the `movies` table.

use cinedex_core::mapper::SELECT_LIST;
use cinedex_core::movie::Movie;
use cinedex_core::planner::{BindValue, PlannedQuery};
use cinedex_core::types::DbId;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::PgPool;

/// Column list for INSERT, in select-list order.
const INSERT_COLUMNS: &str = "title, year, genres, rating, raters, imdb_id, id";

/// Provides query and insert operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Run a planned catalog query and return the raw rows in store order.
    pub async fn fetch_planned(
        pool: &PgPool,
        query: &PlannedQuery,
    ) -> Result<Vec<PgRow>, sqlx::Error> {
        bind_values(sqlx::query(&query.sql), &query.params)
            .fetch_all(pool)
            .await
    }

    /// Insert a movie row.
    pub async fn insert(pool: &PgPool, movie: &Movie) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO movies ({INSERT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        );
        sqlx::query(&query)
            .bind(&movie.title)
            .bind(movie.year)
            .bind(&movie.genres)
            .bind(movie.rating)
            .bind(movie.num_raters)
            .bind(movie.imdb_id)
            .bind(movie.id)
            .execute(pool)
            .await
            .map(|_| ())
    }

    /// Find a movie by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PgRow>, sqlx::Error> {
        let query = format!("SELECT {SELECT_LIST} FROM movies WHERE id = $1");
        sqlx::query(&query).bind(id).fetch_optional(pool).await
    }

    /// Count all movies.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM movies")
            .fetch_one(pool)
            .await
    }
}

/// Bind a slice of `BindValue` to a sqlx `Query`, in order.
fn bind_values<'q>(
    mut q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Int(v) => q = q.bind(*v),
        }
    }
    q
}
