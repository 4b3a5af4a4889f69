//! [`MovieStore`] backed by a Postgres pool.

use async_trait::async_trait;
use cinedex_core::error::StoreError;
use cinedex_core::mapper::{Cell, StoreRow};
use cinedex_core::planner::PlannedQuery;
use cinedex_core::store::MovieStore;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::repositories::MovieRepo;
use crate::DbPool;

/// A result column whose Postgres type has no [`Cell`] representation.
#[derive(Debug, thiserror::Error)]
pub enum RowConversionError {
    #[error("column '{column}' has unsupported type {type_name}")]
    Unsupported { column: String, type_name: String },

    #[error("column '{column}' could not be decoded: {source}")]
    Decode {
        column: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Executes planned catalog queries on a shared connection pool.
#[derive(Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn execute(&self, query: &PlannedQuery) -> Result<Vec<StoreRow>, StoreError> {
        tracing::trace!(sql = %query.sql, params = query.params.len(), "Executing catalog query");
        let rows = MovieRepo::fetch_planned(&self.pool, query)
            .await
            .map_err(StoreError::new)?;

        rows.iter()
            .map(to_store_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::new)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(StoreError::new)
    }
}

/// Convert a Postgres row into an owned [`StoreRow`], keeping column names
/// and order as returned by the server.
pub fn to_store_row(row: &PgRow) -> Result<StoreRow, RowConversionError> {
    let mut out = StoreRow::new();
    for (index, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let decode = |source| RowConversionError::Decode {
            column: name.to_string(),
            source,
        };

        let is_null = row.try_get_raw(index).map_err(decode)?.is_null();
        let cell = if is_null {
            Cell::Null
        } else {
            match column.type_info().name() {
                "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                    Cell::Text(row.try_get::<String, _>(index).map_err(decode)?)
                }
                "INT2" => Cell::Int(row.try_get::<i16, _>(index).map_err(decode)?.into()),
                "INT4" => Cell::Int(row.try_get::<i32, _>(index).map_err(decode)?.into()),
                "INT8" => Cell::Int(row.try_get::<i64, _>(index).map_err(decode)?),
                "FLOAT4" => Cell::Float(row.try_get::<f32, _>(index).map_err(decode)?.into()),
                "FLOAT8" => Cell::Float(row.try_get::<f64, _>(index).map_err(decode)?),
                other => {
                    return Err(RowConversionError::Unsupported {
                        column: name.to_string(),
                        type_name: other.to_string(),
                    })
                }
            }
        };
        out.push(name, cell);
    }
    Ok(out)
}
