//! The store executor seam.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::mapper::StoreRow;
use crate::planner::PlannedQuery;

/// Runs planned statements against the movie data store.
///
/// Implementations own all connection state. The catalog issues exactly one
/// [`execute`](Self::execute) call per request and never retries.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Execute `query` with its binds and return rows in store order.
    async fn execute(&self, query: &PlannedQuery) -> Result<Vec<StoreRow>, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
