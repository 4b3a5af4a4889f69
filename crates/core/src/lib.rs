//! Cinedex core: filter resolution and query construction for catalog lookups.
//!
//! No I/O lives here. The request pipeline is
//! [`RawFilterParams`](request::RawFilterParams) →
//! [`FilterSet`](filters::FilterSet) → [`PlannedQuery`](planner::PlannedQuery)
//! → [`MovieStore`](store::MovieStore) → [`Movie`](movie::Movie), driven by
//! [`MovieCatalog`](catalog::MovieCatalog).

pub mod catalog;
pub mod decode;
pub mod error;
pub mod filters;
pub mod mapper;
pub mod movie;
pub mod planner;
pub mod request;
pub mod store;
pub mod types;
