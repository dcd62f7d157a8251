//! Produce catalog: the inventory the store map points shoppers to.
//!
//! Holds produce records in memory and answers the list, category, location,
//! low-stock, stats, and search queries an inventory API serves. List queries take
//! raw string parameters and validate them into a filter, sort, and page.
//!
//! | Module | Role |
//! |--------|------|
//! | [`produce`] | Record types |
//! | [`query`] | Query-string parsing, filtering, sorting, pagination |
//! | [`catalog`] | The catalog and its read operations |
//! | [`error`] | [`CatalogError`] |

pub mod catalog;
pub mod error;
pub mod produce;
pub mod query;

pub use catalog::{Catalog, Categories, Stats};
pub use error::CatalogError;
pub use produce::{Location, Produce};
pub use query::{ListRequest, Page, Pagination, ProduceFilter, ProduceQuery, Sort, SortField, SortOrder};
