//! Query DSL construction for product search.

pub mod aggregations;
pub mod builder;
pub mod clause;
pub mod sort;

pub use builder::{PAGE_SIZE, QueryBuilder, SearchRequestDoc, build};
pub use clause::QueryClause;
pub use sort::{SortDirection, SortSpec, UserQuery};
