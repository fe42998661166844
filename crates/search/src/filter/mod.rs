//! Facet filters.
//!
//! - [`spec`] - The typed [`FilterSpec`] and its parameter layout
//! - [`applied`] - The [`AppliedFilters`] link-state serializer and parser
//! - [`codec`] - The [`FilterCodec`] that decodes a request's active filters

pub mod applied;
pub mod codec;
pub mod spec;

pub use applied::AppliedFilters;
pub use codec::{DecodedFilters, FilterCodec, FilterPolicy};
pub use spec::{DisplayFilter, FILTER_NAME_PARAM, FilterKind, FilterPayload, FilterSpec};
