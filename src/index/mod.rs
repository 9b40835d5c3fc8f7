// file: src/index/mod.rs
// description: full-text index access module exports
// reference: internal module structure

pub mod client;
pub mod schema;
pub mod statement;

#[cfg(test)]
pub(crate) mod memory;

pub use client::PgroongaIndex;
pub use schema::{SchemaManager, SchemaReport};
pub use statement::PassageStatement;

use crate::error::Result;
use crate::models::{PassageMatch, SearchPredicate};
use futures::stream::BoxStream;

/// Source of matched passages for a predicate.
///
/// Implementations yield rows ordered by submission time, newest first, and
/// must keep every row of one document adjacent to the others.
pub trait PassageIndex: Send + Sync {
    fn search<'a>(&'a self, predicate: &'a SearchPredicate) -> BoxStream<'a, Result<PassageMatch>>;
}
