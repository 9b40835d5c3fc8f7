// file: src/search/mod.rs
// description: query building, result grouping and the search request boundary
// reference: internal module structure

pub mod assembler;
pub mod progress;
pub mod query;
pub mod service;

pub use assembler::ResultAssembler;
pub use progress::{SearchProgress, SearchStats};
pub use query::{QueryBuilder, QueryPlan};
pub use service::{SearchOutcome, SearchService, SearchSummary};
