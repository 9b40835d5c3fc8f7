// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod index;
pub mod models;
pub mod search;
pub mod utils;

pub use config::{Config, DatabaseConfig, SearchConfig};
pub use error::{Result, SearchError};
pub use exporter::{JsonExporter, SearchReport, TextRenderer};
pub use index::{PassageIndex, PgroongaIndex, SchemaManager, SchemaReport};
pub use models::{
    BreadcrumbFilter, DocumentGroup, Passage, PassageMatch, SearchCriteria, SearchPredicate,
};
pub use search::{
    QueryBuilder, QueryPlan, ResultAssembler, SearchOutcome, SearchProgress, SearchService,
    SearchSummary,
};
pub use utils::{
    HealthCheck, HealthReport, HealthStatus, IndexComponent, OperationTimer, Validator,
};
