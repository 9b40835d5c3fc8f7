// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod criteria;
pub mod document_group;
pub mod passage;

pub use criteria::{BreadcrumbFilter, SearchCriteria, SearchPredicate};
pub use document_group::{DocumentGroup, Passage};
pub use passage::PassageMatch;
