// file: src/exporter/mod.rs
// description: rendering of assembled search results
// reference: internal module structure

pub mod json;
pub mod text;

pub use json::{ExportedDocument, JsonExporter, SearchReport};
pub use text::TextRenderer;
