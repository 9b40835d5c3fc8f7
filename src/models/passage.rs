// file: src/models/passage.rs
// description: one matched passage as returned by the full-text index
// reference: one row per passage, tagged with its owning document

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage format of submission timestamps in the `documents` table.
pub const SUBMITTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageMatch {
    /// Opaque document identifier, stable across the document's passages
    pub document_id: String,

    /// Filer name
    pub document_title: String,

    pub document_description: String,

    /// Absent when the filing carries no submission time
    pub submitted_at: Option<NaiveDateTime>,

    /// Table-of-contents path of this passage within the document
    pub breadcrumb: String,

    /// Excerpt with match markers, rendered by the index
    pub highlighted_snippet: String,
}

impl PassageMatch {
    pub fn new(
        document_id: String,
        document_title: String,
        document_description: String,
        submitted_at: Option<NaiveDateTime>,
        breadcrumb: String,
        highlighted_snippet: String,
    ) -> Self {
        Self {
            document_id,
            document_title,
            document_description,
            submitted_at,
            breadcrumb,
            highlighted_snippet,
        }
    }

    pub fn parse_submitted_at(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw.trim(), SUBMITTED_AT_FORMAT).ok()
    }
}
