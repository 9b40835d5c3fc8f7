// file: src/models/document_group.rs
// description: assembled search output, one group per matched document
// reference: two-level document -> passages presentation

use crate::models::passage::{PassageMatch, SUBMITTED_AT_FORMAT};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub breadcrumb: String,
    pub highlighted_snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGroup {
    pub document_id: String,
    pub document_title: String,
    pub document_description: String,
    pub submitted_at: Option<NaiveDateTime>,
    pub passages: Vec<Passage>,
}

impl DocumentGroup {
    /// Opens a group carrying the document-level fields of `first`. The
    /// passage itself is not added.
    pub fn seeded_from(first: &PassageMatch) -> Self {
        Self {
            document_id: first.document_id.clone(),
            document_title: first.document_title.clone(),
            document_description: first.document_description.clone(),
            submitted_at: first.submitted_at,
            passages: Vec::new(),
        }
    }

    pub fn push(&mut self, passage: PassageMatch) {
        self.passages.push(Passage {
            breadcrumb: passage.breadcrumb,
            highlighted_snippet: passage.highlighted_snippet,
        });
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    /// Link to the document on the regulator's public viewer.
    pub fn disclosure_url(&self, base_url: &str) -> String {
        format!("{}?{}", base_url.trim_end_matches('?'), self.document_id)
    }

    /// Empty when the filing has no submission time.
    pub fn submitted_at_display(&self) -> String {
        self.submitted_at
            .map(|ts| ts.format(SUBMITTED_AT_FORMAT).to_string())
            .unwrap_or_default()
    }
}
