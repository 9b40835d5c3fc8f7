// file: src/index/memory.rs
// description: in-memory passage index used by tests
// reference: substring matching stand-in for the PGroonga operators

use crate::error::{Result, SearchError};
use crate::index::PassageIndex;
use crate::models::{PassageMatch, SearchPredicate};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
pub struct StoredPassage {
    pub document_id: String,
    pub document_title: String,
    pub submitted_at: String,
    pub seq: u32,
    pub breadcrumb: String,
    pub content: String,
}

impl StoredPassage {
    pub fn new(document_id: &str, submitted_at: &str, seq: u32, breadcrumb: &str, content: &str) -> Self {
        Self {
            document_id: document_id.to_string(),
            document_title: format!("Filer of {}", document_id),
            submitted_at: submitted_at.to_string(),
            seq,
            breadcrumb: breadcrumb.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Default)]
pub struct MemoryIndex {
    passages: Vec<StoredPassage>,
    snippet_width: usize,
    fail_after: Option<usize>,
    searches: AtomicUsize,
}

impl MemoryIndex {
    pub fn new(passages: Vec<StoredPassage>) -> Self {
        Self {
            passages,
            snippet_width: 400,
            fail_after: None,
            searches: AtomicUsize::new(0),
        }
    }

    /// Yields `rows` matches, then a query failure.
    pub fn failing_after(mut self, rows: usize) -> Self {
        self.fail_after = Some(rows);
        self
    }

    pub fn with_snippet_width(mut self, width: usize) -> Self {
        self.snippet_width = width;
        self
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    fn snippet(&self, content: &str, keyword: &str) -> String {
        let excerpt: String = content.chars().take(self.snippet_width).collect();
        excerpt.replace(keyword, &format!("<span class=\"keyword\">{}</span>", keyword))
    }

    pub fn matches(&self, predicate: &SearchPredicate) -> Vec<PassageMatch> {
        let mut hits: Vec<&StoredPassage> = self
            .passages
            .iter()
            .filter(|p| p.content.contains(predicate.keyword()))
            .filter(|p| match predicate.breadcrumb().as_filter() {
                Some(filter) => p.breadcrumb.contains(filter),
                None => true,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.document_id.cmp(&b.document_id))
                .then_with(|| a.seq.cmp(&b.seq))
        });

        hits.into_iter()
            .map(|p| {
                PassageMatch::new(
                    p.document_id.clone(),
                    p.document_title.clone(),
                    "有価証券報告書".to_string(),
                    PassageMatch::parse_submitted_at(&p.submitted_at),
                    p.breadcrumb.clone(),
                    self.snippet(&p.content, predicate.keyword()),
                )
            })
            .collect()
    }
}

impl PassageIndex for MemoryIndex {
    fn search<'a>(&'a self, predicate: &'a SearchPredicate) -> BoxStream<'a, Result<PassageMatch>> {
        self.searches.fetch_add(1, Ordering::SeqCst);

        let mut rows: Vec<Result<PassageMatch>> = self.matches(predicate).into_iter().map(Ok).collect();

        if let Some(limit) = self.fail_after {
            rows.truncate(limit);
            rows.push(Err(SearchError::IndexQuery(
                "server closed the connection unexpectedly".to_string(),
            )));
        }

        stream::iter(rows).boxed()
    }
}
