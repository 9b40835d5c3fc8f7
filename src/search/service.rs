// file: src/search/service.rs
// description: request boundary tying query building, index execution and grouping
// reference: one stateless pass per request

use crate::error::{Result, SearchError};
use crate::index::PassageIndex;
use crate::models::{DocumentGroup, SearchCriteria};
use crate::search::assembler::ResultAssembler;
use crate::search::progress::SearchProgress;
use crate::search::query::{QueryBuilder, QueryPlan};
use crate::utils::OperationTimer;
use futures::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SLOW_SEARCH: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No keyword was given; nothing ran.
    EntryForm,
    NoMatch,
    Found(Vec<DocumentGroup>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub documents: usize,
    pub passages: usize,
}

impl SearchOutcome {
    pub fn groups(&self) -> &[DocumentGroup] {
        match self {
            SearchOutcome::Found(groups) => groups,
            SearchOutcome::EntryForm | SearchOutcome::NoMatch => &[],
        }
    }

    pub fn summary(&self) -> SearchSummary {
        let groups = self.groups();
        SearchSummary {
            documents: groups.len(),
            passages: groups.iter().map(DocumentGroup::passage_count).sum(),
        }
    }
}

pub struct SearchService<I> {
    index: I,
    progress: Option<Arc<SearchProgress>>,
}

impl<I: PassageIndex> SearchService<I> {
    pub fn new(index: I) -> Self {
        Self {
            index,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: Arc<SearchProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Index failures end the request with an error and no groups.
    pub async fn run(&self, criteria: &SearchCriteria) -> Result<SearchOutcome> {
        let predicate = match QueryBuilder::from_criteria(criteria) {
            QueryPlan::EntryForm => {
                debug!("Empty keyword, no search executed");
                return Ok(SearchOutcome::EntryForm);
            }
            QueryPlan::Search(predicate) => predicate,
        };

        debug!("Search predicate: {:?}", predicate);
        let timer = OperationTimer::new("passage search");

        let progress = self.progress.clone();
        let rows = self.index.search(&predicate).inspect_ok(move |_| {
            if let Some(progress) = &progress {
                progress.inc_passage();
            }
        });

        let groups = match ResultAssembler::assemble_stream(rows).await {
            Ok(groups) => groups,
            Err(e) => {
                warn!("Search for {:?} failed: {}", predicate.keyword(), e);
                return Err(e);
            }
        };

        if let Some(progress) = &self.progress {
            progress.set_documents(groups.len());
        }

        let outcome = if groups.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Found(groups)
        };

        let summary = outcome.summary();
        timer.warn_if_slow(SLOW_SEARCH, predicate.keyword());
        timer.finish_with_count(summary.passages);
        info!(
            "Search returned {} passages in {} documents",
            summary.passages, summary.documents
        );

        Ok(outcome)
    }

    /// Like [`SearchService::run`], abandoned as soon as `cancel` resolves.
    /// Dropping the search drops the row stream, which aborts the fetch.
    pub async fn run_until<F>(&self, criteria: &SearchCriteria, cancel: F) -> Result<SearchOutcome>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                debug!("Search for {:?} cancelled", criteria.keyword);
                Err(SearchError::Cancelled)
            }
            outcome = self.run(criteria) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::memory::{MemoryIndex, StoredPassage};
    use crate::utils::Validator;
    use pretty_assertions::assert_eq;

    fn corpus() -> Vec<StoredPassage> {
        vec![
            StoredPassage::new("S100AAAA", "2023-01-01 09:00", 1, "本文 > 第一部 > 事業等のリスク", "為替 と tax の影響"),
            StoredPassage::new("S100BBBB", "2023-01-02 10:00", 1, "本文 > Notes/Revenue", "revenue tax recognised"),
            StoredPassage::new("S100BBBB", "2023-01-02 10:00", 2, "本文 > Notes/Leases", "lease tax expense"),
            StoredPassage::new("S100CCCC", "2023-01-02 10:00", 3, "本文 > Notes/Revenue", "deferred tax asset"),
            StoredPassage::new("S100CCCC", "2023-01-02 10:00", 1, "表紙", "cover page"),
            StoredPassage::new("S100DDDD", "2022-12-30 17:45", 1, "監査報告書", "no match here"),
        ]
    }

    #[tokio::test]
    async fn test_empty_keyword_does_not_touch_index() {
        let service = SearchService::new(MemoryIndex::new(corpus()));

        let outcome = service.run(&SearchCriteria::new("", "Notes")).await.unwrap();

        assert_eq!(outcome, SearchOutcome::EntryForm);
        assert_eq!(service.index().searches(), 0);
        assert_eq!(outcome.summary(), SearchSummary::default());
    }

    #[tokio::test]
    async fn test_no_match_is_not_an_error() {
        let service = SearchService::new(MemoryIndex::new(corpus()));

        let outcome = service.run(&SearchCriteria::new("dividend", "")).await.unwrap();

        assert_eq!(outcome, SearchOutcome::NoMatch);
        assert_eq!(service.index().searches(), 1);
    }

    #[tokio::test]
    async fn test_groups_follow_submission_order() {
        let service = SearchService::new(MemoryIndex::new(corpus()));

        let outcome = service.run(&SearchCriteria::new("tax", "")).await.unwrap();
        let ids: Vec<&str> = outcome
            .groups()
            .iter()
            .map(|g| g.document_id.as_str())
            .collect();

        assert_eq!(ids, vec!["S100BBBB", "S100CCCC", "S100AAAA"]);
        assert_eq!(outcome.summary(), SearchSummary { documents: 3, passages: 4 });
    }

    #[tokio::test]
    async fn test_undated_filings_are_listed_last() {
        let mut passages = corpus();
        passages.push(StoredPassage::new("S100NULL", "", 1, "本文", "tax without a date"));
        let service = SearchService::new(MemoryIndex::new(passages));

        let outcome = service.run(&SearchCriteria::new("tax", "")).await.unwrap();
        let groups = outcome.groups();

        assert_eq!(groups.len(), 4);
        assert_eq!(groups[3].document_id, "S100NULL");
        assert_eq!(groups[3].submitted_at, None);
        assert_eq!(groups[3].submitted_at_display(), "");
    }

    #[tokio::test]
    async fn test_breadcrumb_filter_restricts_passages() {
        let service = SearchService::new(MemoryIndex::new(corpus()));

        let outcome = service
            .run(&SearchCriteria::new("tax", "Notes/Revenue"))
            .await
            .unwrap();

        assert_eq!(outcome.summary(), SearchSummary { documents: 2, passages: 2 });
        for group in outcome.groups() {
            for passage in &group.passages {
                assert!(passage.breadcrumb.contains("Notes/Revenue"));
            }
        }
    }

    #[tokio::test]
    async fn test_empty_filter_matches_unfiltered_search() {
        let index = MemoryIndex::new(corpus());
        let unfiltered = index
            .matches(QueryBuilder::unrestricted("tax").predicate().unwrap());

        let service = SearchService::new(index);
        let outcome = service.run(&SearchCriteria::new("tax", "")).await.unwrap();

        assert_eq!(outcome.summary().passages, unfiltered.len());
    }

    #[tokio::test]
    async fn test_index_failure_yields_no_partial_groups() {
        let service = SearchService::new(MemoryIndex::new(corpus()).failing_after(2));

        let result = service.run(&SearchCriteria::new("tax", "")).await;

        match result {
            Err(err) => assert!(err.is_index_failure()),
            Ok(outcome) => panic!("expected failure, got {:?}", outcome),
        }
    }

    #[tokio::test]
    async fn test_failure_before_first_row() {
        let service = SearchService::new(MemoryIndex::new(corpus()).failing_after(0));

        let result = service.run(&SearchCriteria::new("tax", "")).await;
        assert!(matches!(result, Err(SearchError::IndexQuery(_))));
    }

    #[tokio::test]
    async fn test_progress_counts_rows() {
        let progress = Arc::new(SearchProgress::hidden());
        let service =
            SearchService::new(MemoryIndex::new(corpus())).with_progress(progress.clone());

        service.run(&SearchCriteria::new("tax", "")).await.unwrap();

        let stats = progress.get_stats();
        assert_eq!(stats.passages_received, 4);
        assert_eq!(stats.documents_assembled, 3);
    }

    #[test]
    fn test_index_output_is_contiguous() {
        let index = MemoryIndex::new(corpus());

        for (keyword, filter) in [("tax", ""), ("tax", "Notes"), ("page", ""), ("e", "")] {
            let plan = QueryBuilder::build(keyword, filter);
            let rows = index.matches(plan.predicate().unwrap());
            assert!(Validator::validate_contiguous(&rows).is_ok(), "{} / {}", keyword, filter);
            assert!(Validator::validate_submission_order(&rows).is_ok());
        }
    }

    #[tokio::test]
    async fn test_snippets_are_highlighted_and_bounded() {
        let service = SearchService::new(MemoryIndex::new(corpus()).with_snippet_width(9));

        let outcome = service
            .run(&SearchCriteria::new("tax", "Notes/Leases"))
            .await
            .unwrap();
        let snippet = &outcome.groups()[0].passages[0].highlighted_snippet;

        assert_eq!(snippet, "lease <span class=\"keyword\">tax</span>");
    }

    #[tokio::test]
    async fn test_cancelled_search_returns_single_error() {
        let service = SearchService::new(MemoryIndex::new(corpus()));

        let err = service
            .run_until(&SearchCriteria::new("tax", ""), std::future::ready(()))
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Cancelled));
        assert_eq!(err.to_string(), "Search cancelled");
        assert!(!err.is_index_failure());
    }

    #[tokio::test]
    async fn test_uncancelled_search_completes() {
        let service = SearchService::new(MemoryIndex::new(corpus()));

        let outcome = service
            .run_until(&SearchCriteria::new("tax", ""), std::future::pending())
            .await
            .unwrap();

        assert_eq!(outcome.summary(), SearchSummary { documents: 3, passages: 4 });
    }
}
