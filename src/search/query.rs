// file: src/search/query.rs
// description: turns raw keyword and breadcrumb strings into a query plan
// reference: optional-filter semantics of the search page

use crate::models::{BreadcrumbFilter, SearchCriteria, SearchPredicate};

/// What a request asks for once its raw input has been interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// Empty keyword: show the entry form, run nothing.
    EntryForm,
    Search(SearchPredicate),
}

impl QueryPlan {
    pub fn predicate(&self) -> Option<&SearchPredicate> {
        match self {
            QueryPlan::EntryForm => None,
            QueryPlan::Search(predicate) => Some(predicate),
        }
    }
}

pub struct QueryBuilder;

impl QueryBuilder {
    /// Input is never trimmed, escaped or parsed here. Query-language
    /// syntax inside either string belongs to the index.
    pub fn build(keyword: &str, breadcrumb_filter: &str) -> QueryPlan {
        if keyword.is_empty() {
            return QueryPlan::EntryForm;
        }

        QueryPlan::Search(SearchPredicate::new(
            keyword.to_string(),
            BreadcrumbFilter::from_raw(breadcrumb_filter),
        ))
    }

    pub fn from_criteria(criteria: &SearchCriteria) -> QueryPlan {
        Self::build(&criteria.keyword, &criteria.breadcrumb_filter)
    }

    /// Predicate with no structural restriction at all.
    pub fn unrestricted(keyword: &str) -> QueryPlan {
        if keyword.is_empty() {
            return QueryPlan::EntryForm;
        }

        QueryPlan::Search(SearchPredicate::new(
            keyword.to_string(),
            BreadcrumbFilter::NoFilter,
        ))
    }
}
