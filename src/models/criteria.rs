// file: src/models/criteria.rs
// description: raw search request and the predicate handed to the index
// reference: optional filters modelled as tagged choices

use serde::{Deserialize, Serialize};

/// The user's request exactly as submitted: two untyped strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text keyword. Empty means "no search performed".
    pub keyword: String,

    /// Table-of-contents path filter. Empty means "no restriction".
    pub breadcrumb_filter: String,
}

impl SearchCriteria {
    pub fn new(keyword: impl Into<String>, breadcrumb_filter: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            breadcrumb_filter: breadcrumb_filter.into(),
        }
    }
}

/// Structural restriction on matched passages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BreadcrumbFilter {
    NoFilter,
    FilterBy(String),
}

impl BreadcrumbFilter {
    /// Only the zero-length string means "no filter"; anything else,
    /// whitespace included, is forwarded to the index untouched.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            BreadcrumbFilter::NoFilter
        } else {
            BreadcrumbFilter::FilterBy(raw.to_string())
        }
    }

    pub fn as_filter(&self) -> Option<&str> {
        match self {
            BreadcrumbFilter::NoFilter => None,
            BreadcrumbFilter::FilterBy(value) => Some(value),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, BreadcrumbFilter::FilterBy(_))
    }
}

/// "content matches keyword AND breadcrumb filter holds".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPredicate {
    keyword: String,
    breadcrumb: BreadcrumbFilter,
}

impl SearchPredicate {
    pub(crate) fn new(keyword: String, breadcrumb: BreadcrumbFilter) -> Self {
        debug_assert!(!keyword.is_empty());
        Self {
            keyword,
            breadcrumb,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn breadcrumb(&self) -> &BreadcrumbFilter {
        &self.breadcrumb
    }
}
