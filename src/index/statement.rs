// file: src/index/statement.rs
// description: SQL statements issued against the PGroonga full-text index
// reference: https://pgroonga.github.io/reference/

use crate::models::SearchPredicate;

pub const DOCUMENTS_TABLE: &str = "documents";
pub const PASSAGES_TABLE: &str = "document_texts";
pub const CONTENT_INDEX: &str = "pgroonga_content_index";

// $1 keyword, $2 snippet width, $3 breadcrumb filter. Ties on submission
// time are broken by document id so one document's rows stay adjacent;
// filings without a submission time come last.
macro_rules! passage_query {
    ($breadcrumb_clause:literal) => {
        concat!(
            "\
SELECT
    m.docid AS document_id,
    m.filername AS document_title,
    m.docdescription AS document_description,
    m.submitdatetime AS submitted_at,
    d.breadcrumb AS breadcrumb,
    (pgroonga_snippet_html(d.content, pgroonga_query_extract_keywords($1), $2))[1] AS highlighted_snippet
FROM documents m
JOIN document_texts d ON m.docid = d.docid
WHERE d.content &@~ $1",
            $breadcrumb_clause,
            "
ORDER BY m.submitdatetime DESC NULLS LAST, m.docid, d.seq"
        )
    };
}

const SELECT_PASSAGES: &str = passage_query!("");
const SELECT_PASSAGES_IN_BREADCRUMB: &str = passage_query!("\n    AND d.breadcrumb &@~ $3");

/// A rendered passage search: fixed SQL text plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageStatement<'p> {
    sql: &'static str,
    keyword: &'p str,
    breadcrumb: Option<&'p str>,
    snippet_width: i32,
}

impl<'p> PassageStatement<'p> {
    pub fn for_predicate(predicate: &'p SearchPredicate, snippet_width: u32) -> Self {
        let breadcrumb = predicate.breadcrumb().as_filter();
        let sql = if breadcrumb.is_some() {
            SELECT_PASSAGES_IN_BREADCRUMB
        } else {
            SELECT_PASSAGES
        };

        Self {
            sql,
            keyword: predicate.keyword(),
            breadcrumb,
            snippet_width: i32::try_from(snippet_width).unwrap_or(i32::MAX),
        }
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }

    pub fn keyword(&self) -> &'p str {
        self.keyword
    }

    pub fn breadcrumb(&self) -> Option<&'p str> {
        self.breadcrumb
    }

    pub fn snippet_width(&self) -> i32 {
        self.snippet_width
    }

    pub fn bind_count(&self) -> usize {
        if self.breadcrumb.is_some() { 3 } else { 2 }
    }
}

pub const VERIFY_SCHEMA: &str = "\
SELECT
    EXISTS (SELECT 1 FROM pg_extension WHERE extname = 'pgroonga'),
    to_regclass('documents') IS NOT NULL,
    to_regclass('document_texts') IS NOT NULL,
    to_regclass('pgroonga_content_index') IS NOT NULL";

pub const COUNT_DOCUMENTS: &str = "SELECT COUNT(*) FROM documents";
pub const COUNT_PASSAGES: &str = "SELECT COUNT(*) FROM document_texts";
