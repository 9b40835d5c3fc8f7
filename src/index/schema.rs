// file: src/index/schema.rs
// description: read-only verification of the tables and index the search relies on
// reference: https://pgroonga.github.io/reference/

use crate::error::Result;
use crate::index::client::PgroongaIndex;
use crate::index::statement::{CONTENT_INDEX, DOCUMENTS_TABLE, PASSAGES_TABLE, VERIFY_SCHEMA};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub pgroonga_extension: bool,
    pub documents_table: bool,
    pub passages_table: bool,
    pub content_index: bool,
}

impl SchemaReport {
    pub fn is_complete(&self) -> bool {
        self.pgroonga_extension && self.documents_table && self.passages_table && self.content_index
    }

    pub fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.pgroonga_extension {
            missing.push("extension pgroonga".to_string());
        }
        if !self.documents_table {
            missing.push(format!("table {}", DOCUMENTS_TABLE));
        }
        if !self.passages_table {
            missing.push(format!("table {}", PASSAGES_TABLE));
        }
        if !self.content_index {
            missing.push(format!("index {}", CONTENT_INDEX));
        }
        missing
    }
}

pub struct SchemaManager<'a> {
    index: &'a PgroongaIndex,
}

impl<'a> SchemaManager<'a> {
    pub fn new(index: &'a PgroongaIndex) -> Self {
        Self { index }
    }

    pub async fn inspect(&self) -> Result<SchemaReport> {
        let (pgroonga_extension, documents_table, passages_table, content_index): (
            bool,
            bool,
            bool,
            bool,
        ) = sqlx::query_as(VERIFY_SCHEMA)
            .fetch_one(self.index.pool())
            .await?;

        Ok(SchemaReport {
            pgroonga_extension,
            documents_table,
            passages_table,
            content_index,
        })
    }

    pub async fn verify_schema(&self) -> Result<bool> {
        let report = self.inspect().await?;

        if report.is_complete() {
            info!("Schema verified: PGroonga extension, tables and content index present");
            return Ok(true);
        }

        for item in report.missing() {
            warn!("Schema incomplete: missing {}", item);
        }
        Ok(false)
    }
}
