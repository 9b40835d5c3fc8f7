// file: src/index/client.rs
// description: PostgreSQL + PGroonga index client with connection management
// reference: https://docs.rs/sqlx

use crate::config::{DatabaseConfig, SearchConfig};
use crate::error::{Result, SearchError};
use crate::index::PassageIndex;
use crate::index::statement::{COUNT_DOCUMENTS, COUNT_PASSAGES, PassageStatement};
use crate::models::{PassageMatch, SearchPredicate};
use futures::StreamExt;
use futures::stream::BoxStream;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone)]
pub struct PgroongaIndex {
    pool: PgPool,
    snippet_width: u32,
}

impl PgroongaIndex {
    pub async fn connect(database: &DatabaseConfig, search: &SearchConfig) -> Result<Self> {
        info!(
            "Connecting to PGroonga index (max {} connections)",
            database.max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(database.max_connections)
            .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
            .connect(&database.dsn)
            .await
            .map_err(|e| {
                SearchError::IndexUnavailable(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        Ok(Self::from_pool(pool, search.snippet_width))
    }

    pub fn from_pool(pool: PgPool, snippet_width: u32) -> Self {
        Self {
            pool,
            snippet_width,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn snippet_width(&self) -> u32 {
        self.snippet_width
    }

    pub async fn ping(&self) -> Result<bool> {
        debug!("Checking PostgreSQL connection");

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| SearchError::IndexUnavailable(format!("Ping failed: {}", e)))?;

        info!("PostgreSQL connection successful");
        Ok(true)
    }

    pub async fn document_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(COUNT_DOCUMENTS)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    pub async fn passage_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(COUNT_PASSAGES)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}

impl PassageIndex for PgroongaIndex {
    fn search<'a>(&'a self, predicate: &'a SearchPredicate) -> BoxStream<'a, Result<PassageMatch>> {
        let statement = PassageStatement::for_predicate(predicate, self.snippet_width);
        debug!(
            "Running passage search with {} parameters",
            statement.bind_count()
        );

        let mut query = sqlx::query_as::<_, PassageRow>(statement.sql())
            .bind(statement.keyword())
            .bind(statement.snippet_width());

        if let Some(breadcrumb) = statement.breadcrumb() {
            query = query.bind(breadcrumb);
        }

        query
            .fetch(&self.pool)
            .map(|row| row.map_err(SearchError::from).and_then(PassageMatch::try_from))
            .boxed()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PassageRow {
    document_id: String,
    document_title: Option<String>,
    document_description: Option<String>,
    submitted_at: Option<String>,
    breadcrumb: String,
    highlighted_snippet: Option<String>,
}

impl TryFrom<PassageRow> for PassageMatch {
    type Error = SearchError;

    fn try_from(row: PassageRow) -> Result<Self> {
        let submitted_at = match row.submitted_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(PassageMatch::parse_submitted_at(raw).ok_or_else(|| {
                SearchError::RowDecode {
                    document_id: row.document_id.clone(),
                    message: format!("unparsable submission time {:?}", raw),
                }
            })?),
        };

        Ok(PassageMatch::new(
            row.document_id,
            row.document_title.unwrap_or_default(),
            row.document_description.unwrap_or_default(),
            submitted_at,
            row.breadcrumb,
            row.highlighted_snippet.unwrap_or_default(),
        ))
    }
}
