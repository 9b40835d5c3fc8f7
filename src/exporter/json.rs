// file: src/exporter/json.rs
// description: json export of assembled search results

use crate::error::{Result, SearchError};
use crate::models::{BreadcrumbFilter, DocumentGroup, SearchCriteria};
use crate::search::{QueryBuilder, SearchOutcome, SearchSummary};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct ExportedDocument<'a> {
    #[serde(flatten)]
    pub group: &'a DocumentGroup,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct SearchReport<'a> {
    pub exported_at: String,
    pub keyword: &'a str,
    pub breadcrumb_filter: BreadcrumbFilter,
    pub summary: SearchSummary,
    pub documents: Vec<ExportedDocument<'a>>,
}

impl<'a> SearchReport<'a> {
    pub fn new(criteria: &'a SearchCriteria, outcome: &'a SearchOutcome, base_url: &str) -> Self {
        let breadcrumb_filter = QueryBuilder::from_criteria(criteria)
            .predicate()
            .map(|p| p.breadcrumb().clone())
            .unwrap_or(BreadcrumbFilter::NoFilter);

        Self {
            exported_at: Utc::now().to_rfc3339(),
            keyword: &criteria.keyword,
            breadcrumb_filter,
            summary: outcome.summary(),
            documents: outcome
                .groups()
                .iter()
                .map(|group| ExportedDocument {
                    url: group.disclosure_url(base_url),
                    group,
                })
                .collect(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the report to `<output_dir>/<file_name>` and returns the path.
    pub fn export(&self, report: &SearchReport<'_>, file_name: &str, pretty: bool) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        fs::write(&path, report.to_json(pretty)?)?;

        info!(
            "Exported {} documents to {}",
            report.summary.documents,
            path.display()
        );
        Ok(path)
    }

    /// Writes the report to `path`, creating missing parent directories.
    pub fn export_to_file(report: &SearchReport<'_>, path: &Path, pretty: bool) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| SearchError::Validation(format!("Invalid output file: {}", path.display())))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Self::new(dir)?.export(report, file_name, pretty)
    }
}
