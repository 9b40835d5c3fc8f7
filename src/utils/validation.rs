// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{Result, SearchError};
use crate::models::PassageMatch;
use std::collections::HashSet;

pub struct Validator;

impl Validator {
    /// Checks that every document's rows form one unbroken run, the
    /// precondition of the result assembler. Intended for exercising index
    /// implementations in tests; the search path never calls it.
    pub fn validate_contiguous(rows: &[PassageMatch]) -> Result<()> {
        let mut closed: HashSet<&str> = HashSet::new();
        let mut current: Option<&str> = None;

        for (position, row) in rows.iter().enumerate() {
            let id = row.document_id.as_str();
            if current == Some(id) {
                continue;
            }

            if closed.contains(id) {
                return Err(SearchError::Validation(format!(
                    "Rows for document {} are not contiguous (row {})",
                    id, position
                )));
            }

            if let Some(previous) = current {
                closed.insert(previous);
            }
            current = Some(id);
        }

        Ok(())
    }

    /// Checks the newest-first ordering the index promises.
    pub fn validate_submission_order(rows: &[PassageMatch]) -> Result<()> {
        for (position, pair) in rows.windows(2).enumerate() {
            if pair[0].submitted_at < pair[1].submitted_at {
                return Err(SearchError::Validation(format!(
                    "Row {} was submitted after row {}",
                    position + 1,
                    position
                )));
            }
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SearchError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(doc: &str, submitted: &str) -> PassageMatch {
        PassageMatch::new(
            doc.to_string(),
            String::new(),
            String::new(),
            PassageMatch::parse_submitted_at(submitted),
            String::new(),
            String::new(),
        )
    }

    #[test]
    fn test_validate_contiguous() {
        let rows = vec![
            row("1", "2023-01-02 00:00"),
            row("1", "2023-01-02 00:00"),
            row("2", "2023-01-01 00:00"),
        ];
        assert!(Validator::validate_contiguous(&rows).is_ok());
        assert!(Validator::validate_contiguous(&[]).is_ok());
    }

    #[test]
    fn test_validate_contiguous_detects_interleaving() {
        let rows = vec![
            row("1", "2023-01-02 00:00"),
            row("2", "2023-01-02 00:00"),
            row("1", "2023-01-02 00:00"),
        ];
        let err = Validator::validate_contiguous(&rows).unwrap_err();
        assert!(err.to_string().contains("document 1"));
    }

    #[test]
    fn test_validate_submission_order() {
        let ordered = vec![row("1", "2023-01-02 00:00"), row("2", "2023-01-01 00:00")];
        assert!(Validator::validate_submission_order(&ordered).is_ok());

        let reversed = vec![row("2", "2023-01-01 00:00"), row("1", "2023-01-02 00:00")];
        assert!(Validator::validate_submission_order(&reversed).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
    }
}
