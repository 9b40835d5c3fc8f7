// file: src/search/assembler.rs
// description: folds the ordered passage stream into per-document groups
// reference: streaming group-by on a contiguous key

use crate::error::Result;
use crate::models::{DocumentGroup, PassageMatch};
use futures::{Stream, StreamExt};

/// Single forward pass over index rows.
///
/// Precondition: all rows of one document arrive back to back. The index
/// orders by submission time with the document id as tie breaker, which
/// guarantees it. Interleaved input is not repaired here; it produces one
/// group per run of equal ids.
#[derive(Debug, Default)]
pub struct ResultAssembler {
    open: Option<DocumentGroup>,
}

impl ResultAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one row. Returns the previous group when `row` starts a new
    /// document.
    pub fn push(&mut self, row: PassageMatch) -> Option<DocumentGroup> {
        let closed = match &self.open {
            Some(group) if group.document_id == row.document_id => None,
            _ => self.open.replace(DocumentGroup::seeded_from(&row)),
        };

        if let Some(group) = self.open.as_mut() {
            group.push(row);
        }

        closed
    }

    /// Closes the last open group, if any.
    pub fn finish(self) -> Option<DocumentGroup> {
        self.open
    }

    pub fn assemble<I>(rows: I) -> Vec<DocumentGroup>
    where
        I: IntoIterator<Item = PassageMatch>,
    {
        let mut assembler = Self::new();
        let mut groups = Vec::new();

        for row in rows {
            groups.extend(assembler.push(row));
        }

        groups.extend(assembler.finish());
        groups
    }

    /// Like [`ResultAssembler::assemble`] over a fallible stream. The first
    /// error ends assembly and everything gathered so far is dropped.
    pub async fn assemble_stream<S>(rows: S) -> Result<Vec<DocumentGroup>>
    where
        S: Stream<Item = Result<PassageMatch>>,
    {
        let mut rows = std::pin::pin!(rows);
        let mut assembler = Self::new();
        let mut groups = Vec::new();

        while let Some(row) = rows.next().await {
            groups.extend(assembler.push(row?));
        }

        groups.extend(assembler.finish());
        Ok(groups)
    }
}
