// file: src/search/progress.rs
// description: spinner and counters while passages stream in from the index
// reference: uses indicatif for progress display and tracks search metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    pub passages_received: usize,
    pub documents_assembled: usize,
    pub duration_ms: u64,
}

impl SearchStats {
    pub fn passages_per_document(&self) -> f64 {
        if self.documents_assembled == 0 {
            return 0.0;
        }
        self.passages_received as f64 / self.documents_assembled as f64
    }
}

pub struct SearchProgress {
    bar: ProgressBar,
    passages: AtomicUsize,
    documents: AtomicUsize,
    start_time: Instant,
}

impl SearchProgress {
    pub fn new(colored: bool) -> Self {
        Self::with_bar(create_spinner(colored))
    }

    /// Counts without drawing anything.
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            passages: AtomicUsize::new(0),
            documents: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_passage(&self) {
        let passages = self.passages.fetch_add(1, Ordering::SeqCst) + 1;
        self.bar.set_message(format!("Passages received: {}", passages));
        self.bar.tick();
    }

    pub fn set_documents(&self, documents: usize) {
        self.documents.store(documents, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            passages_received: self.passages.load(Ordering::SeqCst),
            documents_assembled: self.documents.load(Ordering::SeqCst),
            duration_ms: self.start_time.elapsed().as_millis() as u64,
        }
    }
}

impl Drop for SearchProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_spinner(colored: bool) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] {msg}"
    } else {
        "{spinner} [{elapsed_precise}] {msg}"
    };

    if let Ok(style) = ProgressStyle::default_spinner().template(template) {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar.set_message("Querying index");
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_stats_ratio() {
        let stats = SearchStats {
            passages_received: 9,
            documents_assembled: 3,
            duration_ms: 12,
        };
        assert_eq!(stats.passages_per_document(), 3.0);
        assert_eq!(SearchStats::default().passages_per_document(), 0.0);
    }

    #[test]
    fn test_progress_counts() {
        let progress = SearchProgress::hidden();

        progress.inc_passage();
        progress.inc_passage();
        progress.set_documents(1);

        let stats = progress.get_stats();
        assert_eq!(stats.passages_received, 2);
        assert_eq!(stats.documents_assembled, 1);
    }
}
