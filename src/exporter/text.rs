// file: src/exporter/text.rs
// description: terminal rendering of grouped search results

use crate::models::DocumentGroup;
use crate::search::SearchOutcome;
use colored::Colorize;

const KEYWORD_OPEN: &str = "<span class=\"keyword\">";
const KEYWORD_CLOSE: &str = "</span>";

pub struct TextRenderer {
    base_url: String,
    colored: bool,
    raw: bool,
}

impl TextRenderer {
    pub fn new(base_url: impl Into<String>, colored: bool) -> Self {
        Self {
            base_url: base_url.into(),
            colored,
            raw: false,
        }
    }

    /// Print snippets exactly as the index returned them.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn render(&self, outcome: &SearchOutcome) -> String {
        match outcome {
            SearchOutcome::EntryForm => {
                "Enter a keyword to search annual securities reports.\n\
                 Narrow the search with --breadcrumb <table of contents path>.\n"
                    .to_string()
            }
            SearchOutcome::NoMatch => "No matching results.\n".to_string(),
            SearchOutcome::Found(groups) => {
                let summary = outcome.summary();
                let mut output = format!(
                    "{} passage(s) in {} document(s)\n",
                    summary.passages, summary.documents
                );
                for group in groups {
                    output.push('\n');
                    output.push_str(&self.render_group(group));
                }
                output
            }
        }
    }

    fn render_group(&self, group: &DocumentGroup) -> String {
        let title = if self.colored {
            group.document_title.bold().to_string()
        } else {
            group.document_title.clone()
        };

        let mut output = format!(
            "{}\n  {}／{}\n  {}\n",
            title,
            group.document_description,
            group.submitted_at_display(),
            group.disclosure_url(&self.base_url)
        );

        for passage in &group.passages {
            let breadcrumb = if self.colored {
                passage.breadcrumb.dimmed().to_string()
            } else {
                passage.breadcrumb.clone()
            };
            output.push_str(&format!("  ─ {}\n", breadcrumb));

            let snippet = if self.raw {
                passage.highlighted_snippet.clone()
            } else {
                self.render_snippet(&passage.highlighted_snippet)
            };
            output.push_str(&format!("    {}\n", snippet));
        }

        output
    }

    /// Turns the index's HTML keyword markers into terminal emphasis.
    pub fn render_snippet(&self, snippet: &str) -> String {
        let mut output = String::with_capacity(snippet.len());
        let mut rest = snippet;

        while let Some(start) = rest.find(KEYWORD_OPEN) {
            output.push_str(&unescape_html(&rest[..start]));
            let after_open = &rest[start + KEYWORD_OPEN.len()..];

            let Some(end) = after_open.find(KEYWORD_CLOSE) else {
                rest = after_open;
                break;
            };

            let keyword = unescape_html(&after_open[..end]);
            if self.colored {
                output.push_str(&keyword.red().bold().to_string());
            } else {
                output.push('[');
                output.push_str(&keyword);
                output.push(']');
            }
            rest = &after_open[end + KEYWORD_CLOSE.len()..];
        }

        output.push_str(&unescape_html(rest));
        output
    }
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
