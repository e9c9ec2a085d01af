//! Blob preview text and the in-place search filter applied to it.
//!
//! A preview is a header block (`File`, `Content-Type`, `Size`, then a blank
//! line) followed by a body. Filtering only ever matches body lines; the
//! header is always shown verbatim.

use crate::catalog::Blob;
use crate::details::format_bytes;

pub const SELECT_BLOB: &str = "Select a blob to preview.";
pub const NO_PREVIEW: &str = "No preview available.";
pub const LOAD_FAILED: &str = "Unable to load data.";

const IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

const LOG_SAMPLE: &str = "2024-05-11T03:12:00Z INFO job=ingest msg=\"started\"\n\
                          2024-05-11T03:12:02Z INFO job=ingest msg=\"completed\"\n";

const ROBOTS_SAMPLE: &str = "User-agent: *\nDisallow: /private\n";

const INDEX_HTML: &str = "<!doctype html>\n<html>\n  <head>\n    <title>Storage Preview</title>\n  </head>\n  <body>\n    <h1>Hello from storage-tui</h1>\n    <p>This is mock HTML content.</p>\n  </body>\n</html>\n";

const GENERIC_HTML: &str =
    "<!doctype html>\n<html>\n  <body>\n    <p>Mock HTML preview.</p>\n  </body>\n</html>\n";

/// Full preview text for a blob plus whether it can be searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub text: String,
    pub searchable: bool,
}

pub fn render_preview(blob: &Blob) -> Preview {
    let header = format!(
        "File: {}\nContent-Type: {}\nSize: {}\n\n",
        blob.name,
        blob.content_type,
        format_bytes(blob.size_bytes)
    );

    let (body, searchable) = match blob.content_type.as_str() {
        "text/plain" => (text_body(&blob.name), true),
        "text/html" => (html_body(&blob.name).to_string(), true),
        t if IMAGE_TYPES.contains(&t) => {
            ("Binary content preview not available.".to_string(), false)
        }
        _ => (
            "Preview not available for this content type.".to_string(),
            false,
        ),
    };

    Preview {
        text: header + &body,
        searchable,
    }
}

fn text_body(name: &str) -> String {
    if name.ends_with(".log") {
        LOG_SAMPLE.to_string()
    } else if name == "robots.txt" {
        ROBOTS_SAMPLE.to_string()
    } else {
        format!("Preview placeholder for {}.\n", name)
    }
}

fn html_body(name: &str) -> &'static str {
    if name == "index.html" {
        INDEX_HTML
    } else {
        GENERIC_HTML
    }
}

/// Keep the header and only the body lines containing `term`.
///
/// Matching is case-insensitive substring containment. A blank term returns
/// `full` unchanged. When nothing matches, the body is replaced with
/// `No matches for "<term>".` with the term exactly as given.
pub fn apply_filter(full: &str, term: &str) -> String {
    if term.trim().is_empty() {
        return full.to_string();
    }

    let lines: Vec<&str> = full.split('\n').collect();
    let header_end = lines.iter().position(|line| line.is_empty());
    let body_start = header_end.map_or(0, |i| i + 1);

    let needle = term.to_lowercase();
    let matches: Vec<&str> = lines[body_start..]
        .iter()
        .copied()
        .filter(|line| line.to_lowercase().contains(&needle))
        .collect();

    let mut out = String::new();
    if let Some(end) = header_end {
        out.push_str(&lines[..=end].join("\n"));
        out.push('\n');
    }
    if matches.is_empty() {
        out.push_str(&format!("No matches for \"{}\".\n", term));
    } else {
        for line in matches {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// What the preview pane currently holds.
///
/// `full` is never modified by searching; the displayed text is derived from
/// it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    full: String,
    term: String,
    searchable: bool,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::message(SELECT_BLOB)
    }
}

impl PreviewState {
    /// Non-searchable informational text.
    pub fn message(text: &str) -> Self {
        Self {
            full: text.to_string(),
            term: String::new(),
            searchable: false,
        }
    }

    /// Replace the content. Any active search term is dropped with it.
    pub fn set_content(&mut self, preview: Preview) {
        *self = Self {
            full: preview.text,
            term: String::new(),
            searchable: preview.searchable,
        };
    }

    pub fn set_message(&mut self, text: &str) {
        *self = Self::message(text);
    }

    pub fn full_text(&self) -> &str {
        &self.full
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn filter_active(&self) -> bool {
        self.searchable && !self.term.is_empty()
    }

    /// Set the search term. Blank input clears the filter.
    pub fn submit(&mut self, term: &str) {
        self.term = term.trim().to_string();
    }

    pub fn clear(&mut self) {
        self.term.clear();
    }

    pub fn displayed(&self) -> String {
        if self.filter_active() {
            apply_filter(&self.full, &self.term)
        } else {
            self.full.clone()
        }
    }

    pub fn title(&self) -> String {
        if self.filter_active() {
            format!("Preview (filter: {})", self.term)
        } else {
            "Preview".to_string()
        }
    }
}
