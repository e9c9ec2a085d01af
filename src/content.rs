//! Flat listing of the blobs in the currently open container.

use crate::catalog::{Blob, CatalogProvider, ProviderError, Scope};
use crate::details::{blob_summary, describe_blob};
use crate::preview::{render_preview, Preview, NO_PREVIEW};
use crate::tree::ContainerLocation;

pub const DEFAULT_TITLE: &str = "Contents";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRow {
    Blob {
        container: ContainerLocation,
        blob: Blob,
    },
    Placeholder {
        reason: String,
        is_error: bool,
    },
}

impl ContentRow {
    pub fn placeholder(reason: impl Into<String>) -> Self {
        ContentRow::Placeholder {
            reason: reason.into(),
            is_error: false,
        }
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, ContentRow::Blob { .. })
    }

    /// Left column text.
    pub fn primary(&self) -> String {
        match self {
            ContentRow::Blob { blob, .. } => blob.name.clone(),
            ContentRow::Placeholder { reason, .. } => reason.clone(),
        }
    }

    /// Right-aligned column text; empty for placeholders.
    pub fn detail(&self) -> String {
        match self {
            ContentRow::Blob { blob, .. } => blob_summary(blob),
            ContentRow::Placeholder { .. } => String::new(),
        }
    }

    pub fn details_text(&self) -> String {
        match self {
            ContentRow::Blob { container, blob } => describe_blob(container, blob),
            ContentRow::Placeholder { reason, .. } => reason.clone(),
        }
    }

    pub fn preview(&self) -> Preview {
        match self {
            ContentRow::Blob { blob, .. } => render_preview(blob),
            ContentRow::Placeholder { .. } => Preview {
                text: NO_PREVIEW.to_string(),
                searchable: false,
            },
        }
    }
}

/// Rows for the content pane. Row indices are positional only; the whole
/// list is rebuilt whenever the container changes.
#[derive(Debug, Clone)]
pub struct ContentList {
    rows: Vec<ContentRow>,
    selected: usize,
    title: String,
}

impl Default for ContentList {
    fn default() -> Self {
        let mut list = Self {
            rows: Vec::new(),
            selected: 0,
            title: DEFAULT_TITLE.to_string(),
        };
        list.show_message("Select a container to view blobs.");
        list
    }
}

impl ContentList {
    pub fn rows(&self) -> &[ContentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn row(&self, index: usize) -> Option<&ContentRow> {
        self.rows.get(index)
    }

    pub fn selected_row(&self) -> Option<&ContentRow> {
        self.row(self.selected)
    }

    /// Rebuild the rows from the blobs of `container`.
    ///
    /// A failed fetch leaves a single error row and hands the error back so
    /// the caller can report it; it never propagates further.
    pub async fn load_for(
        &mut self,
        container: &ContainerLocation,
        provider: &dyn CatalogProvider,
    ) -> Result<(), ProviderError> {
        tracing::debug!(
            account = container.account_name(),
            container = %container.container,
            "listing blobs"
        );
        self.selected = 0;
        self.title = DEFAULT_TITLE.to_string();

        let blobs = match provider
            .list_blobs(container.account_name(), &container.container)
            .await
        {
            Ok(blobs) => blobs,
            Err(e) => {
                let err = ProviderError::new(Scope::Blobs, e);
                tracing::warn!(container = %container.container, "{}", err);
                self.rows = vec![ContentRow::Placeholder {
                    reason: "Error loading data.".to_string(),
                    is_error: true,
                }];
                return Err(err);
            }
        };

        self.rows = if blobs.is_empty() {
            vec![ContentRow::placeholder("No blobs in container.")]
        } else {
            blobs
                .into_iter()
                .map(|blob| ContentRow::Blob {
                    container: container.clone(),
                    blob,
                })
                .collect()
        };
        self.title = format!(
            "{}: {}/{}",
            DEFAULT_TITLE,
            container.account_name(),
            container.container
        );
        Ok(())
    }

    /// Replace the listing with a single informational row.
    pub fn show_message(&mut self, message: &str) {
        self.rows = vec![ContentRow::placeholder(message)];
        self.selected = 0;
        self.title = DEFAULT_TITLE.to_string();
    }

    /// Move the cursor to `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.rows.len() && index != self.selected {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) -> bool {
        self.select(self.selected + 1)
    }

    pub fn select_previous(&mut self) -> bool {
        match self.selected.checked_sub(1) {
            Some(i) => self.select(i),
            None => false,
        }
    }
}
