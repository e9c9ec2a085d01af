use std::sync::Arc;

use crate::catalog::{CatalogProvider, ProviderError};
use crate::content::{ContentList, ContentRow};
use crate::details::{describe_node, NO_SELECTION};
use crate::display::{
    ContentView, DisplaySurface, PreviewView, PushCache, StatusView, TreeRow, TreeView,
};
use crate::focus::{FocusController, Pane};
use crate::preview::{render_preview, PreviewState, LOAD_FAILED, SELECT_BLOB};
use crate::tree::{NodeKind, SubscriptionFilter, Tree};

/// Input already decoded from key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reload,
    NextPane,
    PrevPane,
    MoveUp,
    MoveDown,
    ExpandOrActivate,
    CollapseOrParent,
    ToggleSubscription,
    OpenSearch,
    SubmitSearch(String),
    CancelSearch,
    ClearSearch,
}

/// The whole browser session.
///
/// Every operation runs to completion on the caller's task; provider calls
/// are awaited in line, so no two operations ever interleave.
pub struct App {
    pub provider: Arc<dyn CatalogProvider>,
    pub tree: Tree,
    pub filter: SubscriptionFilter,
    pub contents: ContentList,
    pub preview: PreviewState,
    pub focus: FocusController,
    pub details: String,
    pub message: String,
    pub preview_scroll: u16,
    pub should_quit: bool,
    cache: PushCache,
}

impl App {
    pub fn new(provider: Arc<dyn CatalogProvider>, eager_expand: bool) -> Self {
        let message = format!("Welcome to storage-tui ({})", provider.name());
        Self {
            provider,
            tree: Tree::new(eager_expand),
            filter: SubscriptionFilter::new(),
            contents: ContentList::default(),
            preview: PreviewState::default(),
            focus: FocusController::default(),
            details: NO_SELECTION.to_string(),
            message,
            preview_scroll: 0,
            should_quit: false,
            cache: PushCache::default(),
        }
    }

    pub fn focused_pane(&self) -> Pane {
        self.focus.pane()
    }

    // ========== Command dispatch ==========

    pub async fn handle(&mut self, command: Command) {
        tracing::debug!(?command, pane = ?self.focus.pane(), "command");

        if self.focus.search_open() {
            match command {
                Command::Quit => self.should_quit = true,
                Command::SubmitSearch(term) => self.submit_search(&term),
                Command::CancelSearch => self.cancel_search(),
                _ => {}
            }
            return;
        }

        match command {
            Command::Quit => self.should_quit = true,
            Command::Reload => self.reload().await,
            Command::NextPane => {
                let pane = self.focus.next();
                self.entered(pane);
            }
            Command::PrevPane => {
                let pane = self.focus.previous();
                self.entered(pane);
            }
            Command::MoveUp => self.move_selection(false).await,
            Command::MoveDown => self.move_selection(true).await,
            Command::ExpandOrActivate => self.expand_or_activate().await,
            Command::CollapseOrParent => self.collapse_or_parent().await,
            Command::ToggleSubscription => self.toggle_subscription().await,
            Command::OpenSearch => self.open_search(),
            Command::ClearSearch => self.clear_search(),
            // Only meaningful while the overlay is open.
            Command::SubmitSearch(_) | Command::CancelSearch => {}
        }
    }

    // ========== Loading ==========

    /// Re-fetch everything from the subscription level down.
    pub async fn reload(&mut self) {
        let provider = Arc::clone(&self.provider);
        match self.tree.load_root(provider.as_ref(), &mut self.filter).await {
            Ok(report) => {
                self.message = format!(
                    "Loaded {} subscription(s) from {}",
                    report.subscriptions,
                    provider.name()
                );
                self.contents.show_message("Select a container to view blobs.");
                self.set_preview_message(SELECT_BLOB);
                self.tree_selection_changed().await;
                if let Some(err) = report.eager_failure {
                    self.show_load_error(&err);
                }
            }
            Err(err) => self.show_load_error(&err),
        }
    }

    /// Derive the content list, preview and details from the tree cursor.
    pub async fn tree_selection_changed(&mut self) {
        let Some(kind) = self.tree.selected_node().map(|n| n.kind.clone()) else {
            return;
        };

        match &kind {
            NodeKind::Container { location, .. } => {
                let provider = Arc::clone(&self.provider);
                if let Err(err) = self.contents.load_for(location, provider.as_ref()).await {
                    self.show_load_error(&err);
                    return;
                }
                self.set_preview_message(SELECT_BLOB);
                self.content_selection_changed(self.contents.selected());
            }
            NodeKind::Blob { blob, .. } => {
                self.preview.set_content(render_preview(blob));
                self.preview_scroll = 0;
            }
            NodeKind::Account { .. } => self.show_empty_contents("Select a container to view blobs."),
            NodeKind::Subscription(s) => {
                if self.filter.is_enabled(&s.id) {
                    self.show_empty_contents("Select an account to view containers.");
                } else {
                    self.show_empty_contents("Subscription disabled.");
                }
            }
            NodeKind::Root => self.show_empty_contents("Select a subscription to view accounts."),
            NodeKind::Placeholder { reason, .. } => self.show_empty_contents(reason),
        }

        if self.focus.pane() == Pane::Tree {
            self.details = describe_node(&kind, &self.filter);
        }
    }

    /// Preview the row at `index` and, when the content side has focus,
    /// describe it in the details panel. Out-of-range indices are ignored.
    pub fn content_selection_changed(&mut self, index: usize) {
        let Some(row) = self.contents.row(index) else {
            return;
        };
        let preview = row.preview();
        let details = row.details_text();

        self.preview.set_content(preview);
        self.preview_scroll = 0;
        if matches!(self.focus.pane(), Pane::ContentList | Pane::Preview) {
            self.details = details;
        }
    }

    /// Activating a blob row pulls focus to the content list.
    pub fn activate(&mut self, index: usize) {
        if self.contents.row(index).is_some_and(ContentRow::is_blob) {
            self.set_focus(Pane::ContentList);
        }
    }

    // ========== Focus ==========

    pub fn set_focus(&mut self, pane: Pane) {
        let pane = self.focus.focus(pane);
        self.entered(pane);
    }

    fn entered(&mut self, pane: Pane) {
        if pane.tracks_details() {
            self.refresh_details();
        }
    }

    pub fn refresh_details(&mut self) {
        self.details = match self.focus.pane() {
            Pane::Tree => self
                .tree
                .selected_node()
                .map(|n| describe_node(&n.kind, &self.filter))
                .unwrap_or_else(|| NO_SELECTION.to_string()),
            _ => self
                .contents
                .selected_row()
                .map(ContentRow::details_text)
                .unwrap_or_else(|| NO_SELECTION.to_string()),
        };
    }

    // ========== Navigation ==========

    async fn move_selection(&mut self, down: bool) {
        match self.focus.pane() {
            Pane::Tree => {
                let moved = if down {
                    self.tree.select_next()
                } else {
                    self.tree.select_previous()
                };
                if moved {
                    self.tree_selection_changed().await;
                }
            }
            Pane::ContentList => {
                let moved = if down {
                    self.contents.select_next()
                } else {
                    self.contents.select_previous()
                };
                if moved {
                    self.content_selection_changed(self.contents.selected());
                }
            }
            Pane::Preview => {
                let lines = u16::try_from(self.preview.displayed().lines().count())
                    .unwrap_or(u16::MAX);
                self.preview_scroll = if down {
                    self.preview_scroll.saturating_add(1).min(lines.saturating_sub(1))
                } else {
                    self.preview_scroll.saturating_sub(1)
                };
            }
        }
    }

    async fn expand_or_activate(&mut self) {
        match self.focus.pane() {
            Pane::Tree => {
                let Some(id) = self.tree.selected() else {
                    return;
                };
                let Some(node) = self.tree.get(id) else {
                    return;
                };
                if !node.kind.can_have_children() {
                    return;
                }
                if node.expanded && node.is_loaded() {
                    self.tree.collapse(id);
                    return;
                }
                let provider = Arc::clone(&self.provider);
                if let Err(err) = self.tree.expand(id, provider.as_ref(), &self.filter).await {
                    self.show_load_error(&err);
                }
            }
            Pane::ContentList => self.activate(self.contents.selected()),
            Pane::Preview => {}
        }
    }

    async fn collapse_or_parent(&mut self) {
        match self.focus.pane() {
            Pane::Tree => {
                let Some(id) = self.tree.selected() else {
                    return;
                };
                let Some(node) = self.tree.get(id) else {
                    return;
                };
                if node.expanded && node.children().is_some_and(|c| !c.is_empty()) {
                    self.tree.collapse(id);
                    return;
                }
                match self.tree.parent(id) {
                    Some(parent) if parent != Tree::ROOT => {
                        if self.tree.select(parent) {
                            self.tree_selection_changed().await;
                        }
                    }
                    _ => {}
                }
            }
            Pane::ContentList => self.set_focus(Pane::Tree),
            Pane::Preview => {}
        }
    }

    async fn toggle_subscription(&mut self) {
        if self.focus.pane() != Pane::Tree {
            return;
        }
        let Some(id) = self.tree.selected() else {
            return;
        };

        let provider = Arc::clone(&self.provider);
        match self
            .tree
            .toggle_subscription(id, provider.as_ref(), &mut self.filter)
            .await
        {
            Ok(None) => {}
            Ok(Some(enabled)) => {
                self.refresh_details();
                if enabled {
                    self.show_empty_contents("Select an account to view containers.");
                } else {
                    self.show_empty_contents("Subscription disabled.");
                }
            }
            Err(err) => self.show_load_error(&err),
        }
    }

    // ========== Search ==========

    fn open_search(&mut self) {
        if self.focus.pane() == Pane::Preview && self.preview.is_searchable() {
            self.focus.open_search(self.preview.term());
        }
    }

    pub fn search_push(&mut self, c: char) {
        if let Some(input) = self.focus.search_input_mut() {
            input.push(c);
        }
    }

    pub fn search_pop(&mut self) {
        if let Some(input) = self.focus.search_input_mut() {
            input.pop();
        }
    }

    fn submit_search(&mut self, term: &str) {
        self.focus.close_search();
        self.preview.submit(term);
        self.preview_scroll = 0;
    }

    fn cancel_search(&mut self) {
        self.focus.close_search();
        self.preview.clear();
        self.preview_scroll = 0;
    }

    fn clear_search(&mut self) {
        if self.focus.pane() == Pane::Preview && self.preview.filter_active() {
            self.preview.clear();
            self.preview_scroll = 0;
        }
    }

    // ========== Error and empty states ==========

    fn show_empty_contents(&mut self, message: &str) {
        self.contents.show_message(message);
        self.set_preview_message(SELECT_BLOB);
    }

    fn set_preview_message(&mut self, text: &str) {
        self.preview.set_message(text);
        self.preview_scroll = 0;
    }

    /// Report a failed fetch. Whatever placeholder marks the failure in the
    /// tree or content list is already in place.
    fn show_load_error(&mut self, err: &ProviderError) {
        self.details = err.to_string();
        self.message = err.to_string();
        self.set_preview_message(LOAD_FAILED);
    }

    // ========== Views ==========

    pub fn tree_view(&self) -> TreeView {
        let visible = self.tree.visible();
        let selected = self
            .tree
            .selected()
            .and_then(|id| visible.iter().position(|v| v.id == id));
        let rows = visible
            .iter()
            .filter_map(|v| {
                let node = self.tree.get(v.id)?;
                Some(TreeRow {
                    depth: v.depth,
                    label: node.label.clone(),
                    expandable: node.kind.can_have_children(),
                    expanded: node.expanded,
                })
            })
            .collect();
        TreeView { rows, selected }
    }

    pub fn content_view(&self) -> ContentView {
        ContentView {
            title: self.contents.title().to_string(),
            rows: self
                .contents
                .rows()
                .iter()
                .map(|r| (r.primary(), r.detail()))
                .collect(),
            selected: (!self.contents.is_empty()).then(|| self.contents.selected()),
        }
    }

    pub fn preview_view(&self) -> PreviewView {
        PreviewView {
            text: self.preview.displayed(),
            title: self.preview.title(),
            scroll: self.preview_scroll,
        }
    }

    pub fn status_view(&self) -> StatusView {
        StatusView {
            focus: self.focus.pane(),
            search: self.focus.search_input().map(str::to_string),
            message: self.message.clone(),
            eager_expand: self.tree.eager_expand(),
        }
    }

    /// Push every view that changed since the last sync.
    pub fn sync_view(&mut self, surface: &mut dyn DisplaySurface) {
        let tree = self.tree_view();
        let contents = self.content_view();
        let preview = self.preview_view();
        let status = self.status_view();

        self.cache.push_tree(surface, &tree);
        self.cache.push_contents(surface, &contents);
        self.cache.push_details(surface, &self.details);
        self.cache.push_preview(surface, &preview);
        self.cache.push_status(surface, &status);
    }
}
