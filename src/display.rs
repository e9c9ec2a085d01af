//! Views pushed to the screen and the cache that suppresses redundant pushes.

use crate::focus::Pane;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub label: String,
    pub expandable: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeView {
    pub rows: Vec<TreeRow>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentView {
    pub title: String,
    /// (primary text, right-aligned detail text)
    pub rows: Vec<(String, String)>,
    pub selected: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewView {
    pub text: String,
    pub title: String,
    /// First visible line.
    pub scroll: u16,
}

/// Chrome that is not one of the four data surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusView {
    pub focus: Pane,
    /// `Some` while the search overlay is open, holding the typed text.
    pub search: Option<String>,
    pub message: String,
    pub eager_expand: bool,
}

/// Receiver of recomputed views.
pub trait DisplaySurface {
    fn show_tree(&mut self, view: &TreeView);
    fn show_contents(&mut self, view: &ContentView);
    fn show_details(&mut self, text: &str);
    fn show_preview(&mut self, view: &PreviewView);
    fn show_status(&mut self, view: &StatusView);
}

/// Last value pushed per surface.
#[derive(Debug, Default)]
pub struct PushCache {
    tree: Option<TreeView>,
    contents: Option<ContentView>,
    details: Option<String>,
    preview: Option<PreviewView>,
    status: Option<StatusView>,
}

fn changed<T: PartialEq + Clone>(slot: &mut Option<T>, value: &T) -> bool {
    if slot.as_ref() == Some(value) {
        return false;
    }
    *slot = Some(value.clone());
    true
}

impl PushCache {
    pub fn push_tree(&mut self, surface: &mut dyn DisplaySurface, view: &TreeView) {
        if changed(&mut self.tree, view) {
            surface.show_tree(view);
        }
    }

    pub fn push_contents(&mut self, surface: &mut dyn DisplaySurface, view: &ContentView) {
        if changed(&mut self.contents, view) {
            surface.show_contents(view);
        }
    }

    pub fn push_details(&mut self, surface: &mut dyn DisplaySurface, text: &str) {
        if self.details.as_deref() != Some(text) {
            self.details = Some(text.to_string());
            surface.show_details(text);
        }
    }

    pub fn push_preview(&mut self, surface: &mut dyn DisplaySurface, view: &PreviewView) {
        if changed(&mut self.preview, view) {
            surface.show_preview(view);
        }
    }

    pub fn push_status(&mut self, surface: &mut dyn DisplaySurface, view: &StatusView) {
        if changed(&mut self.status, view) {
            surface.show_status(view);
        }
    }
}
