pub mod components;
pub mod pane;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::display::{ContentView, DisplaySurface, PreviewView, StatusView, TreeView};
use crate::focus::Pane;

pub use components::{render_help_bar, render_popup, render_search_popup, render_status_bar};

/// Terminal surface: holds the last pushed views and draws them each frame.
#[derive(Debug, Default)]
pub struct Screen {
    tree: TreeView,
    contents: ContentView,
    details: String,
    preview: PreviewView,
    status: StatusView,
}

impl DisplaySurface for Screen {
    fn show_tree(&mut self, view: &TreeView) {
        self.tree = view.clone();
    }

    fn show_contents(&mut self, view: &ContentView) {
        self.contents = view.clone();
    }

    fn show_details(&mut self, text: &str) {
        self.details = text.to_string();
    }

    fn show_preview(&mut self, view: &PreviewView) {
        self.preview = view.clone();
    }

    fn show_status(&mut self, view: &StatusView) {
        self.status = view.clone();
    }
}

impl Screen {
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Help bar
                Constraint::Min(0),    // Main area
                Constraint::Length(7), // Details
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let focus = self.status.focus;
        pane::render_tree(f, columns[0], &self.tree, focus == Pane::Tree);
        pane::render_contents(f, right[0], &self.contents, focus == Pane::ContentList);
        pane::render_preview(f, right[1], &self.preview, focus == Pane::Preview);
        pane::render_details(f, chunks[2], &self.details);

        render_help_bar(f, chunks[0], &self.status);
        render_status_bar(f, chunks[3], &self.status);

        if let Some(input) = &self.status.search {
            render_search_popup(f, input);
        }
    }
}
