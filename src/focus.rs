/// The three panes that can hold input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Tree,
    ContentList,
    Preview,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Tree => Pane::ContentList,
            Pane::ContentList => Pane::Preview,
            Pane::Preview => Pane::Tree,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Pane::Tree => Pane::Preview,
            Pane::ContentList => Pane::Tree,
            Pane::Preview => Pane::ContentList,
        }
    }

    /// Whether gaining focus should refresh the details panel.
    pub fn tracks_details(self) -> bool {
        matches!(self, Pane::Tree | Pane::ContentList)
    }
}

/// Focus state plus the modal search overlay.
///
/// While the overlay is open it owns all input; closing it always lands on
/// [`Pane::Preview`].
#[derive(Debug, Clone, Default)]
pub struct FocusController {
    pane: Pane,
    search: Option<String>,
}

impl FocusController {
    pub fn pane(&self) -> Pane {
        self.pane
    }

    /// Move focus; returns the pane that was entered.
    pub fn focus(&mut self, pane: Pane) -> Pane {
        self.pane = pane;
        pane
    }

    pub fn next(&mut self) -> Pane {
        self.focus(self.pane.next())
    }

    pub fn previous(&mut self) -> Pane {
        self.focus(self.pane.previous())
    }

    pub fn search_open(&self) -> bool {
        self.search.is_some()
    }

    /// Text currently typed into the overlay.
    pub fn search_input(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn open_search(&mut self, initial: &str) {
        self.search = Some(initial.to_string());
    }

    pub fn search_input_mut(&mut self) -> Option<&mut String> {
        self.search.as_mut()
    }

    /// Close the overlay, returning what was typed.
    pub fn close_search(&mut self) -> Option<String> {
        let typed = self.search.take();
        self.pane = Pane::Preview;
        typed
    }
}
