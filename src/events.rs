use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::{App, Command};

/// What a key press means in the current input mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Typing into the search overlay.
    SearchChar(char),
    SearchBackspace,
}

/// Decode a key press. `search_open` switches to overlay editing, where only
/// Ctrl+C escapes to the global quit.
pub fn map_key(key: KeyEvent, search_open: bool) -> Option<Input> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Input::Command(Command::Quit));
    }

    if search_open {
        return match key.code {
            KeyCode::Enter => None, // resolved by the caller, which owns the typed text
            KeyCode::Esc => Some(Input::Command(Command::CancelSearch)),
            KeyCode::Backspace => Some(Input::SearchBackspace),
            KeyCode::Char(c) => Some(Input::SearchChar(c)),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('r') => Command::Reload,
        KeyCode::Tab => Command::NextPane,
        KeyCode::BackTab => Command::PrevPane,
        KeyCode::Up | KeyCode::Char('k') => Command::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Command::MoveDown,
        KeyCode::Enter | KeyCode::Right => Command::ExpandOrActivate,
        KeyCode::Left => Command::CollapseOrParent,
        KeyCode::Char(' ') => Command::ToggleSubscription,
        KeyCode::Char('/') => Command::OpenSearch,
        KeyCode::Esc => Command::ClearSearch,
        _ => return None,
    };
    Some(Input::Command(command))
}

/// Apply one key press to the session.
pub async fn handle_key(app: &mut App, key: KeyEvent) {
    let search_open = app.focus.search_open();

    if search_open && key.code == KeyCode::Enter {
        let term = app.focus.search_input().unwrap_or_default().to_string();
        app.handle(Command::SubmitSearch(term)).await;
        return;
    }

    match map_key(key, search_open) {
        Some(Input::Command(command)) => app.handle(command).await,
        Some(Input::SearchChar(c)) => app.search_push(c),
        Some(Input::SearchBackspace) => app.search_pop(),
        None => {}
    }
}

/// Wait up to `tick` for a key press and apply it.
pub async fn handle_events(app: &mut App, tick: Duration) -> Result<()> {
    if event::poll(tick)? {
        if let Event::Key(key) = event::read()? {
            // Windows reports releases too.
            if key.kind == KeyEventKind::Press {
                handle_key(app, key).await;
            }
        }
    }
    Ok(())
}
