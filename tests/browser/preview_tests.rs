// Tests for the preview filter pipeline

use storage_tui::preview::{apply_filter, render_preview, PreviewState};

use crate::support::blob;

fn log_preview() -> String {
    render_preview(&blob("2024-05-11.log", 640, "text/plain")).text
}

#[test]
fn test_blank_term_is_identity() {
    let full = log_preview();
    assert_eq!(apply_filter(&full, ""), full);
    assert_eq!(apply_filter(&full, "   "), full);
}

#[test]
fn test_term_keeps_header_and_matching_lines() {
    let full = log_preview();
    let filtered = apply_filter(&full, "started");

    assert!(filtered.starts_with("File: 2024-05-11.log\nContent-Type: text/plain\nSize: 640 B\n\n"));
    assert!(filtered.contains("msg=\"started\"\n"));
    assert!(!filtered.contains("completed"));
}

#[test]
fn test_matching_ignores_case() {
    let full = log_preview();
    assert_eq!(apply_filter(&full, "STARTED"), apply_filter(&full, "started"));
}

#[test]
fn test_no_match_message_quotes_term_verbatim() {
    let full = log_preview();
    let filtered = apply_filter(&full, "say \"hi\"");
    assert!(filtered.ends_with("\n\nNo matches for \"say \"hi\"\".\n"));
}

#[test]
fn test_header_never_matches() {
    let full = log_preview();
    let filtered = apply_filter(&full, "Content-Type");
    assert!(filtered.ends_with("No matches for \"Content-Type\".\n"));
}

#[test]
fn test_state_filter_does_not_touch_full_text() {
    let mut state = PreviewState::default();
    state.set_content(render_preview(&blob("2024-05-11.log", 640, "text/plain")));
    let full = state.full_text().to_string();

    state.submit("completed");
    assert!(state.filter_active());
    assert_eq!(state.title(), "Preview (filter: completed)");
    assert_eq!(state.full_text(), full);
    assert_ne!(state.displayed(), full);

    state.clear();
    assert_eq!(state.displayed(), full);
    assert_eq!(state.title(), "Preview");
}

#[test]
fn test_image_preview_is_not_searchable() {
    let mut state = PreviewState::default();
    state.set_content(render_preview(&blob("hero.jpg", 900, "image/jpeg")));
    assert!(!state.is_searchable());
    state.submit("anything");
    assert!(!state.filter_active());
    assert!(state.displayed().contains("Binary content preview not available."));
}
