//! Reusable UI components for the TUI.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::display::StatusView;
use crate::focus::Pane;

/// Render the help bar with context-sensitive key bindings.
pub fn render_help_bar(f: &mut Frame, area: Rect, status: &StatusView) {
    let help = Paragraph::new(Line::from(build_help_text(status)))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    f.render_widget(help, area);
}

fn build_help_text(status: &StatusView) -> Vec<Span<'static>> {
    let bindings: &[(&str, &str)] = if status.search.is_some() {
        &[("Enter", "Apply"), ("Esc", "Cancel"), ("^C", "Quit")]
    } else {
        match status.focus {
            Pane::Tree => &[
                ("↑↓", "Navigate"),
                ("Enter/→", "Expand"),
                ("←", "Collapse"),
                ("Space", "Toggle sub"),
                ("Tab", "Pane"),
                ("r", "Reload"),
                ("q", "Quit"),
            ],
            Pane::ContentList => &[
                ("↑↓", "Navigate"),
                ("Enter", "Select"),
                ("←", "Tree"),
                ("Tab", "Pane"),
                ("r", "Reload"),
                ("q", "Quit"),
            ],
            Pane::Preview => &[
                ("↑↓", "Scroll"),
                ("/", "Search"),
                ("Esc", "Clear"),
                ("Tab", "Pane"),
                ("q", "Quit"),
            ],
        }
    };

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Color::DarkGray);
    let text_style = Style::default().fg(Color::White);

    let mut spans = Vec::new();
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│ ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(":{} ", action), text_style));
    }
    spans
}

/// Render the status bar with the last message and the focused pane.
pub fn render_status_bar(f: &mut Frame, area: Rect, status: &StatusView) {
    let pane = match status.focus {
        Pane::Tree => "Tree",
        Pane::ContentList => "Contents",
        Pane::Preview => "Preview",
    };
    let mode = if status.eager_expand { "eager" } else { "lazy" };
    let text = format!("{} │ Focus: {} │ Load: {}", status.message, pane, mode);

    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));

    f.render_widget(bar, area);
}

/// Render a centered popup dialog.
pub fn render_popup(f: &mut Frame, title: &str, lines: Vec<Line>, style: Style) {
    let area = f.area();

    let max_line_width = lines.iter().map(|l| l.width()).max().unwrap_or(20) as u16;

    let popup_width = (max_line_width + 4).max(40).min(area.width.saturating_sub(4));
    let popup_height = (lines.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title)
                .title_style(style.add_modifier(Modifier::BOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(popup, popup_area);
}

/// The search overlay, showing what has been typed so far.
pub fn render_search_popup(f: &mut Frame, input: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}_", input),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Apply  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]),
    ];

    render_popup(f, " Search preview ", lines, Style::default().fg(Color::Cyan));
}
