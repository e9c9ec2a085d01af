use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::display::{ContentView, PreviewView, TreeRow, TreeView};

fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn pane_block(title: String, active: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style(active))
}

fn tree_line(row: &TreeRow) -> Line<'static> {
    let marker = match (row.expandable, row.expanded) {
        (false, _) => "  ",
        (true, false) => "▸ ",
        (true, true) => "▾ ",
    };
    Line::from(vec![
        Span::raw("  ".repeat(row.depth)),
        Span::styled(marker, Style::default().fg(Color::DarkGray)),
        Span::raw(row.label.clone()),
    ])
}

pub fn render_tree(f: &mut Frame, area: Rect, view: &TreeView, active: bool) {
    let items: Vec<ListItem> = view.rows.iter().map(|r| ListItem::new(tree_line(r))).collect();

    let mut list = List::new(items).block(pane_block("Subscriptions".to_string(), active));
    // Only show selection highlight on active pane
    if active {
        list = list.highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
    }

    let mut state = ListState::default();
    state.select(view.selected);
    f.render_stateful_widget(list, area, &mut state);
}

pub fn render_contents(f: &mut Frame, area: Rect, view: &ContentView, active: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|(name, detail)| {
            let name_width = inner_width.saturating_sub(detail.chars().count() + 1);
            let name = if name.chars().count() > name_width && name_width > 3 {
                let cut: String = name.chars().take(name_width - 3).collect();
                format!("{}...", cut)
            } else {
                name.clone()
            };

            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<width$} ", name, width = name_width)),
                Span::styled(detail.clone(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let mut list = List::new(items).block(pane_block(view.title.clone(), active));
    if active {
        list = list.highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
    }

    let mut state = ListState::default();
    state.select(view.selected);
    f.render_stateful_widget(list, area, &mut state);
}

pub fn render_preview(f: &mut Frame, area: Rect, view: &PreviewView, active: bool) {
    let preview = Paragraph::new(view.text.clone())
        .block(pane_block(view.title.clone(), active))
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));

    f.render_widget(preview, area);
}

pub fn render_details(f: &mut Frame, area: Rect, text: &str) {
    let details = Paragraph::new(text.to_string())
        .block(pane_block("Details".to_string(), false))
        .wrap(Wrap { trim: false });

    f.render_widget(details, area);
}
