//! The UI renders the preview state into something visible and clickable.
//!
//! The sidebar is drawn the way a reader would see it: chevrons on section headers, members
//! only under the expanded section, and the current page highlighted.

use crate::preview::{Preview, Row};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const HELP: &str =
    "↑/↓: Navigate | Enter/Space: Toggle | a: Expand active | c: Collapse all | r: Rescan | q: Quit";

fn active_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Renders the sidebar list and the help bar.
pub fn draw(f: &mut Frame, app: &Preview) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .rows()
        .into_iter()
        .map(|row| match row {
            Row::Header {
                section,
                title,
                expanded,
                active,
            } => {
                let chevron = if expanded { "▼" } else { "▶" };
                let line = Line::from(vec![
                    Span::styled(format!("{chevron} "), Style::default().fg(Color::Cyan)),
                    Span::styled(title, active_style(active).add_modifier(Modifier::BOLD)),
                ]);
                let style = if section == app.cursor {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            }
            Row::Member { text, active } => {
                ListItem::new(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(text, active_style(active)),
                ]))
            }
            Row::Entry { text, active } => ListItem::new(Line::from(Span::styled(
                text,
                active_style(active).fg(if active { Color::Green } else { Color::DarkGray }),
            ))),
        })
        .collect();

    let title = format!(
        "Sections ({}) | {}",
        app.accordion.sections().len(),
        app.current_path
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    let help = app.message.as_deref().unwrap_or(HELP);
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, chunks[1]);
}
