//! Status bar — bottom line with feed name, position, layout mode and key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MODE_NORMAL, C_MUTED, C_PRIMARY, C_SECONDARY};

pub struct StatusInfo<'a> {
    pub feed_name: Option<&'a str>,
    pub position: usize,
    pub total: usize,
    pub layout: &'static str,
    pub dialog_open: bool,
}

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, info: &StatusInfo<'_>) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", info.layout),
            Style::default().fg(C_MODE_NORMAL).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.feed_name.unwrap_or("listings").to_string(),
            Style::default().fg(C_PRIMARY),
        ),
        Span::styled(
            format!(" {}/{} ", info.position, info.total),
            Style::default().fg(C_SECONDARY),
        ),
    ];

    spans.push(Span::styled(key_hints(info), Style::default().fg(C_MUTED)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Only keys that do something in the current mode. The single-pane
/// layout has nothing to Tab to.
fn key_hints(info: &StatusInfo<'_>) -> String {
    if info.dialog_open {
        return " ↑↓ scroll  Esc/q close".to_string();
    }
    let mut keys = String::from(" ↑↓/jk select  v view all  i info  y copy url  Y copy mls");
    if info.layout != "COLUMN" {
        keys.push_str("  Tab pane");
    }
    keys.push_str("  ? help  q quit");
    keys
}
