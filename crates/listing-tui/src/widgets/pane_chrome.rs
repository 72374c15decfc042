//! PaneChrome — bordered pane with focus styling and an optional count badge.

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// A badge shown in the top-right of the pane header (e.g. "3 new").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// Renders a bordered pane titled `"[key] title"` with focus colors.
pub fn pane_chrome<'a>(
    title: &'a str,
    number_key: Option<char>,
    focused: bool,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let mut title_spans = Vec::new();
    if let Some(key) = number_key {
        title_spans.push(Span::styled(
            format!("[{}] ", key),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    title_spans.push(Span::styled(title, title_style));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title_spans));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}

/// True if the cell (`col`, `row`) lies inside `r`.
pub fn contains(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0
        && r.height > 0
        && col >= r.x
        && col < r.x + r.width
        && row >= r.y
        && row < r.y + r.height
}

/// A popup rect `percent_x` wide and `height` rows tall, centered in `r`.
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(r.height)),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

/// A popup exactly `width` x `height` cells, shrunk to fit and centered in `r`.
pub fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let r = Rect::new(2, 3, 4, 1);
        assert!(contains(r, 2, 3));
        assert!(contains(r, 5, 3));
        assert!(!contains(r, 6, 3));
        assert!(!contains(r, 2, 4));
        assert!(!contains(Rect::default(), 0, 0));
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 20);
        let popup = centered_rect(60, 50, area);
        assert!(popup.height <= area.height);
        assert!(popup.x >= 19 && popup.right() <= 81);
    }

    #[test]
    fn test_centered_box_shrinks_to_area() {
        let popup = centered_box(47, 8, Rect::new(0, 0, 60, 20));
        assert_eq!(popup, Rect::new(6, 6, 47, 8));
        let popup = centered_box(47, 8, Rect::new(2, 1, 30, 4));
        assert_eq!(popup, Rect::new(2, 1, 30, 4));
    }
}
