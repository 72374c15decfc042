//! PriceChangesDialog — centered overlay with a listing's full price history.
//!
//! Owned by `ListingCard`, which passes `open` and the events on every draw.
//! Closing goes through `Action::ClosePriceHistory`; the dialog never touches
//! the events it is shown.

use listing_proto::format::{format_currency, format_date_month_day};
use listing_proto::listing::PriceChangeEvent;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::Action,
    theme::{C_MUTED, C_PANEL_BORDER_FOCUSED, C_POPUP_BG, C_PRICE_DROP, C_PRICE_RISE, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::{centered_box, contains},
};

/// What the card hands the dialog each frame.
pub struct DialogProps<'a> {
    pub open: bool,
    pub events: &'a [PriceChangeEvent],
    pub mls_number: Option<&'a str>,
}

pub struct PriceChangesDialog {
    scroll: usize,
    /// Where the popup was last drawn; zero when hidden.
    popup: Rect,
}

impl PriceChangesDialog {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            popup: Rect::default(),
        }
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    fn scroll_by(&mut self, delta: isize, event_count: usize) {
        let max = event_count.saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    pub fn handle_key(&mut self, key: KeyEvent, event_count: usize) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') | KeyCode::Enter => {
                return vec![Action::ClosePriceHistory];
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1, event_count),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1, event_count),
            KeyCode::PageUp => self.scroll_by(-10, event_count),
            KeyCode::PageDown => self.scroll_by(10, event_count),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll_by(isize::MAX, event_count),
            _ => {}
        }
        // Modal: swallow everything else
        vec![]
    }

    pub fn handle_mouse(&mut self, event: MouseEvent, event_count: usize) -> Vec<Action> {
        let inside = contains(self.popup, event.column, event.row);
        match event.kind {
            MouseEventKind::Down(_) if !inside => vec![Action::ClosePriceHistory],
            MouseEventKind::ScrollUp if inside => {
                self.scroll_by(-1, event_count);
                vec![]
            }
            MouseEventKind::ScrollDown if inside => {
                self.scroll_by(1, event_count);
                vec![]
            }
            _ => vec![],
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, props: DialogProps<'_>) {
        if !props.open {
            self.popup = Rect::default();
            return;
        }

        let rows = history_rows(props.events);
        let count = props.events.len();
        let title = match props.mls_number {
            Some(mls) => format!(" price changes · MLS {} ", mls),
            None => " price changes ".to_string(),
        };

        // Sized to the table so every column survives on narrow terminals
        let width = (TABLE_WIDTH as u16).max(title.width() as u16) + 2;
        let height = (rows.len() as u16 + 4).max(6);
        let popup = centered_box(width, height, area);
        self.popup = popup;

        let footer = format!(
            " {} change{} · esc to close ",
            count,
            if count == 1 { "" } else { "s" }
        );

        let mut lines = vec![header_row(), Line::from("")];
        lines.extend(rows.into_iter().skip(self.scroll));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                    .title(Span::styled(
                        title,
                        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                    ))
                    .title_bottom(Line::from(Span::styled(footer, Style::default().fg(C_MUTED))))
                    .style(Style::default().bg(C_POPUP_BG)),
            ),
            popup,
        );
    }
}

impl Default for PriceChangesDialog {
    fn default() -> Self {
        Self::new()
    }
}

const COL_DATE: usize = 8;
const COL_PRICE: usize = 12;
const TABLE_WIDTH: usize = 1 + COL_DATE + 3 * COL_PRICE;

fn header_row() -> Line<'static> {
    Line::from(Span::styled(
        format!(
            " {:<COL_DATE$}{:>COL_PRICE$}{:>COL_PRICE$}{:>COL_PRICE$}",
            "date", "was", "now", "change"
        ),
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

/// One line per event, in feed order (newest first).
pub fn history_rows(events: &[PriceChangeEvent]) -> Vec<Line<'static>> {
    events
        .iter()
        .map(|e| {
            let diff_color = match e.price_diff {
                Some(d) if d < 0.0 => C_PRICE_DROP,
                Some(d) if d > 0.0 => C_PRICE_RISE,
                _ => C_SECONDARY,
            };
            let diff = match e.price_diff {
                Some(d) if d.round() > 0.0 => format!("+{}", format_currency(Some(d))),
                other => format_currency(other),
            };
            let price = |p: Option<f64>| match p {
                Some(_) => format_currency(p),
                None => "—".to_string(),
            };
            Line::from(vec![
                Span::styled(
                    format!(
                        " {:<COL_DATE$}",
                        format_date_month_day(e.event_date.as_deref())
                    ),
                    Style::default().fg(C_PRIMARY),
                ),
                Span::styled(
                    format!("{:>COL_PRICE$}", price(e.old_price)),
                    Style::default().fg(C_SECONDARY),
                ),
                Span::styled(
                    format!("{:>COL_PRICE$}", price(e.new_price)),
                    Style::default().fg(C_PRIMARY),
                ),
                Span::styled(
                    format!("{:>COL_PRICE$}", diff),
                    Style::default().fg(diff_color).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}
