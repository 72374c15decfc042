//! ListingList component — left pane with one row per listing in the feed.
//!
//! Selection lives in `AppState::selected`; the list only keeps its scroll
//! offset and turns keys and clicks into `Select*` actions.

use listing_proto::format::format_currency;
use listing_proto::listing::ListingRecord;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_NEW_BADGE, C_PRIMARY, C_SECONDARY, C_SELECTION_BG},
    widgets::pane_chrome::{pane_chrome, Badge},
};

const PAGE: usize = 10;
const PRICE_COL: usize = 11;

pub struct ListingList {
    list_state: ListState,
    /// Rows visible at the last draw, for page keys.
    page_rows: usize,
}

impl ListingList {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            page_rows: PAGE,
        }
    }

    fn render_item(rec: &ListingRecord, is_selected: bool, width: usize) -> ListItem<'static> {
        let marker = if rec.new {
            Span::styled("● ", Style::default().fg(C_NEW_BADGE))
        } else {
            Span::raw("  ")
        };
        let price = format!("{:>PRICE_COL$}", format_currency(rec.price));
        let addr_width = width.saturating_sub(2 + PRICE_COL + 1);
        let address = rec.street_address.as_deref().unwrap_or("(no address)");
        let address = pad_to_width(&truncate_to_width(address, addr_width), addr_width);

        let name_style = if is_selected {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        let row_style = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };

        ListItem::new(Line::from(vec![
            marker,
            Span::styled(address, name_style),
            Span::raw(" "),
            Span::styled(price, Style::default().fg(C_MUTED)),
        ]))
        .style(row_style)
    }
}

impl Default for ListingList {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `s` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}

impl Component for ListingList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || state.listings.is_empty() {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectUp(step)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectDown(step)],
            KeyCode::PageUp => vec![Action::SelectUp(self.page_rows.max(1))],
            KeyCode::PageDown => vec![Action::SelectDown(self.page_rows.max(1))],
            KeyCode::Home | KeyCode::Char('g') => vec![Action::SelectFirst],
            KeyCode::End | KeyCode::Char('G') => vec![Action::SelectLast],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => vec![Action::SelectUp(1)],
            MouseEventKind::ScrollDown => vec![Action::SelectDown(1)],
            MouseEventKind::Down(MouseButton::Left) => {
                // +1 for the top border
                if event.row <= area.y || event.row >= area.y + area.height.saturating_sub(1) {
                    return vec![];
                }
                let rel_row = (event.row - area.y - 1) as usize;
                let idx = self.list_state.offset() + rel_row;
                if idx < state.listings.len() {
                    vec![Action::Select(idx), Action::FocusPane(ComponentId::ListingList)]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let new_count = state.listings.iter().filter(|l| l.new).count();
        let badge_text = format!("{} new", new_count);
        let badge = (new_count > 0).then(|| Badge {
            text: &badge_text,
            color: C_NEW_BADGE,
        });
        let block = pane_chrome("listings", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.page_rows = inner.height as usize;

        if state.listings.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no listings in feed", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let width = inner.width as usize;
        let items: Vec<ListItem> = state
            .listings
            .iter()
            .enumerate()
            .map(|(i, rec)| Self::render_item(rec, i == state.selected, width))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state.select(Some(state.selected));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}
