//! ListingCard component — one listing drawn as a card.
//!
//! The card body is built as a pure line model (`card_body`) so the text and
//! the clickable spans can be checked without a terminal. The only state the
//! card owns is the price-history dialog (`DialogState`) and whether the
//! seller-motivation tooltip is showing.

use listing_proto::format::{
    format_comma_integer, format_currency, format_date_month_day, format_number, plural_suffix,
};
use listing_proto::listing::ListingRecord;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::debug;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::price_changes_dialog::{DialogProps, PriceChangesDialog},
    theme::{CardStyle, C_MUTED, C_PRIMARY},
    viewport::Viewport,
    widgets::pane_chrome::contains,
};

pub const MOTIVATION_TOOLTIP: &str = "Seller motivation detection is based on various factors \
including price, days on market, and AI powered sentiment analysis.";

const INFO_ICON: &str = "ⓘ";
const VIEW_ALL: &str = "View all →";
const TOOLTIP_MAX_WIDTH: u16 = 46;

/// Visibility of the price-history dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

impl DialogState {
    /// "View all" only exists when there is at least one price change.
    pub fn open(self, event_count: usize) -> Self {
        if event_count > 0 {
            DialogState::Open
        } else {
            self
        }
    }

    pub fn close(self) -> Self {
        DialogState::Closed
    }

    pub fn is_open(self) -> bool {
        self == DialogState::Open
    }
}

/// Position of a span inside the body, relative to the body's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanAnchor {
    pub row: u16,
    pub col: u16,
    pub width: u16,
}

impl SpanAnchor {
    fn resolve(&self, area: Rect) -> Option<Rect> {
        if self.row >= area.height || self.col >= area.width {
            return None;
        }
        Some(Rect {
            x: area.x + self.col,
            y: area.y + self.row,
            width: self.width.min(area.width - self.col),
            height: 1,
        })
    }
}

/// Text lines of the card body plus where the interactive spans sit.
pub struct CardBody {
    pub lines: Vec<Line<'static>>,
    pub view_all: Option<SpanAnchor>,
    pub info: SpanAnchor,
}

pub fn card_body(rec: &ListingRecord, style: &CardStyle) -> CardBody {
    let sep = || {
        let g = style.stat_icon.separator();
        Span::styled(format!("{g}•{g}"), style.stat_icon.style())
    };
    let mut lines: Vec<Line<'static>> = Vec::new();

    // Price • price per square foot
    lines.push(Line::from(vec![
        Span::styled(
            format!("${}", format_comma_integer(rec.price)),
            style.price.style(),
        ),
        sep(),
        Span::styled(
            format!("${}/sqft", format_number(rec.price_per_sq_ft)),
            style.price_per_sq_ft.style(),
        ),
    ]));

    lines.push(Line::from(Span::styled(
        rec.display_address(),
        style.address.style(),
    )));

    // Beds • baths • square feet • kitchens
    let kitchens = format!(
        "{} Kitchen{}",
        format_number(rec.num_kitchens),
        plural_suffix(rec.num_kitchens)
    );
    lines.push(Line::from(vec![
        Span::styled(format_number(rec.beds), style.stat_value.style()),
        Span::styled(" bd", style.stat_icon.style()),
        sep(),
        Span::styled(format_number(rec.baths), style.stat_value.style()),
        Span::styled(" ba", style.stat_icon.style()),
        sep(),
        Span::styled(format_comma_integer(rec.sq_ft), style.stat_value.style()),
        Span::styled(" ft²", style.stat_icon.style()),
        sep(),
        Span::styled(kitchens.trim_start().to_string(), style.stat_value.style()),
    ]));

    // Year built • days on market ("days" is never singular here)
    lines.push(Line::from(vec![
        Span::styled(format_number(rec.year_built), style.stat_value.style()),
        Span::styled(" built", style.stat_icon.style()),
        sep(),
        Span::styled(
            format!("{} days", format_number(rec.current_days_on_market)),
            style.stat_value.style(),
        ),
    ]));

    lines.push(Line::from(vec![
        Span::styled("#", style.stat_icon.style()),
        Span::raw(style.mls.separator()),
        Span::styled(
            rec.mls_number.clone().unwrap_or_default(),
            style.mls.style(),
        ),
    ]));

    lines.push(Line::from(""));

    // Seller motivation: label, colored badge, info icon
    let score = rec.seller_motivation_score.as_deref();
    let mut motivation = vec![
        Span::styled("Seller Motivation:", style.label.style()),
        Span::raw(style.label.separator()),
        Span::styled(format!(" {} ", score.unwrap_or("")), style.score_badge(score)),
        Span::raw(style.label.separator()),
    ];
    let info = SpanAnchor {
        row: lines.len() as u16,
        col: line_width(&motivation),
        width: 1,
    };
    motivation.push(Span::styled(INFO_ICON, style.link.style()));
    lines.push(Line::from(motivation));

    lines.push(Line::from(""));

    // Price change summary
    let count = rec.price_change_count();
    let mut summary = vec![Span::styled(
        format!(
            "{} price change{}",
            count,
            plural_suffix(Some(count as f64))
        ),
        style.label.style(),
    )];
    let mut view_all = None;
    if count > 0 {
        summary.push(Span::raw("  "));
        view_all = Some(SpanAnchor {
            row: lines.len() as u16,
            col: line_width(&summary),
            width: VIEW_ALL.chars().count() as u16,
        });
        summary.push(Span::styled(VIEW_ALL, style.link.style()));
    }
    lines.push(Line::from(summary));

    if let Some(latest) = rec.latest_event() {
        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "Latest • {} • ",
                    format_date_month_day(latest.event_date.as_deref())
                ),
                style.label.style(),
            ),
            Span::styled(
                format!(" {} ", format_currency(latest.price_diff)),
                style.latest_chip.style(),
            ),
        ]));
    }

    CardBody {
        lines,
        view_all,
        info,
    }
}

fn line_width(spans: &[Span<'_>]) -> u16 {
    spans.iter().map(|s| s.width() as u16).sum()
}

/// Split the card interior into (image box, details) per the viewport.
pub fn split_card(inner: Rect, viewport: &Viewport) -> (Rect, Rect) {
    let (img_w, img_h) = viewport.image_box();
    if viewport.is_mobile {
        let chunks = Layout::default()
            .direction(viewport.card_direction())
            .constraints([
                Constraint::Length(img_h),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);
        let image = Rect {
            width: img_w.min(chunks[0].width),
            ..chunks[0]
        };
        (image, chunks[2])
    } else {
        let chunks = Layout::default()
            .direction(viewport.card_direction())
            .constraints([
                Constraint::Length(img_w),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);
        let image = Rect {
            height: img_h.min(chunks[0].height),
            ..chunks[0]
        };
        (image, chunks[2])
    }
}

/// Last path segment of an image URL, without query string.
fn image_label(reference: &str) -> &str {
    let no_query = reference.split(['?', '#']).next().unwrap_or(reference);
    no_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(no_query)
}

fn draw_image_box(frame: &mut Frame, area: Rect, rec: &ListingRecord, style: &CardStyle) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(style.image.border_type())
        .border_style(style.image.style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    let pad = inner.height.saturating_sub(2) / 2;
    for _ in 0..pad {
        lines.push(Line::from(""));
    }
    match rec.first_image() {
        Some(reference) => {
            lines.push(Line::from(Span::styled("▣", Style::default().fg(C_PRIMARY))));
            lines.push(Line::from(Span::styled(
                image_label(reference).to_string(),
                style.image.style(),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled("▢", Style::default().fg(C_MUTED))));
            lines.push(Line::from(Span::styled(
                "no image",
                Style::default().fg(C_MUTED),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Greedy word wrap used to size the tooltip.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn draw_tooltip(frame: &mut Frame, anchor: Rect, style: &CardStyle) {
    let screen = frame.area();
    let width = TOOLTIP_MAX_WIDTH.min(screen.width);
    if width < 4 {
        return;
    }
    let text = wrap_words(MOTIVATION_TOOLTIP, (width - 2) as usize);
    let height = (text.len() as u16 + 2).min(screen.height);
    let x = anchor.x.min(screen.x + screen.width - width);
    let below = anchor.y + 1;
    let y = if below + height <= screen.y + screen.height {
        below
    } else {
        anchor.y.saturating_sub(height).max(screen.y)
    };
    let popup = Rect {
        x,
        y,
        width,
        height,
    };
    let lines: Vec<Line> = text
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style.tooltip.style())))
        .collect();
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(style.tooltip.border_type())
                .border_style(Style::default().fg(C_MUTED))
                .style(style.tooltip.style()),
        ),
        popup,
    );
}

#[derive(Debug, Clone, Copy, Default)]
struct CardHits {
    view_all: Option<Rect>,
    info: Option<Rect>,
}

pub struct ListingCard {
    dialog_state: DialogState,
    tooltip_visible: bool,
    dialog: PriceChangesDialog,
    hits: CardHits,
}

impl ListingCard {
    pub fn new() -> Self {
        Self {
            dialog_state: DialogState::Closed,
            tooltip_visible: false,
            dialog: PriceChangesDialog::new(),
            hits: CardHits::default(),
        }
    }

    pub fn dialog_state(&self) -> DialogState {
        self.dialog_state
    }

    fn click_actions(&self, col: u16, row: u16, rec: &ListingRecord) -> Vec<Action> {
        if let Some(r) = self.hits.view_all {
            if contains(r, col, row) && rec.has_price_changes() {
                return vec![Action::OpenPriceHistory];
            }
        }
        if let Some(r) = self.hits.info {
            if contains(r, col, row) {
                return vec![Action::ToggleMotivationInfo];
            }
        }
        vec![]
    }
}

impl Default for ListingCard {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ListingCard {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let Some(rec) = state.selected_listing() else {
            return vec![];
        };
        if self.dialog_state.is_open() {
            return self.dialog.handle_key(key, rec.price_change_count());
        }
        match key.code {
            KeyCode::Char('v') | KeyCode::Enter if rec.has_price_changes() => {
                vec![Action::OpenPriceHistory]
            }
            KeyCode::Char('i') => vec![Action::ToggleMotivationInfo],
            KeyCode::Char('y') => rec
                .url
                .clone()
                .map(Action::CopyToClipboard)
                .into_iter()
                .collect(),
            KeyCode::Char('Y') => rec
                .mls_number
                .clone()
                .map(Action::CopyToClipboard)
                .into_iter()
                .collect(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('p') => vec![Action::SelectUp(1)],
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('n') => {
                vec![Action::SelectDown(1)]
            }
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        let Some(rec) = state.selected_listing() else {
            return vec![];
        };
        if self.dialog_state.is_open() {
            return self.dialog.handle_mouse(event, rec.price_change_count());
        }
        match event.kind {
            MouseEventKind::Moved => {
                let over = self
                    .hits
                    .info
                    .map_or(false, |r| contains(r, event.column, event.row));
                if over != self.tooltip_visible {
                    vec![Action::ShowMotivationInfo(over)]
                } else {
                    vec![]
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.click_actions(event.column, event.row, rec)
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenPriceHistory => {
                let count = state
                    .selected_listing()
                    .map_or(0, ListingRecord::price_change_count);
                let next = self.dialog_state.open(count);
                if next.is_open() && !self.dialog_state.is_open() {
                    debug!("price history opened ({} events)", count);
                    self.dialog.reset();
                    self.tooltip_visible = false;
                }
                self.dialog_state = next;
            }
            Action::ClosePriceHistory => {
                if self.dialog_state.is_open() {
                    debug!("price history closed");
                }
                self.dialog_state = self.dialog_state.close();
            }
            Action::ShowMotivationInfo(visible) => {
                self.tooltip_visible = *visible;
            }
            Action::ToggleMotivationInfo => {
                self.tooltip_visible = !self.tooltip_visible;
            }
            a if a.changes_selection() => {
                self.dialog_state = self.dialog_state.close();
                self.tooltip_visible = false;
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let Some(rec) = state.selected_listing() else {
            self.hits = CardHits::default();
            frame.render_widget(
                Paragraph::new(Span::styled("  no listing selected", Style::default().fg(C_MUTED)))
                    .block(Block::default().borders(Borders::ALL)),
                area,
            );
            return;
        };
        let style = CardStyle::for_listing(rec.new);

        let title_style = if focused {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_MUTED)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(style.frame.border_type())
            .border_style(style.frame.style())
            .title_top(Line::from(Span::styled(" [2] listing ", title_style)).right_aligned());
        if rec.new {
            block = block.title_top(Line::from(Span::styled(" New ", style.new_badge.style())));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (image_area, body_area) = split_card(inner, &state.viewport);
        draw_image_box(frame, image_area, rec, &style);

        let body = card_body(rec, &style);
        frame.render_widget(Paragraph::new(body.lines), body_area);
        self.hits = CardHits {
            view_all: body.view_all.and_then(|a| a.resolve(body_area)),
            info: body.info.resolve(body_area),
        };

        if self.tooltip_visible {
            if let Some(anchor) = self.hits.info {
                draw_tooltip(frame, anchor, &style);
            }
        }

        let screen = frame.area();
        self.dialog.draw(
            frame,
            screen,
            DialogProps {
                open: self.dialog_state.is_open(),
                events: &rec.events,
                mls_number: rec.mls_number.as_deref(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{C_SCORE_FALLBACK, C_SCORE_HIGH};
    use listing_proto::config::DisplayConfig;
    use listing_proto::feed::ListingFeed;
    use listing_proto::listing::PriceChangeEvent;
    use ratatui::crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn event(date: &str, diff: f64) -> PriceChangeEvent {
        PriceChangeEvent {
            event_date: Some(date.to_string()),
            price_diff: Some(diff),
            ..Default::default()
        }
    }

    fn sample() -> ListingRecord {
        ListingRecord {
            price: Some(450_000.0),
            price_per_sq_ft: Some(210.0),
            beds: Some(3.0),
            baths: Some(2.0),
            sq_ft: Some(2140.0),
            num_kitchens: Some(1.0),
            year_built: Some(1998.0),
            current_days_on_market: Some(12.0),
            street_address: Some("1420 E Harvard Ave".into()),
            city: Some("Salt Lake City".into()),
            mls_number: Some("UT12345".into()),
            url: Some("https://utahrealestate.com/UT12345".into()),
            images: vec!["https://img.example.com/UT12345/front.jpg?w=640".into()],
            seller_motivation_score: Some("High".into()),
            events: vec![event("2024-05-02", -5000.0)],
            new: true,
            ..Default::default()
        }
    }

    fn state_for(rec: ListingRecord, width: u16) -> AppState {
        let feed = ListingFeed {
            nickname: None,
            listings: vec![rec],
        };
        AppState::new(feed, DisplayConfig::default(), width)
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn body_text(rec: &ListingRecord) -> Vec<String> {
        let style = CardStyle::for_listing(rec.new);
        card_body(rec, &style).lines.iter().map(line_text).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dispatch(card: &mut ListingCard, actions: Vec<Action>, state: &AppState) {
        for a in actions {
            card.on_action(&a, state);
        }
    }

    fn render(card: &mut ListingCard, state: &AppState, w: u16, h: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|f| card.draw(f, f.area(), true, state))
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..h)
            .map(|y| (0..w).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_end_to_end_sample() {
        let text = body_text(&sample()).join("\n");
        assert!(text.contains("$450,000"));
        assert!(text.contains("$210/sqft"));
        assert!(text.contains("1 Kitchen"));
        assert!(!text.contains("1 Kitchens"));
        assert!(text.contains("2,140"));
        assert!(text.contains("12 days"));
        assert!(text.contains("#UT12345"));
        assert!(text.contains("1 price change"));
        assert!(!text.contains("1 price changes"));
        assert!(text.contains("View all"));
        assert!(text.contains("Latest • May 2 •"));
        assert!(text.contains("-$5,000"));
        assert!(text.contains("1420 E Harvard Ave, Salt Lake City"));
    }

    #[test]
    fn test_score_badge_color() {
        let rec = sample();
        let style = CardStyle::for_listing(rec.new);
        let body = card_body(&rec, &style);
        let badge = body
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content.trim() == "High")
            .expect("score badge");
        assert_eq!(badge.style.bg, Some(C_SCORE_HIGH));

        let other = ListingRecord {
            seller_motivation_score: Some("Undetected".into()),
            ..sample()
        };
        let body = card_body(&other, &style);
        let badge = body
            .lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .find(|s| s.content.trim() == "Undetected")
            .expect("score badge");
        assert_eq!(badge.style.bg, Some(C_SCORE_FALLBACK));
    }

    #[test]
    fn test_kitchen_pluralization() {
        for (n, expected) in [(1.0, "1 Kitchen"), (0.0, "0 Kitchens"), (3.0, "3 Kitchens")] {
            let rec = ListingRecord {
                num_kitchens: Some(n),
                ..Default::default()
            };
            let stats = &body_text(&rec)[2];
            assert!(stats.ends_with(expected), "{stats:?} should end with {expected:?}");
        }
    }

    #[test]
    fn test_price_change_pluralization_and_visibility() {
        let cases = [
            (vec![], "0 price changes"),
            (vec![event("2024-05-02", -5000.0)], "1 price change"),
            (
                vec![event("2024-05-02", -5000.0), event("2024-04-01", -2000.0)],
                "2 price changes",
            ),
        ];
        for (events, expected) in cases {
            let has_events = !events.is_empty();
            let rec = ListingRecord {
                events,
                ..Default::default()
            };
            let text = body_text(&rec);
            let summary = text.iter().find(|l| l.contains("price change")).unwrap();
            assert!(summary.starts_with(expected), "{summary:?}");
            assert_eq!(summary.contains("View all"), has_events);
            assert_eq!(text.iter().any(|l| l.starts_with("Latest")), has_events);

            let style = CardStyle::for_listing(false);
            assert_eq!(card_body(&rec, &style).view_all.is_some(), has_events);
        }
    }

    #[test]
    fn test_dialog_state_transitions() {
        assert_eq!(DialogState::default(), DialogState::Closed);
        assert_eq!(DialogState::Closed.open(0), DialogState::Closed);
        assert_eq!(DialogState::Closed.open(2), DialogState::Open);
        assert_eq!(DialogState::Open.close(), DialogState::Closed);
    }

    #[test]
    fn test_view_all_opens_and_close_callback_closes() {
        let rec = ListingRecord {
            events: vec![event("2024-05-02", -5000.0), event("2024-04-01", -2000.0)],
            ..sample()
        };
        let before = rec.events.clone();
        let state = state_for(rec, 120);
        let mut card = ListingCard::new();
        assert_eq!(card.dialog_state(), DialogState::Closed);

        let actions = card.handle_key(key(KeyCode::Char('v')), &state);
        assert_eq!(actions, vec![Action::OpenPriceHistory]);
        dispatch(&mut card, actions, &state);
        assert_eq!(card.dialog_state(), DialogState::Open);

        let actions = card.handle_key(key(KeyCode::Esc), &state);
        assert_eq!(actions, vec![Action::ClosePriceHistory]);
        dispatch(&mut card, actions, &state);
        assert_eq!(card.dialog_state(), DialogState::Closed);
        assert_eq!(state.listings[0].events, before);
    }

    #[test]
    fn test_view_all_unreachable_without_events() {
        let rec = ListingRecord {
            events: vec![],
            ..sample()
        };
        let state = state_for(rec, 120);
        let mut card = ListingCard::new();
        assert!(card.handle_key(key(KeyCode::Char('v')), &state).is_empty());
        card.on_action(&Action::OpenPriceHistory, &state);
        assert_eq!(card.dialog_state(), DialogState::Closed);
    }

    #[test]
    fn test_click_on_view_all() {
        let state = state_for(sample(), 120);
        let mut card = ListingCard::new();
        render(&mut card, &state, 100, 30);

        let target = card.hits.view_all.expect("view all drawn");
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.x,
            row: target.y,
            modifiers: KeyModifiers::NONE,
        };
        let actions = card.handle_mouse(click, Rect::default(), &state);
        assert_eq!(actions, vec![Action::OpenPriceHistory]);
        dispatch(&mut card, actions, &state);
        assert!(card.dialog_state().is_open());

        let screen = render(&mut card, &state, 100, 30).join("\n");
        assert!(screen.contains("price changes"));
    }

    #[test]
    fn test_hover_reveals_tooltip() {
        let state = state_for(sample(), 120);
        let mut card = ListingCard::new();
        render(&mut card, &state, 100, 30);
        let info = card.hits.info.expect("info icon drawn");

        let hover = MouseEvent {
            kind: MouseEventKind::Moved,
            column: info.x,
            row: info.y,
            modifiers: KeyModifiers::NONE,
        };
        let actions = card.handle_mouse(hover, Rect::default(), &state);
        assert_eq!(actions, vec![Action::ShowMotivationInfo(true)]);
        dispatch(&mut card, actions, &state);
        assert!(card.tooltip_visible);

        let screen = render(&mut card, &state, 100, 30).join(" ");
        assert!(screen.contains("Seller motivation detection"));

        let away = MouseEvent {
            column: 0,
            row: 0,
            ..hover
        };
        let actions = card.handle_mouse(away, Rect::default(), &state);
        assert_eq!(actions, vec![Action::ShowMotivationInfo(false)]);
    }

    #[test]
    fn test_new_badge_and_border() {
        let state = state_for(sample(), 120);
        let mut card = ListingCard::new();
        let rows = render(&mut card, &state, 100, 30);
        assert!(rows[0].starts_with("┏"));
        assert!(rows[0].contains(" New "));

        let state = state_for(
            ListingRecord {
                new: false,
                ..sample()
            },
            120,
        );
        let rows = render(&mut card, &state, 100, 30);
        assert!(rows[0].starts_with("┌"));
        assert!(!rows[0].contains("New"));
    }

    #[test]
    fn test_missing_data_renders() {
        let rec = ListingRecord::default();
        let text = body_text(&rec);
        assert_eq!(text[0], "$0 • $/sqft");
        assert!(text.iter().any(|l| l == "0 price changes"));
        assert!(!text.iter().any(|l| l.starts_with("Latest")));

        let state = state_for(rec, 120);
        let mut card = ListingCard::new();
        let screen = render(&mut card, &state, 100, 30).join("\n");
        assert!(screen.contains("no image"));
    }

    #[test]
    fn test_narrow_viewport_stacks_image() {
        let state = state_for(sample(), 60);
        let (image, body) = split_card(Rect::new(1, 1, 58, 28), &state.viewport);
        assert_eq!(image.width, 56);
        assert_eq!(image.height, 10);
        assert!(body.y > image.y + image.height - 1);

        let mut card = ListingCard::new();
        let screen = render(&mut card, &state, 60, 30).join("\n");
        assert!(screen.contains("front.jpg"));
        assert!(screen.contains("$450,000"));
    }

    #[test]
    fn test_copy_keys() {
        let state = state_for(sample(), 120);
        let mut card = ListingCard::new();
        assert_eq!(
            card.handle_key(key(KeyCode::Char('y')), &state),
            vec![Action::CopyToClipboard("https://utahrealestate.com/UT12345".into())]
        );
        assert_eq!(
            card.handle_key(key(KeyCode::Char('Y')), &state),
            vec![Action::CopyToClipboard("UT12345".into())]
        );
    }

    #[test]
    fn test_wrap_words() {
        let lines = wrap_words(MOTIVATION_TOOLTIP, 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), MOTIVATION_TOOLTIP);
    }

    #[test]
    fn test_image_label() {
        assert_eq!(image_label("https://x.com/a/b/front.jpg?w=1"), "front.jpg");
        assert_eq!(image_label("front.jpg"), "front.jpg");
    }
}
