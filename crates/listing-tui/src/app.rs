//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A blocking reader task forwards terminal events over a `tokio::mpsc` channel.
//! - The event loop draws each frame, then awaits the next event or tick.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{help_overlay::HelpOverlay, listing_card::ListingCard, listing_list::ListingList},
    theme::C_BG,
    widgets::{
        pane_chrome::contains,
        status_bar::{self, StatusInfo},
        toast::ToastManager,
    },
};

/// Last-drawn rects of the focusable panes, for mouse hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    list: Rect,
    card: Rect,
}

pub struct App {
    state: AppState,
    list: ListingList,
    card: ListingCard,
    help: HelpOverlay,
    toast: ToastManager,
    focus: ComponentId,
    pane_areas: PaneAreas,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            list: ListingList::new(),
            card: ListingCard::new(),
            help: HelpOverlay::new(),
            toast: ToastManager::new(),
            focus: ComponentId::ListingList,
            pane_areas: PaneAreas::default(),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("listings exiting");

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Toast expiry check
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                maybe_ev = rx.recv() => {
                    match maybe_ev {
                        Some(ev) => {
                            self.handle_event(ev);
                            // Drain whatever queued up while we were drawing
                            while let Ok(next) = rx.try_recv() {
                                self.handle_event(next);
                            }
                            needs_redraw = true;
                        }
                        None => {
                            warn!("terminal event reader stopped");
                            break;
                        }
                    }
                }

                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, ev: Event) {
        let actions = match ev {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => vec![Action::Resize(w, h)],
            _ => vec![],
        };
        for action in actions {
            self.dispatch(action);
        }
    }

    /// The pane that receives keys. The narrow layout has only the card.
    fn focused(&self) -> ComponentId {
        if self.state.viewport.is_mobile {
            ComponentId::ListingCard
        } else {
            self.focus
        }
    }

    // ── Input routing ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.help.visible {
            return self.help.handle_key(key, &self.state);
        }

        // The price history dialog is modal
        if self.card.dialog_state().is_open() {
            return self.card.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Tab | KeyCode::BackTab => return vec![Action::FocusNext],
            _ => {}
        }

        match self.focused() {
            ComponentId::ListingList => {
                let actions = self.list.handle_key(key, &self.state);
                if actions.is_empty() {
                    // Card keys (v, i, y) work from the list too
                    self.card.handle_key(key, &self.state)
                } else {
                    actions
                }
            }
            _ => self.card.handle_key(key, &self.state),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.help.visible {
            return vec![];
        }
        let areas = self.pane_areas;
        let s = &self.state;

        // Hover tracking and the modal dialog both belong to the card
        if event.kind == MouseEventKind::Moved || self.card.dialog_state().is_open() {
            return self.card.handle_mouse(event, areas.card, s);
        }

        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        let focused = self.focused();
        if contains(areas.list, event.column, event.row) {
            let mut actions = self.list.handle_mouse(event, areas.list, s);
            if focused != ComponentId::ListingList && !actions.is_empty() {
                actions.insert(0, Action::FocusPane(ComponentId::ListingList));
            }
            return actions;
        }
        if contains(areas.card, event.column, event.row) {
            let mut actions = match event.kind {
                MouseEventKind::ScrollUp => vec![Action::SelectUp(1)],
                MouseEventKind::ScrollDown => vec![Action::SelectDown(1)],
                _ => self.card.handle_mouse(event, areas.card, s),
            };
            if focused != ComponentId::ListingCard {
                actions.insert(0, Action::FocusPane(ComponentId::ListingCard));
            }
            return actions;
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Broadcast to all components first
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.list.on_action(&action, s));
            out.extend(self.card.on_action(&action, s));
            out.extend(self.help.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // Secondary actions are depth-limited to 1 level
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        if !matches!(action, Action::ShowMotivationInfo(_)) {
            debug!("apply_action: {:?}", action);
        }
        let last = self.state.listings.len().saturating_sub(1);
        match action {
            Action::SelectUp(n) => self.select(self.state.selected.saturating_sub(n)),
            Action::SelectDown(n) => self.select(self.state.selected.saturating_add(n)),
            Action::SelectFirst => self.select(0),
            Action::SelectLast => self.select(last),
            Action::Select(idx) => self.select(idx),

            Action::FocusNext => {
                if !self.state.viewport.is_mobile {
                    self.focus = match self.focus {
                        ComponentId::ListingList => ComponentId::ListingCard,
                        _ => ComponentId::ListingList,
                    };
                }
            }
            Action::FocusPane(id) => {
                if id != ComponentId::HelpOverlay {
                    self.focus = id;
                }
            }

            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            Action::Resize(w, h) => {
                let was_mobile = self.state.viewport.is_mobile;
                self.state.resize(w);
                if was_mobile != self.state.viewport.is_mobile {
                    let label = self.state.viewport.layout_label();
                    info!("layout switched to {} at {}x{}", label, w, h);
                    self.toast.info(format!("layout: {}", label.to_lowercase()));
                }
            }

            Action::Quit => self.should_quit = true,

            // Component-local; handled in on_action
            Action::OpenPriceHistory
            | Action::ClosePriceHistory
            | Action::ShowMotivationInfo(_)
            | Action::ToggleMotivationInfo
            | Action::ToggleHelp => {}
        }
    }

    fn select(&mut self, idx: usize) {
        if self.state.select(idx) {
            debug!("selected listing {}", self.state.selected);
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        let body_area = outer[0];
        let status_area = outer[1];

        let focused = self.focused();
        if self.state.viewport.is_mobile {
            self.pane_areas = PaneAreas {
                list: Rect::default(),
                card: body_area,
            };
        } else {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(32), Constraint::Min(0)])
                .split(body_area);
            self.pane_areas = PaneAreas {
                list: cols[0],
                card: cols[1],
            };
            self.list.draw(
                frame,
                cols[0],
                focused == ComponentId::ListingList,
                &self.state,
            );
        }
        self.card.draw(
            frame,
            self.pane_areas.card,
            focused == ComponentId::ListingCard,
            &self.state,
        );

        let total = self.state.listings.len();
        status_bar::draw_keys_bar(
            frame,
            status_area,
            &StatusInfo {
                feed_name: self.state.feed_name.as_deref(),
                position: if total == 0 { 0 } else { self.state.selected + 1 },
                total,
                layout: self.state.viewport.layout_label(),
                dialog_open: self.card.dialog_state().is_open(),
            },
        );

        // ── Help overlay (on top of everything) ──────────────────────────────
        self.help.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}
