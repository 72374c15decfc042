//! HelpOverlay component — centered popup with the keyboard reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_PANEL_BORDER, C_POPUP_BG, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::centered_rect,
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => vec![Action::ToggleHelp],
            // Consume all keys while overlay is open
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleHelp = action {
            self.visible = !self.visible;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }

        let help_lines = help_lines();
        let popup = centered_rect(64, help_lines.len() as u16 + 2, area);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER))
                        .style(Style::default().bg(C_POPUP_BG)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            " keyboard shortcuts",
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" listings"),
        help_row("↑ / ↓  or  j / k", "previous / next listing"),
        help_row("n / p", "next / previous (card pane)"),
        help_row("pg up / pg dn", "jump a page"),
        help_row("home / end  or  g / G", "first / last listing"),
        help_row("tab", "switch list ↔ card"),
        Line::from(""),
        section(" card"),
        help_row("v / enter", "view all price changes"),
        help_row("i", "seller motivation info"),
        help_row("y / Y", "copy listing url / MLS number"),
        help_row("esc", "close price history"),
        Line::from(""),
        section(" app"),
        help_row("?", "toggle this help overlay"),
        help_row("q / Ctrl+C", "quit"),
        Line::from(""),
        Line::from(Span::styled(
            " press ? or esc to close",
            Style::default().fg(C_MUTED),
        )),
    ]
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<22}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}
