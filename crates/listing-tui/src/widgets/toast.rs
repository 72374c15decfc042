//! Toasts — short-lived notices stacked above the status bar, bottom-right.
//!
//! The card's own badges sit on the top border, so notices stay out of the way
//! at the bottom. Newest is drawn lowest.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{C_POPUP_BG, C_TOAST_ERROR, C_TOAST_INFO, C_TOAST_SUCCESS};

const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn ttl(self) -> Duration {
        match self {
            Severity::Error => Duration::from_secs(5),
            _ => Duration::from_secs(3),
        }
    }

    fn marker(self) -> (&'static str, Color) {
        match self {
            Severity::Info => ("·", C_TOAST_INFO),
            Severity::Success => ("✓", C_TOAST_SUCCESS),
            Severity::Error => ("✗", C_TOAST_ERROR),
        }
    }
}

struct Toast {
    text: String,
    severity: Severity,
    shown_at: Instant,
}

#[derive(Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, text: String, severity: Severity) {
        // Re-showing the same text restarts its timer instead of stacking
        self.toasts.retain(|t| t.text != text);
        self.toasts.push(Toast {
            text,
            severity,
            shown_at: Instant::now(),
        });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), Severity::Info);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text.into(), Severity::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), Severity::Error);
    }

    /// Drop toasts whose time is up. True if the screen needs a redraw.
    pub fn tick(&mut self) -> bool {
        self.expire(Instant::now())
    }

    fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts
            .retain(|t| now.saturating_duration_since(t.shown_at) < t.severity.ttl());
        self.toasts.len() != before
    }

    /// `area` is the whole screen; the last row is left to the status bar.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if area.height < 2 {
            return;
        }
        let max_width = (area.width / 2).clamp(20, 56).min(area.width);
        let mut row = area.bottom() - 2;

        for toast in self.toasts.iter().rev() {
            let (icon, color) = toast.severity.marker();
            let label = format!(" {} {} ", icon, toast.text);
            let width = (label.width() as u16).min(max_width);
            let rect = Rect {
                x: area.right().saturating_sub(width + 1),
                y: row,
                width,
                height: 1,
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    label,
                    Style::default()
                        .fg(color)
                        .bg(C_POPUP_BG)
                        .add_modifier(Modifier::BOLD),
                ))),
                rect,
            );
            if row == area.y {
                break;
            }
            row -= 1;
        }
    }
}
