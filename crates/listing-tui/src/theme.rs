//! Color palette, score badge colors and per-region card styling.

use listing_proto::listing::MotivationScore;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_POPUP_BG: Color = Color::Rgb(18, 18, 26);
pub const C_LINK: Color = Color::Rgb(150, 130, 235);
pub const C_BADGE_FG: Color = Color::Rgb(18, 18, 18);
pub const C_NEW_BADGE: Color = Color::Rgb(156, 39, 176);
pub const C_CARD_EMPHASIS: Color = Color::Rgb(120, 100, 200);
pub const C_PRICE_DROP: Color = Color::Rgb(255, 95, 95);
pub const C_PRICE_RISE: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);

// Seller motivation badge backgrounds.
pub const C_SCORE_HIGH: Color = Color::Rgb(0x81, 0xF0, 0x8C);
pub const C_SCORE_MODERATE: Color = Color::Rgb(0xBB, 0xED, 0xF2);
pub const C_SCORE_FALLBACK: Color = Color::Rgb(0x9E, 0x9E, 0x9E);

/// Badge background for a seller motivation score.
pub fn score_color(score: Option<&str>) -> Color {
    match MotivationScore::parse(score) {
        MotivationScore::High => C_SCORE_HIGH,
        MotivationScore::Moderate => C_SCORE_MODERATE,
        MotivationScore::Other => C_SCORE_FALLBACK,
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

// ── Card regions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderWeight {
    Thin,
    Emphasized,
}

/// Styling for one visual region of the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStyle {
    pub fg: Color,
    pub bg: Option<Color>,
    pub bold: bool,
    /// Blank columns between adjacent items in the region.
    pub gap: u16,
    pub border: Option<BorderWeight>,
}

impl RegionStyle {
    const fn text(fg: Color) -> Self {
        Self {
            fg,
            bg: None,
            bold: false,
            gap: 1,
            border: None,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn style(&self) -> Style {
        let mut style = Style::default().fg(self.fg);
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn border_type(&self) -> BorderType {
        match self.border {
            Some(BorderWeight::Emphasized) => BorderType::Thick,
            _ => BorderType::Plain,
        }
    }

    pub fn separator(&self) -> String {
        " ".repeat(self.gap as usize)
    }
}

/// All card regions, resolved for one listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub frame: RegionStyle,
    pub new_badge: RegionStyle,
    pub image: RegionStyle,
    pub price: RegionStyle,
    pub price_per_sq_ft: RegionStyle,
    pub address: RegionStyle,
    pub stat_value: RegionStyle,
    pub stat_icon: RegionStyle,
    pub mls: RegionStyle,
    pub label: RegionStyle,
    pub link: RegionStyle,
    pub latest_chip: RegionStyle,
    pub tooltip: RegionStyle,
}

impl CardStyle {
    pub fn for_listing(is_new: bool) -> Self {
        let frame = if is_new {
            RegionStyle {
                border: Some(BorderWeight::Emphasized),
                ..RegionStyle::text(C_CARD_EMPHASIS)
            }
        } else {
            RegionStyle {
                border: Some(BorderWeight::Thin),
                ..RegionStyle::text(C_PANEL_BORDER)
            }
        };
        Self {
            frame,
            new_badge: RegionStyle {
                bg: Some(C_NEW_BADGE),
                ..RegionStyle::text(Color::White).bold()
            },
            image: RegionStyle {
                border: Some(BorderWeight::Thin),
                ..RegionStyle::text(C_SECONDARY)
            },
            price: RegionStyle::text(C_PRIMARY).bold(),
            price_per_sq_ft: RegionStyle::text(C_SECONDARY),
            address: RegionStyle::text(C_SECONDARY),
            stat_value: RegionStyle::text(C_PRIMARY),
            stat_icon: RegionStyle::text(C_MUTED),
            mls: RegionStyle {
                gap: 0,
                ..RegionStyle::text(C_SECONDARY)
            },
            label: RegionStyle::text(C_PRIMARY),
            link: RegionStyle::text(C_LINK).bold(),
            latest_chip: RegionStyle {
                bg: Some(C_PANEL_BORDER_FOCUSED),
                ..RegionStyle::text(C_BADGE_FG).bold()
            },
            tooltip: RegionStyle {
                bg: Some(C_POPUP_BG),
                border: Some(BorderWeight::Thin),
                ..RegionStyle::text(C_PRIMARY)
            },
        }
    }

    /// Badge style for a seller motivation score.
    pub fn score_badge(&self, score: Option<&str>) -> Style {
        Style::default()
            .fg(C_BADGE_FG)
            .bg(score_color(score))
            .add_modifier(Modifier::BOLD)
    }
}
