//! Viewport — terminal size and the narrow ("mobile") layout decision.

use listing_proto::config::DisplayConfig;
use ratatui::layout::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub is_mobile: bool,
    image_width: u16,
    image_height: u16,
}

impl Viewport {
    /// Only the terminal width drives the layout; the card scrolls vertically.
    pub fn measure(width: u16, display: &DisplayConfig) -> Self {
        let is_mobile = width < display.mobile_breakpoint;
        let image_width = if is_mobile {
            width.saturating_sub(display.mobile_margin).max(1)
        } else {
            display.image_box_width
        };
        Self {
            is_mobile,
            image_width,
            image_height: display.image_box_height,
        }
    }

    /// Image box size in cells. Only the width reacts to the viewport.
    pub fn image_box(&self) -> (u16, u16) {
        (self.image_width, self.image_height)
    }

    /// Image beside the details on wide terminals, stacked above on narrow ones.
    pub fn card_direction(&self) -> Direction {
        if self.is_mobile {
            Direction::Vertical
        } else {
            Direction::Horizontal
        }
    }

    pub fn layout_label(&self) -> &'static str {
        if self.is_mobile {
            "COLUMN"
        } else {
            "ROW"
        }
    }
}
