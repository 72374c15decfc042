//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it; the App event loop is the only writer.

use listing_proto::config::DisplayConfig;
use listing_proto::feed::ListingFeed;
use listing_proto::listing::ListingRecord;

use crate::viewport::Viewport;

pub struct AppState {
    pub feed_name: Option<String>,
    pub listings: Vec<ListingRecord>,
    /// Index into `listings` of the record shown in the card.
    pub selected: usize,
    pub display: DisplayConfig,
    pub viewport: Viewport,
}

impl AppState {
    pub fn new(feed: ListingFeed, display: DisplayConfig, width: u16) -> Self {
        let viewport = Viewport::measure(width, &display);
        Self {
            feed_name: feed.nickname,
            listings: feed.listings,
            selected: 0,
            display,
            viewport,
        }
    }

    pub fn selected_listing(&self) -> Option<&ListingRecord> {
        self.listings.get(self.selected)
    }

    pub fn resize(&mut self, width: u16) {
        self.viewport = Viewport::measure(width, &self.display);
    }

    /// Move the selection, clamped to the feed. Returns true if it changed.
    pub fn select(&mut self, idx: usize) -> bool {
        let clamped = idx.min(self.listings.len().saturating_sub(1));
        let changed = clamped != self.selected;
        self.selected = clamped;
        changed
    }
}
