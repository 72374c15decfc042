//! Action enum — all user-initiated intents and internal events.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    ListingList,
    ListingCard,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Selection ────────────────────────────────────────────────────────────
    SelectUp(usize),
    SelectDown(usize),
    SelectFirst,
    SelectLast,
    Select(usize),

    // ── Card ─────────────────────────────────────────────────────────────────
    /// "View all" on the price-change summary.
    OpenPriceHistory,
    /// The history dialog's close callback.
    ClosePriceHistory,
    /// Hover over / away from the motivation info icon.
    ShowMotivationInfo(bool),
    ToggleMotivationInfo,

    // ── Focus ────────────────────────────────────────────────────────────────
    FocusNext,
    FocusPane(ComponentId),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}

impl Action {
    /// True for actions that move to a different listing.
    pub fn changes_selection(&self) -> bool {
        matches!(
            self,
            Action::SelectUp(_)
                | Action::SelectDown(_)
                | Action::SelectFirst
                | Action::SelectLast
                | Action::Select(_)
        )
    }
}
