pub mod help_overlay;
pub mod listing_card;
pub mod listing_list;
pub mod price_changes_dialog;
