pub mod config;
pub mod feed;
pub mod format;
pub mod listing;
pub mod platform;
