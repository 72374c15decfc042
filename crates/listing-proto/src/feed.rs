//! Listing feed files.
//!
//! A feed is either a bare JSON array of listings or the alert envelope the
//! matching-listings endpoint returns:
//!
//! ```json
//! { "nickname": "SLC under 500k", "num_results": 2, "results": [ ... ] }
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::listing::ListingRecord;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("feed is not valid listing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed has the wrong shape: expected a listing array or alert object, found {0}")]
    Shape(&'static str),
    #[error("feed contains no listings")]
    Empty,
}

/// A loaded feed, new listings first.
#[derive(Debug, Clone, Default)]
pub struct ListingFeed {
    pub nickname: Option<String>,
    pub listings: Vec<ListingRecord>,
}

impl ListingFeed {
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn new_count(&self) -> usize {
        self.listings.iter().filter(|l| l.new).count()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn load_feed(path: &Path) -> Result<ListingFeed, FeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let feed = parse_feed(&content)?;
    tracing::info!(
        "loaded {} listings ({} new) from {}",
        feed.len(),
        feed.new_count(),
        path.display()
    );
    Ok(feed)
}

/// Syntax errors keep their line and column. A row that is not a listing is
/// skipped with a warning; the rest of the feed still loads.
pub fn parse_feed(content: &str) -> Result<ListingFeed, FeedError> {
    let (nickname, rows) = match serde_json::from_str::<Value>(content)? {
        Value::Array(rows) => (None, rows),
        Value::Object(mut envelope) => {
            let nickname = envelope
                .get("nickname")
                .and_then(Value::as_str)
                .map(str::to_string);
            let rows = match envelope.remove("results") {
                Some(Value::Array(rows)) => rows,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => return Err(FeedError::Shape(kind(&other))),
            };
            if let Some(n) = envelope.get("num_results").and_then(Value::as_u64) {
                if n as usize != rows.len() {
                    tracing::warn!("feed claims {} results but carries {}", n, rows.len());
                }
            }
            (nickname, rows)
        }
        other => return Err(FeedError::Shape(kind(&other))),
    };

    let listings: Vec<ListingRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| match serde_json::from_value(row) {
            Ok(rec) => Some(rec),
            Err(e) => {
                tracing::warn!("skipping result {}: {}", i, e);
                None
            }
        })
        .collect();
    if listings.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok(ListingFeed {
        nickname,
        listings: new_first(listings),
    })
}

/// Move new listings to the front, keeping relative order in both groups.
pub fn new_first(listings: Vec<ListingRecord>) -> Vec<ListingRecord> {
    let (mut fresh, rest): (Vec<_>, Vec<_>) = listings.into_iter().partition(|l| l.new);
    fresh.extend(rest);
    fresh
}
