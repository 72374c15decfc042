//! Listing records as delivered by the alerts feed.
//!
//! Every field is optional. Upstream rows come from a SQL aggregate where
//! numerics may arrive as numbers, numeric strings, or `null`, so the
//! deserializers here never reject a record over a single odd value.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One price change on a listing. Feeds deliver these most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceChangeEvent {
    #[serde(deserialize_with = "lenient_text")]
    pub mls_number: Option<String>,
    /// `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or RFC 3339.
    #[serde(deserialize_with = "lenient_text")]
    pub event_date: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub old_price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub new_price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub price_diff: Option<f64>,
}

impl PriceChangeEvent {
    pub fn is_drop(&self) -> bool {
        self.price_diff.map_or(false, |d| d < 0.0)
    }
}

/// A single listing. Read-only once handed to the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingRecord {
    // ── Numbers ──────────────────────────────────────────────────────────────
    #[serde(deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub price_per_sq_ft: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub sq_ft: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub beds: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub baths: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub num_kitchens: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub year_built: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub days_on_market: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub current_days_on_market: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub cashflow_amount: Option<f64>,

    // ── Text ─────────────────────────────────────────────────────────────────
    #[serde(deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub mls_number: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub date_listed: Option<String>,

    // ── Collections ──────────────────────────────────────────────────────────
    #[serde(deserialize_with = "lenient_vec")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub events: Vec<PriceChangeEvent>,

    // ── Seller motivation ────────────────────────────────────────────────────
    #[serde(deserialize_with = "lenient_bool")]
    pub seller_motivation: Option<bool>,
    #[serde(deserialize_with = "lenient_text")]
    pub seller_motivation_score: Option<String>,

    #[serde(deserialize_with = "lenient_flag")]
    pub new: bool,
}

impl ListingRecord {
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Most recent price change (feeds are ordered newest first).
    pub fn latest_event(&self) -> Option<&PriceChangeEvent> {
        self.events.first()
    }

    pub fn price_change_count(&self) -> usize {
        self.events.len()
    }

    pub fn has_price_changes(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn motivation_score(&self) -> MotivationScore {
        MotivationScore::parse(self.seller_motivation_score.as_deref())
    }

    /// `"<street>, <city>"`, with blanks for whatever is missing.
    pub fn display_address(&self) -> String {
        format!(
            "{}, {}",
            self.street_address.as_deref().unwrap_or(""),
            self.city.as_deref().unwrap_or("")
        )
    }
}

/// Seller motivation bucket. Anything the backend sends besides the two
/// recognised labels (e.g. "Undetected") lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotivationScore {
    High,
    Moderate,
    Other,
}

impl MotivationScore {
    /// Exact, case-sensitive match.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("High") => Self::High,
            Some("Moderate") => Self::Moderate,
            _ => Self::Other,
        }
    }
}

// ── Lenient field deserializers ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Num(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberLike::Num(n)) => Some(n).filter(|n| n.is_finite()),
        Some(NumberLike::Text(s)) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite()),
        Some(NumberLike::Other(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextLike {
    Text(String),
    Int(i64),
    Num(f64),
    Other(IgnoredAny),
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TextLike>::deserialize(deserializer)?;
    Ok(match raw {
        Some(TextLike::Text(s)) => Some(s),
        Some(TextLike::Int(n)) => Some(n.to_string()),
        Some(TextLike::Num(n)) => Some(n.to_string()),
        Some(TextLike::Other(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Num(f64),
    Text(String),
    Other(IgnoredAny),
}

/// `true`/`false`, `0`/`1`, or their spellings in any case. Anything else is unknown.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BoolLike>::deserialize(deserializer)?;
    Ok(match raw {
        Some(BoolLike::Bool(b)) => Some(b),
        Some(BoolLike::Num(n)) if n == 0.0 => Some(false),
        Some(BoolLike::Num(n)) if n == 1.0 => Some(true),
        Some(BoolLike::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_bool(deserializer)?.unwrap_or(false))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListLike {
    Items(Vec<Value>),
    /// Some writers store arrays JSON-encoded in a text column.
    Encoded(String),
    Other(IgnoredAny),
}

/// A list where null, junk, or a bad element only costs that element.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<ListLike>::deserialize(deserializer)? {
        Some(ListLike::Items(items)) => items,
        Some(ListLike::Encoded(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Vec::new()
            } else {
                match serde_json::from_str::<Value>(text) {
                    Ok(Value::Array(items)) => items,
                    // A lone value, e.g. a single bare image URL
                    _ => vec![Value::String(text.to_string())],
                }
            }
        }
        Some(ListLike::Other(_)) | None => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!("dropping list element: {}", e);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let rec: ListingRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(rec.price, None);
        assert!(rec.images.is_empty());
        assert!(rec.events.is_empty());
        assert!(!rec.new);
        assert_eq!(rec.first_image(), None);
        assert_eq!(rec.latest_event(), None);
        assert_eq!(rec.display_address(), ", ");
    }

    #[test]
    fn test_nulls_are_tolerated() {
        let rec: ListingRecord = serde_json::from_str(
            r#"{"price": null, "images": null, "events": null, "new": null, "city": null}"#,
        )
        .unwrap();
        assert_eq!(rec.price, None);
        assert!(rec.images.is_empty());
        assert!(rec.events.is_empty());
        assert!(!rec.new);
        assert_eq!(rec.city, None);
    }

    #[test]
    fn test_numeric_strings_and_numeric_text() {
        let rec: ListingRecord = serde_json::from_str(
            r#"{"price": "450,000", "sq_ft": 2140, "baths": "2.5", "beds": "n/a", "zip_code": 84101}"#,
        )
        .unwrap();
        assert_eq!(rec.price, Some(450_000.0));
        assert_eq!(rec.sq_ft, Some(2140.0));
        assert_eq!(rec.baths, Some(2.5));
        assert_eq!(rec.beds, None);
        assert_eq!(rec.zip_code.as_deref(), Some("84101"));
    }

    #[test]
    fn test_events_keep_feed_order() {
        let rec: ListingRecord = serde_json::from_str(
            r#"{"events": [
                {"event_date": "2024-05-02 00:00:00", "price_diff": -5000, "old_price": 455000, "new_price": 450000},
                {"event_date": "2024-04-10", "price_diff": 2500}
            ]}"#,
        )
        .unwrap();
        assert_eq!(rec.price_change_count(), 2);
        let latest = rec.latest_event().unwrap();
        assert_eq!(latest.event_date.as_deref(), Some("2024-05-02 00:00:00"));
        assert!(latest.is_drop());
        assert!(!rec.events[1].is_drop());
    }

    #[test]
    fn test_motivation_score_parse() {
        assert_eq!(MotivationScore::parse(Some("High")), MotivationScore::High);
        assert_eq!(MotivationScore::parse(Some("Moderate")), MotivationScore::Moderate);
        assert_eq!(MotivationScore::parse(Some("Undetected")), MotivationScore::Other);
        assert_eq!(MotivationScore::parse(Some("high")), MotivationScore::Other);
        assert_eq!(MotivationScore::parse(None), MotivationScore::Other);
    }

    #[test]
    fn test_flags_accept_text_and_digits() {
        let rec: ListingRecord =
            serde_json::from_str(r#"{"seller_motivation": "TRUE", "new": 1}"#).unwrap();
        assert_eq!(rec.seller_motivation, Some(true));
        assert!(rec.new);

        let rec: ListingRecord =
            serde_json::from_str(r#"{"seller_motivation": 0, "new": "false"}"#).unwrap();
        assert_eq!(rec.seller_motivation, Some(false));
        assert!(!rec.new);

        let rec: ListingRecord =
            serde_json::from_str(r#"{"seller_motivation": "maybe", "new": [1]}"#).unwrap();
        assert_eq!(rec.seller_motivation, None);
        assert!(!rec.new);
    }

    #[test]
    fn test_images_stored_as_json_text() {
        let rec: ListingRecord =
            serde_json::from_str(r#"{"images": "[\"a.jpg\", \"b.jpg\"]"}"#).unwrap();
        assert_eq!(rec.images, ["a.jpg", "b.jpg"]);
        assert_eq!(rec.first_image(), Some("a.jpg"));

        let rec: ListingRecord =
            serde_json::from_str(r#"{"images": "https://img.example.com/x.jpg"}"#).unwrap();
        assert_eq!(rec.images, ["https://img.example.com/x.jpg"]);

        let rec: ListingRecord = serde_json::from_str(r#"{"images": ""}"#).unwrap();
        assert!(rec.images.is_empty());
    }

    #[test]
    fn test_bad_list_elements_are_dropped() {
        let rec: ListingRecord = serde_json::from_str(
            r#"{"events": [null, 7, {"price_diff": -5000}], "images": ["a.jpg", 3, null]}"#,
        )
        .unwrap();
        assert_eq!(rec.price_change_count(), 1);
        assert_eq!(rec.events[0].price_diff, Some(-5000.0));
        assert_eq!(rec.images, ["a.jpg"]);

        let rec: ListingRecord = serde_json::from_str(r#"{"events": {"oops": true}}"#).unwrap();
        assert!(rec.events.is_empty());
    }
}
