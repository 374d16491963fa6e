//! # Items
//!
//! The records the deck browses, and the mapping from whatever the feed
//! delivers into them. Every optional field is resolved here, so the engine
//! only ever sees complete, immutable `Item`s.
//!
//! Feeds arrive as JSON, either a bare array or a paginated envelope:
//!
//! ```text
//! [ { "id": 1, "header": "...", "body": "...", "image": "...", "published": "..." } ]
//! { "items": [ { "id": "a", "title": "...", "summary": "...", "createdAt": "..." } ], "total": 1 }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Image reference used when a record carries none.
pub const PLACEHOLDER_IMAGE_REF: &str = "about:blank#no-image";

/// Longest summary (in display columns) derived from a body.
pub const SUMMARY_EXCERPT_WIDTH: usize = 160;

/// Stable identity of an item within a feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub image_ref: String,
    pub published_at: DateTime<Utc>,
}

impl Item {
    /// Medium date, short time: `Jan 6, 2026, 9:30 AM`.
    pub fn published_label(&self) -> String {
        self.published_at.format("%b %-d, %Y, %-I:%M %p").to_string()
    }
}

// ============================================================================
// Raw records (everything optional, aliases for the shapes seen in the wild)
// ============================================================================

/// One raw feed entry. Feeds in the wild spell some fields several ways;
/// each spelling is its own field so a record carrying two of them still
/// parses. `map_record` takes the first non-blank one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRecord {
    pub id: Option<serde_json::Value>,
    pub title: Option<String>,
    pub header: Option<String>,
    pub body: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "image_url")]
    pub image_url_snake: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<String>,
    #[serde(rename = "published_at")]
    pub published_at_snake: Option<String>,
    pub published: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    Bare(Vec<FeedRecord>),
    Paginated { items: Vec<FeedRecord> },
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum FeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    DuplicateId(ItemId),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Io(e) => write!(f, "feed I/O error: {e}"),
            FeedError::Parse(e) => write!(f, "feed parse error: {e}"),
            FeedError::DuplicateId(id) => write!(f, "feed contains duplicate id '{id}'"),
        }
    }
}

impl std::error::Error for FeedError {}

// ============================================================================
// Mapping
// ============================================================================

/// Resolve one raw record into an `Item`. `index` names records without an id.
pub fn map_record(record: FeedRecord, index: usize) -> Item {
    let id = match record.id {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => ItemId::new(s),
        Some(serde_json::Value::Number(n)) => ItemId::new(n.to_string()),
        _ => ItemId::new(format!("item-{index}")),
    };

    let title = first_non_blank([record.title, record.header])
        .unwrap_or_else(|| "Untitled".to_string());
    let body = first_non_blank([record.body, record.content]);
    let summary = non_blank(record.summary);

    let (summary, body) = match (summary, body) {
        (Some(summary), Some(body)) => (summary, body),
        (None, Some(body)) => (excerpt(&body, SUMMARY_EXCERPT_WIDTH), body),
        (Some(summary), None) => (summary.clone(), summary),
        (None, None) => (String::new(), String::new()),
    };

    let image_ref = first_non_blank([record.image_url, record.image_url_snake, record.image])
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_REF.to_string());

    let published = first_non_blank([
        record.published_at,
        record.published_at_snake,
        record.published,
        record.created_at,
    ]);
    let published_at = match published.as_deref().map(parse_timestamp) {
        Some(Some(ts)) => ts,
        Some(None) => {
            warn!("Item {id}: unparseable timestamp, using epoch");
            DateTime::<Utc>::UNIX_EPOCH
        }
        None => {
            debug!("Item {id}: no timestamp, using epoch");
            DateTime::<Utc>::UNIX_EPOCH
        }
    };

    Item {
        id,
        title,
        summary,
        body,
        image_ref,
        published_at,
    }
}

/// Parse a feed document and map every record. Ids must be unique.
pub fn parse_feed(json: &str) -> Result<Vec<Item>, FeedError> {
    let records = match serde_json::from_str::<FeedDocument>(json).map_err(FeedError::Parse)? {
        FeedDocument::Bare(records) => records,
        FeedDocument::Paginated { items } => items,
    };

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let item = map_record(record, index);
        if !seen.insert(item.id.clone()) {
            return Err(FeedError::DuplicateId(item.id));
        }
        items.push(item);
    }
    Ok(items)
}

/// Read and parse a feed file.
pub async fn load_feed(path: &Path) -> Result<Vec<Item>, FeedError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(FeedError::Io)?;
    parse_feed(&contents)
}

/// Accepts RFC3339, or a naive `YYYY-MM-DDTHH:MM:SS` taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_non_blank<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().find_map(non_blank)
}

/// First paragraph of `body`, cut at a word boundary to `width` columns.
fn excerpt(body: &str, width: usize) -> String {
    let paragraph = body
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .find(|p| !p.is_empty())
        .unwrap_or_default();

    let lines = textwrap::wrap(&paragraph, width.saturating_sub(1).max(1));
    match lines.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, ..] => format!("{first}…"),
    }
}

// ============================================================================
// Demo feed
// ============================================================================

/// Built-in feed used when no feed path is configured.
pub fn demo_items() -> Vec<Item> {
    let demo = [
        (
            "Tidal Power Comes of Age",
            "A new generation of underwater turbines is feeding steady power into coastal grids.\n\n\
             Unlike wind and solar, tides run on a timetable known decades in advance, which \
             makes them attractive to grid operators juggling intermittent sources.",
            "2026-01-06T09:30:00",
        ),
        (
            "The Return of the Night Train",
            "Sleeper services are reappearing across the continent as travellers trade short \
             flights for a bunk and a morning arrival in the city centre.\n\n\
             Operators report full cabins on most routes through the winter season.",
            "2026-01-05T16:45:00",
        ),
        (
            "Error Correction Crosses a Threshold",
            "Researchers demonstrated a logical qubit that outlives its physical parts, \
             a long-awaited milestone for fault-tolerant machines.",
            "2026-01-04T11:15:00",
        ),
        (
            "Cities Plant Shade",
            "Urban forestry budgets are growing as councils measure how much a single street \
             tree lowers summer pavement temperatures.",
            "2026-01-03T08:05:00",
        ),
        (
            "Reading Ancient Scrolls Without Opening Them",
            "X-ray tomography and machine learning are recovering text from carbonised \
             papyrus that would crumble if unrolled.",
            "2026-01-02T19:20:00",
        ),
        (
            "Small Reactors, Big Questions",
            "Modular reactor designs promise factory-built units, but regulators are still \
             working out how to license a design rather than a site.",
            "2026-01-01T13:40:00",
        ),
        (
            "Digital Identity at the Border",
            "Several airports now accept a phone-held credential in place of a passport scan. \
             Privacy groups want to know who keeps the logs.",
            "2025-12-29T17:55:00",
        ),
    ];

    demo.iter()
        .enumerate()
        .map(|(i, (title, body, published))| {
            map_record(
                FeedRecord {
                    id: Some(serde_json::Value::from(i as u64 + 1)),
                    title: Some(title.to_string()),
                    body: Some(body.to_string()),
                    published_at: Some(published.to_string()),
                    ..Default::default()
                },
                i,
            )
        })
        .collect()
}
