// ── API-to-domain type conversions ──
//
// Bridges `larder_api::ItemRecord` and the canonical `model::Item`.
// Inbound conversion is lenient: unparseable dates become `None` and
// unknown categories fall back to `Category::Other`.

use chrono::{DateTime, NaiveDate};

use larder_api::ItemRecord;

use crate::model::{Category, Item, ItemId};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend date. Accepts plain `YYYY-MM-DD` as well as full
/// RFC 3339 timestamps (browser date pickers send those), keeping only
/// the calendar date.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

// ── Item ───────────────────────────────────────────────────────────

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: ItemId::from(record.id),
            name: record.name,
            quantity: record.quantity,
            category: record.category.parse().unwrap_or(Category::Other),
            receive_date: parse_date(&record.receive_date),
            has_expiration: record.has_expiration,
            expiration_date: parse_date(&record.expiration_date),
        }
    }
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            category: item.category.to_string(),
            receive_date: format_date(item.receive_date),
            has_expiration: item.has_expiration,
            expiration_date: format_date(item.expiration_date),
        }
    }
}
