// ── Domain model ──
//
// The canonical representation of an inventory item. Wire records from
// larder-api are converted into these types in `convert.rs`; consumers
// depend only on what lives here.

pub mod category;
pub mod item;
pub mod item_id;

// ── Re-exports ──────────────────────────────────────────────────────

pub use category::Category;
pub use item::Item;
pub use item_id::ItemId;
