// ── Reactive content store ──
//
// Two observable state slots (item list, selection) with synchronous
// snapshot reads and push-based change notification.

mod content_store;

pub use content_store::{ContentList, ContentStore, Selection};
