// ── Navigation port ──
//
// The facade asks a navigator to switch the active view; what a "view"
// is belongs to the consumer (a router, a terminal renderer, ...).

use crate::model::Item;

/// Changes the consumer's active view.
pub trait Navigator: Send + Sync {
    /// Show the detail view for `item`.
    fn navigate_content(&self, item: &Item);

    /// Return to the item list.
    fn navigate_dashboard(&self);
}
