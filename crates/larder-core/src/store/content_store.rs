// ── Content store ──
//
// Holds the full item list and the current selection. Every write is
// broadcast to subscribers via `watch` channels; reads are cheap `Arc`
// clones. Writes are crate-private: only the facade mutates state.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{Item, ItemId};
use crate::stream::{ContentStream, SelectionStream, StateStream};

/// Snapshot of the item list, in the order the backend returned it.
pub type ContentList = Arc<Vec<Arc<Item>>>;

/// Snapshot of the current selection.
pub type Selection = Option<Arc<Item>>;

/// Observable holder of list and selection state.
///
/// Performs no validation. New subscribers immediately see the latest
/// value, then every subsequent change.
pub struct ContentStore {
    content_list: watch::Sender<ContentList>,
    selected_content: watch::Sender<Selection>,
}

impl ContentStore {
    pub fn new() -> Self {
        let (content_list, _) = watch::channel(Arc::new(Vec::new()));
        let (selected_content, _) = watch::channel(None);

        Self {
            content_list,
            selected_content,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn current_list(&self) -> ContentList {
        self.content_list.borrow().clone()
    }

    pub fn current_selection(&self) -> Selection {
        self.selected_content.borrow().clone()
    }

    /// Point-in-time lookup of an item by id in the current list.
    pub fn find_by_id(&self, id: &ItemId) -> Option<Arc<Item>> {
        self.content_list
            .borrow()
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.content_list.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.content_list.borrow().is_empty()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_list(&self) -> ContentStream {
        StateStream::new(self.content_list.subscribe())
    }

    pub fn subscribe_selection(&self) -> SelectionStream {
        StateStream::new(self.selected_content.subscribe())
    }

    // ── Mutation (facade only) ───────────────────────────────────────

    /// Replace the list snapshot and notify subscribers.
    pub(crate) fn set_list(&self, items: Vec<Item>) {
        let snapshot: Vec<Arc<Item>> = items.into_iter().map(Arc::new).collect();
        // `send_replace` updates unconditionally, even with zero receivers.
        self.content_list.send_replace(Arc::new(snapshot));
    }

    /// Replace the selection snapshot and notify subscribers.
    pub(crate) fn set_selection(&self, item: Selection) {
        self.selected_content.send_replace(item);
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}
