//! Active-view tracking for the CLI.
//!
//! The facade asks for navigation; the router remembers where it was sent
//! so the command handler can render that view once the command settles.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;

use larder_core::{Item, Navigator};

/// The screen the CLI should show.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// The full item list.
    Dashboard,
    /// One item in detail.
    Detail(Arc<Item>),
}

/// [`Navigator`] that records the active [`View`].
pub struct ViewRouter {
    active: ArcSwap<View>,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self {
            active: ArcSwap::from_pointee(View::Dashboard),
        }
    }

    pub fn active(&self) -> Arc<View> {
        self.active.load_full()
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for ViewRouter {
    fn navigate_content(&self, item: &Item) {
        debug!(id = %item.id, "view: detail");
        self.active
            .store(Arc::new(View::Detail(Arc::new(item.clone()))));
    }

    fn navigate_dashboard(&self) {
        debug!("view: dashboard");
        self.active.store(Arc::new(View::Dashboard));
    }
}
