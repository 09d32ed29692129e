// ── Store subscriptions ──
//
// Read handles on the two store slots. Subscribers never write; the
// facade is the only publisher.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::{ContentList, Selection};

/// Subscription to the item list.
pub type ContentStream = StateStream<ContentList>;

/// Subscription to the current selection.
pub type SelectionStream = StateStream<Selection>;

/// Handle on one store slot.
///
/// Holds the snapshot it last observed. A new subscriber starts with the
/// slot's present value, so a late view still renders the latest list.
pub struct StateStream<T: Clone + Send + Sync + 'static> {
    current: T,
    receiver: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> StateStream<T> {
    pub(crate) fn new(mut receiver: watch::Receiver<T>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// Snapshot this subscriber last observed.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// What the slot holds right now, without marking it observed.
    pub fn latest(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Next published snapshot, or `None` once the store is gone.
    ///
    /// Publishes that land between two calls collapse into the newest.
    pub async fn changed(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        let value = self.receiver.borrow_and_update().clone();
        self.current = value.clone();
        Some(value)
    }

    /// Turn the subscription into a [`SlotUpdates`] stream.
    pub fn into_stream(self) -> SlotUpdates<T> {
        SlotUpdates {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// Stream of slot snapshots: the present value, then each later publish.
pub struct SlotUpdates<T: Clone + Send + Sync + 'static> {
    inner: WatchStream<T>,
}

impl<T: Clone + Send + Sync + 'static> Stream for SlotUpdates<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
