// ── Content facade ──
//
// The single writer of the content store and the only caller of the
// item repository. Mutations round-trip to the backend, then reload the
// full list and reconcile the selection.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{Item, ItemId};
use crate::navigation::Navigator;
use crate::repository::ItemRepository;
use crate::store::{ContentList, ContentStore, Selection};
use crate::stream::{ContentStream, SelectionStream};

// ── LoadProgress ─────────────────────────────────────────────────

/// Bookkeeping of list loads, observable by consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    /// Loads started but not yet settled.
    pub in_flight: usize,
    /// Loads settled so far (successfully or not).
    pub completed: u64,
    /// Whether the most recently settled load failed.
    pub last_failed: bool,
}

/// Registers a load as in-flight for as long as it lives. Dropping it
/// settles the load, so cancelled or panicking loads cannot wedge
/// waiters. A load only counts as successful once `succeeded` is set.
struct LoadGuard {
    inner: Arc<FacadeInner>,
    succeeded: bool,
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        let failed = !self.succeeded;
        self.inner.loads.send_modify(|p| {
            p.in_flight = p.in_flight.saturating_sub(1);
            p.completed += 1;
            p.last_failed = failed;
        });
    }
}

// ── ContentFacade ────────────────────────────────────────────────

/// Entry point for consumers of inventory content.
///
/// Cheaply cloneable via `Arc<FacadeInner>`. Owns the [`ContentStore`];
/// consumers get read-only snapshots and subscriptions.
#[derive(Clone)]
pub struct ContentFacade {
    inner: Arc<FacadeInner>,
}

struct FacadeInner {
    store: ContentStore,
    repository: Arc<dyn ItemRepository>,
    navigator: Arc<dyn Navigator>,
    loads: watch::Sender<LoadProgress>,
}

impl ContentFacade {
    /// Create a facade with an empty store. Performs no I/O.
    pub fn new(repository: Arc<dyn ItemRepository>, navigator: Arc<dyn Navigator>) -> Self {
        let (loads, _) = watch::channel(LoadProgress::default());

        Self {
            inner: Arc::new(FacadeInner {
                store: ContentStore::new(),
                repository,
                navigator,
                loads,
            }),
        }
    }

    /// Create a facade and start the initial list load in the background.
    ///
    /// The load counts as in-flight before this returns, so an immediate
    /// [`select_content_by_id`](Self::select_content_by_id) or
    /// [`wait_for_content`](Self::wait_for_content) waits for it.
    /// Must be called from within a tokio runtime.
    pub fn spawn(repository: Arc<dyn ItemRepository>, navigator: Arc<dyn Navigator>) -> Self {
        let facade = Self::new(repository, navigator);
        drop(facade.spawn_load());
        facade
    }

    // ── Loading ──────────────────────────────────────────────────

    /// Fetch the full collection and replace the list snapshot.
    ///
    /// On failure the list is left untouched and the error returned.
    pub async fn load_content(&self) -> Result<(), CoreError> {
        let guard = self.begin_load();
        self.run_load(guard).await
    }

    /// Start a load in the background. It is registered as in-flight
    /// before this returns.
    pub fn spawn_load(&self) -> JoinHandle<Result<(), CoreError>> {
        let guard = self.begin_load();
        let facade = self.clone();
        tokio::spawn(async move { facade.run_load(guard).await })
    }

    /// Subscribe to load bookkeeping (e.g. to drive a spinner).
    pub fn load_progress(&self) -> watch::Receiver<LoadProgress> {
        self.inner.loads.subscribe()
    }

    fn begin_load(&self) -> LoadGuard {
        self.inner.loads.send_modify(|p| p.in_flight += 1);
        LoadGuard {
            inner: Arc::clone(&self.inner),
            succeeded: false,
        }
    }

    async fn run_load(&self, mut guard: LoadGuard) -> Result<(), CoreError> {
        let result = self.inner.repository.load_content().await;
        match result {
            Ok(items) => {
                debug!(items = items.len(), "content loaded");
                self.inner.store.set_list(items);
                guard.succeeded = true;
                drop(guard);
                Ok(())
            }
            Err(e) => {
                drop(guard);
                warn!(error = %e, "failed to load content");
                Err(e)
            }
        }
    }

    /// Resolve once the store holds a list no older than this call.
    ///
    /// If loads are in flight, waits until every one of them has settled;
    /// otherwise loads now. When the last load to settle failed, loads
    /// once more so the caller sees the error.
    pub async fn wait_for_content(&self) -> Result<(), CoreError> {
        let mut progress = self.inner.loads.subscribe();
        let (in_flight, seen) = {
            let p = progress.borrow_and_update();
            (p.in_flight, p.completed)
        };

        if in_flight == 0 {
            return self.load_content().await;
        }

        debug!(in_flight, "waiting for in-flight content loads");
        let target = seen.saturating_add(u64::try_from(in_flight).unwrap_or(u64::MAX));
        let failed = progress
            .wait_for(|p| p.completed >= target)
            .await
            .map_err(|_| CoreError::Internal("load tracker closed".into()))?
            .last_failed;

        if failed {
            debug!("awaited load failed, loading again");
            return self.load_content().await;
        }
        Ok(())
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Create `item` under a freshly generated id, then refresh.
    ///
    /// Any id already on the item is overwritten. Returns the item as
    /// sent to the backend.
    pub async fn add_content(&self, mut item: Item) -> Result<Item, CoreError> {
        item.id = ItemId::generate();
        debug!(id = %item.id, name = %item.name, "adding content");

        self.inner.repository.create_content(&item).await?;
        info!(id = %item.id, name = %item.name, "content added");

        self.refresh_content(None).await?;
        Ok(item)
    }

    /// Update `item`, or create it if its id is not in the current list.
    ///
    /// A cleared expiration flag also clears the expiration date before
    /// anything is sent.
    pub async fn update_content(&self, mut item: Item) -> Result<Item, CoreError> {
        item.normalize_expiration();

        if self.inner.store.find_by_id(&item.id).is_none() {
            debug!(id = %item.id, "unknown id, creating instead of updating");
            return self.add_content(item).await;
        }

        self.inner.repository.update_content(&item).await?;
        info!(id = %item.id, name = %item.name, "content updated");

        self.refresh_content(None).await?;
        Ok(item)
    }

    /// Delete `item` if its id is in the current list.
    ///
    /// Unknown ids are a no-op. Returns whether a delete was issued.
    pub async fn delete_content(&self, item: &Item) -> Result<bool, CoreError> {
        if self.inner.store.find_by_id(&item.id).is_none() {
            debug!(id = %item.id, "unknown id, nothing to delete");
            return Ok(false);
        }

        self.inner.repository.delete_content(item).await?;
        info!(id = %item.id, name = %item.name, "content deleted");

        self.refresh_content(Some(&item.id)).await?;
        Ok(true)
    }

    /// Reload, then reconcile the selection.
    ///
    /// Without an id (add/update) the detail view always closes. With an
    /// id (delete) it closes only if that item was the one selected.
    async fn refresh_content(&self, id: Option<&ItemId>) -> Result<(), CoreError> {
        let id = id.filter(|id| !id.is_empty());
        debug!(id = ?id.map(ItemId::as_str), "refreshing content");

        self.load_content().await?;

        let selected = self.inner.store.current_selection();
        let reset = match id {
            None => true,
            Some(id) => selected.as_ref().is_some_and(|s| &s.id == id),
        };

        if reset {
            self.inner.store.set_selection(None);
            self.reset_content();
        }
        Ok(())
    }

    // ── Selection ────────────────────────────────────────────────

    /// Select the item with `id` in a freshly loaded list.
    ///
    /// Never reads a list older than the loads in flight at call time
    /// (or a new load when none are).
    /// Unknown ids and `None` clear the selection.
    pub async fn select_content_by_id(&self, id: Option<&ItemId>) -> Result<Selection, CoreError> {
        let Some(id) = id else {
            self.select_content(None);
            return Ok(None);
        };

        self.wait_for_content().await?;

        let found = self.inner.store.find_by_id(id);
        debug!(%id, found = found.is_some(), "select by id");
        self.inner.store.set_selection(found.clone());
        Ok(found)
    }

    /// Set the selection directly, with no lookup.
    pub fn select_content(&self, item: Selection) {
        debug!(id = ?item.as_ref().map(|i| i.id.as_str()), "select content");
        self.inner.store.set_selection(item);
    }

    // ── Navigation ───────────────────────────────────────────────

    /// Open the detail view for `item`.
    pub fn go_to_content(&self, item: &Item) {
        self.inner.navigator.navigate_content(item);
    }

    /// Return to the dashboard.
    pub fn reset_content(&self) {
        self.inner.navigator.navigate_dashboard();
    }

    // ── Observation ──────────────────────────────────────────────

    pub fn content_list(&self) -> ContentStream {
        self.inner.store.subscribe_list()
    }

    pub fn selected_content(&self) -> SelectionStream {
        self.inner.store.subscribe_selection()
    }

    pub fn current_list(&self) -> ContentList {
        self.inner.store.current_list()
    }

    pub fn current_selection(&self) -> Selection {
        self.inner.store.current_selection()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    use super::*;
    use crate::model::Category;

    // ── Fakes ────────────────────────────────────────────────────

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load,
        Create(Item),
        Update(Item),
        Delete(ItemId),
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Op {
        Load,
        Create,
        Update,
        Delete,
    }

    /// In-memory backend that records every call.
    #[derive(Default)]
    struct FakeRepository {
        items: Mutex<Vec<Item>>,
        calls: Mutex<Vec<Call>>,
        failing: Mutex<Option<Op>>,
        scripted: Mutex<VecDeque<ScriptedLoad>>,
    }

    /// A load that blocks until `release` fires, then answers `items`
    /// (or whatever the backend holds by then when `None`).
    struct ScriptedLoad {
        release: Arc<Notify>,
        items: Option<Vec<Item>>,
    }

    impl FakeRepository {
        fn with_items(items: Vec<Item>) -> Arc<Self> {
            Arc::new(Self {
                items: Mutex::new(items),
                ..Self::default()
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn loads(&self) -> usize {
            self.calls().iter().filter(|c| **c == Call::Load).count()
        }

        fn clear_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        fn fail(&self, op: Op) {
            *self.failing.lock().unwrap() = Some(op);
        }

        fn set_items(&self, items: Vec<Item>) {
            *self.items.lock().unwrap() = items;
        }

        /// Make the next unscripted load block until the returned
        /// `Notify` fires.
        fn gate_next_load(&self) -> Arc<Notify> {
            self.push_script(None)
        }

        /// Make the next unscripted load block until released, then
        /// answer `items`.
        fn script_load(&self, items: Vec<Item>) -> Arc<Notify> {
            self.push_script(Some(items))
        }

        fn push_script(&self, items: Option<Vec<Item>>) -> Arc<Notify> {
            let release = Arc::new(Notify::new());
            self.scripted.lock().unwrap().push_back(ScriptedLoad {
                release: Arc::clone(&release),
                items,
            });
            release
        }

        fn check(&self, op: Op) -> Result<(), CoreError> {
            if *self.failing.lock().unwrap() == Some(op) {
                return Err(CoreError::Api {
                    message: format!("{op:?} rejected"),
                    status: Some(500),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ItemRepository for FakeRepository {
        async fn load_content(&self) -> Result<Vec<Item>, CoreError> {
            self.calls.lock().unwrap().push(Call::Load);
            let script = self.scripted.lock().unwrap().pop_front();
            let answer = match script {
                Some(ScriptedLoad { release, items }) => {
                    release.notified().await;
                    items
                }
                None => None,
            };
            self.check(Op::Load)?;
            Ok(answer.unwrap_or_else(|| self.items.lock().unwrap().clone()))
        }

        async fn create_content(&self, item: &Item) -> Result<(), CoreError> {
            self.calls.lock().unwrap().push(Call::Create(item.clone()));
            self.check(Op::Create)?;
            self.items.lock().unwrap().push(item.clone());
            Ok(())
        }

        async fn update_content(&self, item: &Item) -> Result<(), CoreError> {
            self.calls.lock().unwrap().push(Call::Update(item.clone()));
            self.check(Op::Update)?;
            let mut items = self.items.lock().unwrap();
            if let Some(slot) = items.iter_mut().find(|i| i.id == item.id) {
                *slot = item.clone();
            }
            Ok(())
        }

        async fn delete_content(&self, item: &Item) -> Result<(), CoreError> {
            self.calls.lock().unwrap().push(Call::Delete(item.id.clone()));
            self.check(Op::Delete)?;
            self.items.lock().unwrap().retain(|i| i.id != item.id);
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum View {
        Content(ItemId),
        Dashboard,
    }

    #[derive(Default)]
    struct RecordingNavigator {
        visits: Mutex<Vec<View>>,
    }

    impl RecordingNavigator {
        fn visits(&self) -> Vec<View> {
            self.visits.lock().unwrap().clone()
        }

        fn dashboard_visits(&self) -> usize {
            self.visits()
                .iter()
                .filter(|v| **v == View::Dashboard)
                .count()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate_content(&self, item: &Item) {
            self.visits
                .lock()
                .unwrap()
                .push(View::Content(item.id.clone()));
        }

        fn navigate_dashboard(&self) {
            self.visits.lock().unwrap().push(View::Dashboard);
        }
    }

    // ── Helpers ──────────────────────────────────────────────────

    fn date(s: &str) -> Option<chrono::NaiveDate> {
        Some(s.parse().unwrap())
    }

    fn rice() -> Item {
        Item {
            id: ItemId::from("1"),
            name: "Rice".into(),
            quantity: 2,
            category: Category::Pantry,
            receive_date: date("2024-05-01"),
            has_expiration: false,
            expiration_date: None,
        }
    }

    fn milk() -> Item {
        Item {
            id: ItemId::from("2"),
            name: "Milk".into(),
            quantity: 1,
            category: Category::Dairy,
            receive_date: date("2024-05-02"),
            has_expiration: true,
            expiration_date: date("2024-05-09"),
        }
    }

    fn beans() -> Item {
        Item {
            name: "Beans".into(),
            quantity: 5,
            category: Category::Pantry,
            receive_date: date("2024-06-01"),
            ..Item::default()
        }
    }

    fn setup(items: Vec<Item>) -> (ContentFacade, Arc<FakeRepository>, Arc<RecordingNavigator>) {
        let repo = FakeRepository::with_items(items);
        let nav = Arc::new(RecordingNavigator::default());
        let facade = ContentFacade::new(repo.clone(), nav.clone());
        (facade, repo, nav)
    }

    /// Facade with the backend list already loaded and call log cleared.
    async fn loaded(
        items: Vec<Item>,
    ) -> (ContentFacade, Arc<FakeRepository>, Arc<RecordingNavigator>) {
        let (facade, repo, nav) = setup(items);
        facade.load_content().await.unwrap();
        repo.clear_calls();
        (facade, repo, nav)
    }

    fn names(list: &ContentList) -> Vec<String> {
        list.iter().map(|i| i.name.clone()).collect()
    }

    // ── Loading ──────────────────────────────────────────────────

    #[tokio::test]
    async fn load_replaces_list() {
        let (facade, repo, _) = setup(vec![rice(), milk()]);
        assert!(facade.current_list().is_empty());

        facade.load_content().await.unwrap();

        assert_eq!(names(&facade.current_list()), ["Rice", "Milk"]);
        assert_eq!(repo.calls(), [Call::Load]);
    }

    #[tokio::test]
    async fn failed_load_keeps_list_and_reports_error() {
        let (facade, repo, _) = loaded(vec![rice()]).await;
        repo.set_items(vec![rice(), milk()]);
        repo.fail(Op::Load);

        let result = facade.load_content().await;

        assert!(matches!(result, Err(CoreError::Api { .. })));
        assert_eq!(names(&facade.current_list()), ["Rice"]);
        assert_eq!(facade.load_progress().borrow().in_flight, 0);
    }

    #[tokio::test]
    async fn load_progress_counts_settled_loads() {
        let (facade, repo, _) = setup(vec![rice()]);
        facade.load_content().await.unwrap();
        repo.fail(Op::Load);
        facade.load_content().await.unwrap_err();

        let progress = *facade.load_progress().borrow();
        assert_eq!(
            progress,
            LoadProgress {
                in_flight: 0,
                completed: 2,
                last_failed: true,
            }
        );
    }

    // ── Add ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn add_assigns_fresh_id_then_reloads() {
        let (facade, repo, nav) = loaded(vec![rice()]).await;

        let added = facade.add_content(beans()).await.unwrap();

        let calls = repo.calls();
        assert_eq!(calls.len(), 2);
        let Call::Create(sent) = &calls[0] else {
            panic!("expected create first, got {calls:?}");
        };
        assert!(!sent.id.is_empty());
        assert_eq!(sent.id, added.id);
        assert_eq!(calls[1], Call::Load);
        assert_eq!(names(&facade.current_list()), ["Rice", "Beans"]);
        assert_eq!(nav.visits(), [View::Dashboard]);
    }

    #[tokio::test]
    async fn add_overwrites_existing_id() {
        let (facade, repo, _) = loaded(Vec::new()).await;
        let stale = Item {
            id: ItemId::from("client-made-this-up"),
            ..beans()
        };

        facade.add_content(stale).await.unwrap();

        let Call::Create(sent) = &repo.calls()[0] else {
            panic!("expected create");
        };
        assert_ne!(sent.id, ItemId::from("client-made-this-up"));
        assert!(!sent.id.is_empty());
    }

    #[tokio::test]
    async fn failed_add_skips_reload_and_navigation() {
        let (facade, repo, nav) = loaded(vec![rice()]).await;
        repo.fail(Op::Create);

        let result = facade.add_content(beans()).await;

        assert!(result.is_err());
        assert_eq!(repo.loads(), 0);
        assert_eq!(names(&facade.current_list()), ["Rice"]);
        assert!(nav.visits().is_empty());
    }

    // ── Update ───────────────────────────────────────────────────

    #[tokio::test]
    async fn update_clears_expiration_when_flag_is_off() {
        let (facade, repo, _) = loaded(vec![rice()]).await;
        let edited = Item {
            has_expiration: false,
            expiration_date: date("2025-01-01"),
            ..rice()
        };

        let sent = facade.update_content(edited).await.unwrap();

        assert!(sent.expiration_date.is_none());
        let Call::Update(sent) = &repo.calls()[0] else {
            panic!("expected update");
        };
        assert!(sent.expiration_date.is_none());
    }

    #[tokio::test]
    async fn update_keeps_expiration_when_flag_is_on() {
        let (facade, repo, _) = loaded(vec![milk()]).await;

        facade.update_content(milk()).await.unwrap();

        assert_eq!(repo.calls()[0], Call::Update(milk()));
    }

    #[tokio::test]
    async fn update_known_id_reloads_and_returns_to_dashboard() {
        let (facade, repo, nav) = loaded(vec![rice()]).await;
        let edited = Item {
            quantity: 7,
            ..rice()
        };

        facade.update_content(edited.clone()).await.unwrap();

        assert_eq!(repo.calls(), [Call::Update(edited), Call::Load]);
        assert_eq!(facade.current_list()[0].quantity, 7);
        assert_eq!(nav.visits(), [View::Dashboard]);
    }

    #[tokio::test]
    async fn update_unknown_id_creates_instead() {
        let (facade, repo, _) = loaded(vec![rice()]).await;

        facade.update_content(milk()).await.unwrap();

        let calls = repo.calls();
        let creates = calls
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count();
        let updates = calls
            .iter()
            .filter(|c| matches!(c, Call::Update(_)))
            .count();
        assert_eq!(creates, 1);
        assert_eq!(updates, 0);
    }

    #[tokio::test]
    async fn failed_update_leaves_store_alone() {
        let (facade, repo, nav) = loaded(vec![rice()]).await;
        facade.select_content(Some(Arc::new(rice())));
        repo.fail(Op::Update);

        let result = facade
            .update_content(Item {
                quantity: 9,
                ..rice()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(repo.loads(), 0);
        assert_eq!(facade.current_list()[0].quantity, 2);
        assert!(facade.current_selection().is_some());
        assert!(nav.visits().is_empty());
    }

    // ── Delete ───────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_unknown_id_is_a_no_op() {
        let (facade, repo, nav) = loaded(vec![rice()]).await;
        let list_updates = facade.content_list();

        let deleted = facade.delete_content(&milk()).await.unwrap();

        assert!(!deleted);
        assert!(repo.calls().is_empty());
        assert_eq!(names(&facade.current_list()), ["Rice"]);
        assert!(nav.visits().is_empty());
        // No new list was published.
        assert!(Arc::ptr_eq(list_updates.current(), &list_updates.latest()));
    }

    #[tokio::test]
    async fn deleting_selected_item_returns_to_dashboard_once() {
        let (facade, repo, nav) = loaded(vec![rice(), milk()]).await;
        facade.select_content(Some(Arc::new(rice())));

        let deleted = facade.delete_content(&rice()).await.unwrap();

        assert!(deleted);
        assert_eq!(repo.calls(), [Call::Delete(ItemId::from("1")), Call::Load]);
        assert_eq!(names(&facade.current_list()), ["Milk"]);
        assert_eq!(nav.dashboard_visits(), 1);
        assert!(facade.current_selection().is_none());
    }

    #[tokio::test]
    async fn deleting_other_item_keeps_selection() {
        let (facade, _, nav) = loaded(vec![rice(), milk()]).await;
        facade.select_content(Some(Arc::new(rice())));

        facade.delete_content(&milk()).await.unwrap();

        assert_eq!(nav.dashboard_visits(), 0);
        assert_eq!(facade.current_selection().unwrap().id, ItemId::from("1"));
        assert_eq!(names(&facade.current_list()), ["Rice"]);
    }

    #[tokio::test]
    async fn failed_delete_skips_reload() {
        let (facade, repo, nav) = loaded(vec![rice()]).await;
        repo.fail(Op::Delete);

        assert!(facade.delete_content(&rice()).await.is_err());
        assert_eq!(repo.loads(), 0);
        assert_eq!(names(&facade.current_list()), ["Rice"]);
        assert!(nav.visits().is_empty());
    }

    // ── Selection ────────────────────────────────────────────────

    #[tokio::test]
    async fn select_by_id_emits_matching_item() {
        let (facade, _, _) = setup(vec![rice()]);
        let mut selection = facade.selected_content();

        let selected = facade
            .select_content_by_id(Some(&ItemId::from("1")))
            .await
            .unwrap();

        assert_eq!(selected.unwrap().name, "Rice");
        assert_eq!(selection.changed().await.unwrap().unwrap().name, "Rice");
    }

    #[tokio::test]
    async fn select_by_unknown_id_clears_selection() {
        let (facade, _, _) = loaded(vec![rice()]).await;
        facade.select_content(Some(Arc::new(rice())));

        let selected = facade
            .select_content_by_id(Some(&ItemId::from("404")))
            .await
            .unwrap();

        assert!(selected.is_none());
        assert!(facade.current_selection().is_none());
    }

    #[tokio::test]
    async fn select_by_none_clears_without_loading() {
        let (facade, repo, _) = loaded(vec![rice()]).await;
        facade.select_content(Some(Arc::new(rice())));

        assert!(facade.select_content_by_id(None).await.unwrap().is_none());
        assert!(facade.current_selection().is_none());
        assert_eq!(repo.loads(), 0);
    }

    #[tokio::test]
    async fn select_by_id_loads_when_idle() {
        let (facade, repo, _) = loaded(vec![rice()]).await;
        repo.set_items(vec![rice(), milk()]);

        let selected = facade
            .select_content_by_id(Some(&ItemId::from("2")))
            .await
            .unwrap();

        assert_eq!(selected.unwrap().name, "Milk");
        assert_eq!(repo.loads(), 1);
    }

    #[tokio::test]
    async fn select_by_id_waits_for_in_flight_load() {
        let (facade, repo, _) = loaded(vec![rice()]).await;
        repo.set_items(vec![rice(), milk()]);
        let gate = repo.gate_next_load();

        let reload = facade.spawn_load();
        let select = {
            let facade = facade.clone();
            tokio::spawn(async move {
                facade
                    .select_content_by_id(Some(&ItemId::from("2")))
                    .await
            })
        };

        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        // The selector piggybacks on the in-flight reload.
        assert_eq!(repo.loads(), 1);
        assert!(facade.current_selection().is_none());

        gate.notify_one();
        reload.await.unwrap().unwrap();
        let selected = select.await.unwrap().unwrap();

        assert_eq!(selected.unwrap().name, "Milk");
        assert_eq!(repo.loads(), 1);
    }

    #[tokio::test]
    async fn select_by_id_waits_for_every_earlier_load() {
        let (facade, repo, _) = loaded(vec![rice()]).await;
        let first = repo.script_load(vec![rice()]);
        let second = repo.script_load(vec![rice(), milk()]);

        let a = facade.spawn_load();
        let b = facade.spawn_load();
        let select = {
            let facade = facade.clone();
            tokio::spawn(async move {
                facade
                    .select_content_by_id(Some(&ItemId::from("2")))
                    .await
            })
        };
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert_eq!(repo.loads(), 2);

        first.notify_one();
        a.await.unwrap().unwrap();
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        // One of the two loads is still out; the lookup must not run yet.
        assert!(!select.is_finished());
        assert!(facade.current_selection().is_none());

        second.notify_one();
        b.await.unwrap().unwrap();
        let selected = select.await.unwrap().unwrap();

        assert_eq!(selected.unwrap().name, "Milk");
        assert_eq!(repo.loads(), 2);
    }

    #[tokio::test]
    async fn select_by_id_reloads_after_awaited_load_fails() {
        let (facade, repo, _) = loaded(vec![rice()]).await;
        let gate = repo.gate_next_load();
        repo.fail(Op::Load);

        let reload = facade.spawn_load();
        let select = {
            let facade = facade.clone();
            tokio::spawn(async move {
                facade
                    .select_content_by_id(Some(&ItemId::from("1")))
                    .await
            })
        };
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        gate.notify_one();
        reload.await.unwrap().unwrap_err();
        let result = select.await.unwrap();

        // The failure resurfaces from a fresh attempt rather than a stale lookup.
        assert!(matches!(result, Err(CoreError::Api { .. })));
        assert_eq!(repo.loads(), 2);
    }

    #[tokio::test]
    async fn overlapping_loads_last_to_settle_wins() {
        let (facade, repo, _) = loaded(Vec::new()).await;
        let older = repo.script_load(vec![rice()]);
        let newer = repo.script_load(vec![rice(), milk()]);

        let a = facade.spawn_load();
        let b = facade.spawn_load();
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        newer.notify_one();
        b.await.unwrap().unwrap();
        assert_eq!(names(&facade.current_list()), ["Rice", "Milk"]);

        older.notify_one();
        a.await.unwrap().unwrap();
        assert_eq!(names(&facade.current_list()), ["Rice"]);
        assert_eq!(facade.load_progress().borrow().in_flight, 0);
    }

    #[tokio::test]
    async fn wait_for_content_shares_in_flight_load() {
        let repo = FakeRepository::with_items(vec![rice(), milk()]);
        let nav = Arc::new(RecordingNavigator::default());
        let facade = ContentFacade::spawn(repo.clone(), nav);

        facade.wait_for_content().await.unwrap();

        assert_eq!(names(&facade.current_list()), ["Rice", "Milk"]);
        assert_eq!(repo.loads(), 1);
    }

    #[tokio::test]
    async fn spawn_loads_at_construction() {
        let repo = FakeRepository::with_items(vec![rice()]);
        let nav = Arc::new(RecordingNavigator::default());
        let facade = ContentFacade::spawn(repo.clone(), nav);

        let selected = facade
            .select_content_by_id(Some(&ItemId::from("1")))
            .await
            .unwrap();

        assert_eq!(selected.unwrap().name, "Rice");
        assert_eq!(repo.loads(), 1);
    }

    #[tokio::test]
    async fn select_content_skips_repository() {
        let (facade, repo, nav) = setup(vec![rice()]);

        facade.select_content(Some(Arc::new(milk())));

        assert_eq!(facade.current_selection().unwrap().name, "Milk");
        assert!(repo.calls().is_empty());
        assert!(nav.visits().is_empty());
    }

    // ── Navigation ───────────────────────────────────────────────

    #[tokio::test]
    async fn navigation_delegates_without_touching_store() {
        let (facade, repo, nav) = setup(vec![rice()]);

        facade.go_to_content(&rice());
        facade.reset_content();

        assert_eq!(
            nav.visits(),
            [View::Content(ItemId::from("1")), View::Dashboard]
        );
        assert!(facade.current_selection().is_none());
        assert!(repo.calls().is_empty());
    }

    // ── Observation ──────────────────────────────────────────────

    #[tokio::test]
    async fn late_subscribers_replay_latest_list() {
        let (facade, _, _) = loaded(vec![rice(), milk()]).await;

        let sub = facade.content_list();

        assert_eq!(names(sub.current()), ["Rice", "Milk"]);
    }
}
