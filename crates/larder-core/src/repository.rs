// ── Item repository port ──
//
// Remote CRUD persistence for items. The facade is the only caller.
// `HttpItemRepository` is the production adapter over `larder_api`.

use async_trait::async_trait;
use tracing::debug;

use larder_api::{ItemRecord, ItemsClient};

use crate::config::BackendConfig;
use crate::error::CoreError;
use crate::model::Item;

/// Remote persistence for inventory items.
///
/// Each method is a single round-trip; implementations must not retry.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch the full item collection.
    async fn load_content(&self) -> Result<Vec<Item>, CoreError>;

    /// Persist a new item. The id is already assigned.
    async fn create_content(&self, item: &Item) -> Result<(), CoreError>;

    /// Replace an existing item.
    async fn update_content(&self, item: &Item) -> Result<(), CoreError>;

    /// Remove an item.
    async fn delete_content(&self, item: &Item) -> Result<(), CoreError>;
}

// ── HTTP adapter ─────────────────────────────────────────────────────

/// [`ItemRepository`] backed by the item REST backend.
pub struct HttpItemRepository {
    client: ItemsClient,
}

impl HttpItemRepository {
    pub fn new(client: ItemsClient) -> Self {
        Self { client }
    }

    /// Build the HTTP client from a [`BackendConfig`].
    pub fn connect(config: &BackendConfig) -> Result<Self, CoreError> {
        let client = ItemsClient::new(config.url.as_str(), &config.transport())?;
        debug!(url = %client.base_url(), "item repository ready");
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ItemRepository for HttpItemRepository {
    async fn load_content(&self) -> Result<Vec<Item>, CoreError> {
        let records = self.client.list_items().await?;
        Ok(records.into_iter().map(Item::from).collect())
    }

    async fn create_content(&self, item: &Item) -> Result<(), CoreError> {
        Ok(self.client.create_item(&ItemRecord::from(item)).await?)
    }

    async fn update_content(&self, item: &Item) -> Result<(), CoreError> {
        self.client
            .update_item(&ItemRecord::from(item))
            .await
            .map_err(|e| CoreError::for_item(e, item.id.as_str()))
    }

    async fn delete_content(&self, item: &Item) -> Result<(), CoreError> {
        self.client
            .delete_item(item.id.as_str())
            .await
            .map_err(|e| CoreError::for_item(e, item.id.as_str()))
    }
}
