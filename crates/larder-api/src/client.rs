// Async HTTP client for the larder item backend.
//
// Base path: {base}/items
// Plain JSON over REST, no envelope.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::ItemRecord;

const ITEMS_PATH: &str = "items";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the item backend.
///
/// Every method performs exactly one HTTP request. Retries and caching
/// are the caller's business.
#[derive(Debug, Clone)]
pub struct ItemsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ItemsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ensure the base URL ends with a slash so relative joins append
    /// rather than replace the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::UnsupportedUrl(raw.to_owned()));
        }

        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn items_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join(ITEMS_PATH)?)
    }

    /// `{base}/items/{id}`, with the id percent-encoded as one segment.
    fn item_url(&self, id: &str) -> Result<Url, Error> {
        let mut url = self.items_url()?;
        url.path_segments_mut()
            .map_err(|()| Error::UnsupportedUrl(self.base_url.to_string()))?
            .push(id);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_empty(resp).await
    }

    async fn put<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("PUT {url}");
        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_empty(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Success bodies of write calls are ignored; the facade reloads
    /// the full collection afterwards anyway.
    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Error::Unauthorized {
                status: status.as_u16(),
            };
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.message.or(err.error))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Fetch the full item collection.
    pub async fn list_items(&self) -> Result<Vec<ItemRecord>, Error> {
        self.get(self.items_url()?).await
    }

    /// Create an item. The id is chosen by the caller.
    pub async fn create_item(&self, item: &ItemRecord) -> Result<(), Error> {
        self.post(self.items_url()?, item).await
    }

    /// Replace the stored item that has `item.id`.
    pub async fn update_item(&self, item: &ItemRecord) -> Result<(), Error> {
        self.put(self.item_url(&item.id)?, item).await
    }

    /// Delete the item with the given id.
    pub async fn delete_item(&self, id: &str) -> Result<(), Error> {
        self.delete(self.item_url(id)?).await
    }
}
