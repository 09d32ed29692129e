// larder-core: Reactive content layer between larder-api and consumers (CLI).

pub mod config;
pub mod convert;
pub mod error;
pub mod facade;
pub mod model;
pub mod navigation;
pub mod repository;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BackendConfig, TlsVerification};
pub use error::CoreError;
pub use facade::{ContentFacade, LoadProgress};
pub use navigation::Navigator;
pub use repository::{HttpItemRepository, ItemRepository};
pub use store::{ContentList, ContentStore, Selection};
pub use stream::{ContentStream, SelectionStream, StateStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{Category, Item, ItemId};
