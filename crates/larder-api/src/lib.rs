// larder-api: Async Rust client for the larder inventory backend.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ItemsClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::ItemRecord;
