//! The external music catalog, as seen by the proxy.
//!
//! Handlers only ever talk to [`CatalogClient`]; the production implementation
//! lives in [`ytmusic`]. Records are returned raw (`serde_json::Value`) and
//! reshaped later by [`crate::normalize`].

pub mod parser;
pub mod ytmusic;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Failures raised by a catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The client could not be built at startup.
    #[error("YTMusic not initialized")]
    NotInitialized,

    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Transport failure talking to the upstream catalog.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Upstream body was not valid JSON.
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Which kind of record a search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Songs,
    Playlists,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Songs => "songs",
            SearchKind::Playlists => "playlists",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability wrapping the upstream catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog, returning raw records in upstream relevance order.
    async fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<Value>>;

    /// Fetch a playlist with at most `limit` tracks. `None` when the playlist
    /// does not exist upstream.
    async fn get_playlist(&self, playlist_id: &str, limit: usize) -> Result<Option<Value>>;
}

/// Process-wide catalog state, fixed at startup.
#[derive(Clone)]
pub enum CatalogHandle {
    Ready(Arc<dyn CatalogClient>),
    Unavailable { reason: Arc<str> },
}

impl CatalogHandle {
    pub fn ready<C>(client: C) -> Self
    where
        C: CatalogClient + 'static,
    {
        CatalogHandle::Ready(Arc::new(client))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        CatalogHandle::Unavailable {
            reason: Arc::from(reason.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogHandle::Ready(_))
    }

    /// The client, or [`CatalogError::NotInitialized`] when startup failed.
    pub fn client(&self) -> Result<&dyn CatalogClient> {
        match self {
            CatalogHandle::Ready(client) => Ok(client.as_ref()),
            CatalogHandle::Unavailable { reason } => {
                debug!("Catalog unavailable: {}", reason);
                Err(CatalogError::NotInitialized)
            }
        }
    }
}
