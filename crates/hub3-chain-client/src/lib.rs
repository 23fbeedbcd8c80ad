//! Typed adapter over the upstream hub3 node's REST endpoints.
//!
//! The rest of the pipeline never sees a JSON shape; it only sees the
//! [`ChainClient`] trait and the domain values in `hub3_types::chain`.

pub mod http;
pub mod wire;

use async_trait::async_trait;
use hub3_types::chain::{ChainBlock, ChainTxsPage};
use thiserror::Error;

pub use http::HttpChainClient;

/// Errors a [`ChainClient`] can return.
///
/// `Network` covers anything transient (connection refused, timeout, 5xx) —
/// callers are expected to retry on it. `Decode` means the response body
/// could not be parsed into the expected shape; it is a structural problem
/// upstream is never going to self-heal from, so callers should treat it as
/// fatal rather than retrying forever.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("network error calling {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} calling {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Paging parameters for `txs_at`.
#[derive(Debug, Clone, Copy)]
pub struct TxsFilter {
    pub height: u64,
    pub page: u64,
    pub limit: u64,
}

/// Stateless, clone-cheap adapter over the upstream node. Implementors must
/// be safe to call concurrently from multiple fetcher tasks.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The node's current tip.
    async fn latest_block(&self) -> Result<ChainBlock, ChainError>;

    /// Block metadata + header at a given height.
    async fn block_at(&self, height: u64) -> Result<ChainBlock, ChainError>;

    /// One page of transactions at a given height.
    async fn txs_at(&self, filter: TxsFilter) -> Result<ChainTxsPage, ChainError>;
}
