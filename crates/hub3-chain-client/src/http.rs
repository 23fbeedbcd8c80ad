use async_trait::async_trait;
use hub3_types::chain::{ChainBlock, ChainTxsPage};
use reqwest::StatusCode;
use tracing::instrument;
use url::Url;

use crate::{wire::BlockResponse, wire::TxsResponse, ChainClient, ChainError, TxsFilter};

/// Production [`ChainClient`]: a thin REST adapter over the hub3 node.
///
/// Holds only a `reqwest::Client` (itself `Arc`-backed) and a base URL, so
/// cloning is cheap and every fetcher task can hold its own handle.
#[derive(Debug, Clone)]
pub struct HttpChainClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpChainClient {
    pub fn new(base_url: Url) -> Self {
        Self { http: reqwest::Client::new(), base_url }
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ChainError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ChainError::Decode { endpoint: path.to_string(), reason: e.to_string() })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ChainError::Network { endpoint: path.to_string(), source })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ChainError::Status { endpoint: path.to_string(), status: status.as_u16() });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ChainError::Network { endpoint: path.to_string(), source })
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    #[instrument(skip(self))]
    async fn latest_block(&self) -> Result<ChainBlock, ChainError> {
        let resp: BlockResponse = self.get_json("blocks/latest", &[]).await?;
        resp.try_into()
    }

    #[instrument(skip(self))]
    async fn block_at(&self, height: u64) -> Result<ChainBlock, ChainError> {
        let path = format!("blocks/{height}");
        let resp: BlockResponse = self.get_json(&path, &[]).await?;
        resp.try_into()
    }

    #[instrument(skip(self))]
    async fn txs_at(&self, filter: TxsFilter) -> Result<ChainTxsPage, ChainError> {
        let query = [
            ("height", filter.height.to_string()),
            ("page", filter.page.to_string()),
            ("limit", filter.limit.to_string()),
        ];
        let resp: TxsResponse = self.get_json("txs", &query).await?;
        resp.try_into()
    }
}
