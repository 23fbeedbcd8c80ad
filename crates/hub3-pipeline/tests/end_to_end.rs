//! Exercises the fetcher/decoder/saver handoff end to end against a mock
//! `ChainClient` and the in-memory `Store`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hub3_chain_client::{ChainClient, ChainError, TxsFilter};
use hub3_pipeline::{Config, Supervisor};
use hub3_store::MemoryStore;
use hub3_types::{ChainBlock, ChainLog, ChainMsg, ChainTx, ChainTxsPage, Parser};
use serde_json::json;

struct MockChain {
    tip: ChainBlock,
    blocks: HashMap<u64, ChainBlock>,
    txs: HashMap<(u64, u64), ChainTxsPage>,
}

#[async_trait]
impl ChainClient for MockChain {
    async fn latest_block(&self) -> Result<ChainBlock, ChainError> {
        Ok(self.tip.clone())
    }

    async fn block_at(&self, height: u64) -> Result<ChainBlock, ChainError> {
        self.blocks
            .get(&height)
            .cloned()
            .ok_or_else(|| ChainError::Status { endpoint: format!("blocks/{height}"), status: 404 })
    }

    async fn txs_at(&self, filter: TxsFilter) -> Result<ChainTxsPage, ChainError> {
        Ok(self
            .txs
            .get(&(filter.height, filter.page))
            .cloned()
            .unwrap_or(ChainTxsPage { txs: vec![] }))
    }
}

fn one_send_tx(height: u64) -> ChainTx {
    ChainTx {
        hash: format!("H{height}"),
        height,
        timestamp: Utc::now(),
        gas_used: 1,
        gas_wanted: 1,
        logs: vec![ChainLog { success: true }],
        events: vec![],
        fee: vec![hub3_types::Coin { denom: hub3_types::DENOM.to_string(), amount: 5_000.into() }],
        messages: vec![ChainMsg {
            msg_type: "cosmos-sdk/MsgSend".to_string(),
            payload: json!({"from_address": "A", "to_address": "B", "amount": []}),
        }],
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn a_single_batch_round_persists_block_transaction_and_transfer() {
    let block = ChainBlock {
        height: 1,
        hash: "blockhash".to_string(),
        proposer: "P".to_string(),
        time: Utc::now(),
        num_txs: 1,
    };
    let chain = Arc::new(MockChain {
        tip: block.clone(),
        blocks: HashMap::from([(1, block)]),
        txs: HashMap::from([((1, 1), ChainTxsPage { txs: vec![one_send_tx(1)] })]),
    });

    let store = Arc::new(MemoryStore::new());
    store.seed_parser(Parser { id: 1, title: Parser::TITLE.to_string(), height: 0 }).await;

    let mut config = Config::default();
    config.parser.batch = 1;
    config.parser.fetchers = 2;

    let supervisor = Supervisor::new(config, chain, store.clone());
    let handle = tokio::spawn(supervisor.run());

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while store.block_count().await == 0 {
        if tokio::time::Instant::now() >= deadline {
            panic!("batch did not persist within the deadline");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(store.transaction_count().await, 1);
    assert_eq!(store.transfer_count().await, 1);

    handle.abort();
}
