//! In-memory `Store` used by the pipeline's integration tests and by
//! `bin/hub3-indexer` when no real backend is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use hub3_types::{
    Block, Delegation, DelegatorReward, Parser, Proposal, ProposalDeposit, ProposalVote,
    Transaction, Transfer, ValidatorReward,
};
use tokio::sync::Mutex;

use crate::{Store, StoreError};

#[derive(Debug, Default)]
struct Inner {
    parsers: HashMap<String, Parser>,
    blocks: HashMap<u64, Block>,
    transactions: HashMap<String, Transaction>,
    transfers: HashMap<String, Transfer>,
    delegations: HashMap<String, Delegation>,
    delegator_rewards: HashMap<String, DelegatorReward>,
    validator_rewards: HashMap<String, ValidatorReward>,
    proposals: HashMap<String, Proposal>,
    proposal_deposits: HashMap<String, ProposalDeposit>,
    proposal_votes: HashMap<String, ProposalVote>,
}

/// Guarded by a single `tokio::sync::Mutex`: the saver is the only writer and
/// never holds the lock across an await other than the insert itself, so
/// contention is a non-issue in practice.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the parser cursor, for tests that need a non-empty starting
    /// point without going through `update_parser`.
    pub async fn seed_parser(&self, parser: Parser) {
        self.inner.lock().await.parsers.insert(parser.title.clone(), parser);
    }

    pub async fn block_count(&self) -> usize {
        self.inner.lock().await.blocks.len()
    }

    pub async fn transaction_count(&self) -> usize {
        self.inner.lock().await.transactions.len()
    }

    pub async fn transfer_count(&self) -> usize {
        self.inner.lock().await.transfers.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_parser(&self, title: &str) -> Result<Option<Parser>, StoreError> {
        Ok(self.inner.lock().await.parsers.get(title).cloned())
    }

    async fn update_parser(&self, parser: Parser) -> Result<(), StoreError> {
        self.inner.lock().await.parsers.insert(parser.title.clone(), parser);
        Ok(())
    }

    async fn create_blocks(&self, rows: Vec<Block>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.blocks.insert(row.height, row);
        }
        Ok(())
    }

    async fn create_transactions(&self, rows: Vec<Transaction>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.transactions.insert(row.hash.clone(), row);
        }
        Ok(())
    }

    async fn create_transfers(&self, rows: Vec<Transfer>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.transfers.insert(row.id.clone(), row);
        }
        Ok(())
    }

    async fn create_delegations(&self, rows: Vec<Delegation>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.delegations.insert(row.id.clone(), row);
        }
        Ok(())
    }

    async fn create_delegator_rewards(&self, rows: Vec<DelegatorReward>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.delegator_rewards.insert(row.id.clone(), row);
        }
        Ok(())
    }

    async fn create_validator_rewards(&self, rows: Vec<ValidatorReward>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.validator_rewards.insert(row.id.clone(), row);
        }
        Ok(())
    }

    async fn create_proposals(&self, rows: Vec<Proposal>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.proposals.insert(row.id.clone(), row);
        }
        Ok(())
    }

    async fn create_proposal_deposits(&self, rows: Vec<ProposalDeposit>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.proposal_deposits.insert(row.id.clone(), row);
        }
        Ok(())
    }

    async fn create_proposal_votes(&self, rows: Vec<ProposalVote>) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        for row in rows {
            inner.proposal_votes.insert(row.id.clone(), row);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn block(height: u64) -> Block {
        Block { height, hash: format!("hash-{height}"), proposer: "P".to_string(), created_at: Utc::now() }
    }

    #[tokio::test]
    async fn replaying_the_same_rows_does_not_duplicate() {
        let store = MemoryStore::new();
        store.create_blocks(vec![block(1), block(2)]).await.unwrap();
        store.create_blocks(vec![block(2), block(3)]).await.unwrap();
        assert_eq!(store.block_count().await, 3);
    }

    #[tokio::test]
    async fn unseeded_parser_is_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.get_parser("hub3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_parser_is_read_back() {
        let store = MemoryStore::new();
        store.update_parser(Parser { id: 1, title: Parser::TITLE.to_string(), height: 42 }).await.unwrap();
        let parser = store.get_parser(Parser::TITLE).await.unwrap().unwrap();
        assert_eq!(parser.height, 42);
    }
}
