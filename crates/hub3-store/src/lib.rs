//! The persistence boundary the saver writes through.
//!
//! `Store` is deliberately thin: one upsert-style method per entity kind plus
//! the parser cursor. A real backend is an external collaborator; this crate
//! ships only the trait and an in-memory implementation for tests and local
//! runs.

pub mod memory;

use async_trait::async_trait;
use hub3_types::{
    Block, Delegation, DelegatorReward, Parser, Proposal, ProposalDeposit, ProposalVote,
    Transaction, Transfer, ValidatorReward,
};
use thiserror::Error;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Every method is idempotent upsert-on-primary-key: replaying the same rows
/// after a crash must not create duplicates or fail. This is what lets the
/// saver re-emit a batch it isn't sure was persisted without special-casing
/// the retry.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_parser(&self, title: &str) -> Result<Option<Parser>, StoreError>;
    async fn update_parser(&self, parser: Parser) -> Result<(), StoreError>;

    async fn create_blocks(&self, rows: Vec<Block>) -> Result<(), StoreError>;
    async fn create_transactions(&self, rows: Vec<Transaction>) -> Result<(), StoreError>;
    async fn create_transfers(&self, rows: Vec<Transfer>) -> Result<(), StoreError>;
    async fn create_delegations(&self, rows: Vec<Delegation>) -> Result<(), StoreError>;
    async fn create_delegator_rewards(&self, rows: Vec<DelegatorReward>) -> Result<(), StoreError>;
    async fn create_validator_rewards(&self, rows: Vec<ValidatorReward>) -> Result<(), StoreError>;
    async fn create_proposals(&self, rows: Vec<Proposal>) -> Result<(), StoreError>;
    async fn create_proposal_deposits(&self, rows: Vec<ProposalDeposit>) -> Result<(), StoreError>;
    async fn create_proposal_votes(&self, rows: Vec<ProposalVote>) -> Result<(), StoreError>;
}
