//! The normalized rows the decoder appends to a batch and the saver persists.
//!
//! All entities are created exclusively by the decoder, are immutable once
//! appended, and are never deleted by the core.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Height, unique per block.
    pub height: u64,
    pub hash: String,
    pub proposer: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique per transaction.
    pub hash: String,
    /// `true` iff there is at least one log entry and every one succeeded.
    pub status: bool,
    pub height: u64,
    pub message_count: u64,
    pub fee: Decimal,
    pub gas_used: i64,
    pub gas_wanted: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub tx_hash: String,
    pub from: String,
    pub to: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delegation {
    pub id: String,
    pub tx_hash: String,
    pub delegator: String,
    pub validator: String,
    /// Signed: positive for Delegate / redelegate-destination, negative for
    /// Undelegate / redelegate-source.
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegatorReward {
    pub id: String,
    pub tx_hash: String,
    pub delegator: String,
    pub validator: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorReward {
    pub id: String,
    pub tx_hash: String,
    pub address: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Temporary: bound to `tx_hash`, not the on-chain proposal id. See
    /// DESIGN.md for the preserved-as-is rationale.
    pub id: String,
    pub proposer: String,
    pub init_deposit: Decimal,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalDeposit {
    pub id: String,
    pub proposal_id: String,
    pub depositor: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalVote {
    pub id: String,
    pub proposal_id: String,
    pub voter: String,
    pub option: String,
    pub created_at: DateTime<Utc>,
}

/// The persistent singleton tracking how far the indexer has progressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parser {
    pub id: u64,
    pub title: String,
    pub height: u64,
}

impl Parser {
    pub const TITLE: &'static str = "hub3";
}
