//! Domain values returned by a `ChainClient`. These hide the upstream node's
//! wire JSON shapes; the decoder only ever sees these types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Block metadata + header, as returned by `latest_block` / `block_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBlock {
    pub height: u64,
    pub hash: String,
    pub proposer: String,
    pub time: DateTime<Utc>,
    pub num_txs: u64,
}

/// One page of transactions at a given height.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainTxsPage {
    pub txs: Vec<ChainTx>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainTx {
    pub hash: String,
    pub height: u64,
    pub timestamp: DateTime<Utc>,
    pub gas_used: i64,
    pub gas_wanted: i64,
    pub logs: Vec<ChainLog>,
    pub events: Vec<ChainEvent>,
    pub fee: Vec<Coin>,
    pub messages: Vec<ChainMsg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLog {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainEvent {
    pub kind: String,
    pub attributes: Vec<ChainAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainAttribute {
    pub key: String,
    pub value: String,
}

/// A message embedded in a transaction, still in opaque form: `msg_type` is
/// the exact wire discriminator (e.g. `cosmos-sdk/MsgSend`), `payload` is its
/// undecoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainMsg {
    pub msg_type: String,
    pub payload: serde_json::Value,
}

/// A raw, not-yet-divided coin amount as it appears on the wire (e.g.
/// `amount: "5000"`, `denom: "uatom"`). Decoders apply `PRECISION` division
/// when turning this into a persisted [`Decimal`](rust_decimal::Decimal).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Decimal,
}
