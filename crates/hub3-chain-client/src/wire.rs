//! JSON wire shapes for the hub3 REST surface, and their conversion into the
//! domain types the rest of the indexer consumes.
//!
//! Tendermint-family REST APIs routinely encode integers as JSON strings
//! (height, gas, coin amounts) to dodge JS `Number` precision loss, so the
//! numeric fields below accept either representation.

use chrono::{DateTime, Utc};
use hub3_types::chain::{ChainAttribute, ChainBlock, ChainEvent, ChainLog, ChainMsg, ChainTx, ChainTxsPage, Coin};
use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer};
use std::str::FromStr;

use crate::ChainError;

fn string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s.parse::<T>().map_err(D::Error::custom),
        StringOrNumber::Number(n) => n.to_string().parse::<T>().map_err(D::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub struct BlockResponse {
    pub block_meta: BlockMeta,
}

#[derive(Debug, Deserialize)]
pub struct BlockMeta {
    pub block_id: BlockId,
    pub header: BlockHeader,
}

#[derive(Debug, Deserialize)]
pub struct BlockId {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockHeader {
    #[serde(deserialize_with = "string_or_number")]
    pub height: u64,
    pub time: DateTime<Utc>,
    #[serde(deserialize_with = "string_or_number")]
    pub num_txs: u64,
    #[serde(default)]
    pub proposer_address: Option<String>,
}

impl TryFrom<BlockResponse> for ChainBlock {
    type Error = ChainError;

    fn try_from(resp: BlockResponse) -> Result<Self, Self::Error> {
        let header = resp.block_meta.header;
        Ok(ChainBlock {
            height: header.height,
            hash: resp.block_meta.block_id.hash,
            proposer: header.proposer_address.unwrap_or_default(),
            time: header.time,
            num_txs: header.num_txs,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TxsResponse {
    pub txs: Vec<TxWire>,
}

#[derive(Debug, Deserialize)]
pub struct TxWire {
    pub hash: String,
    #[serde(deserialize_with = "string_or_number")]
    pub height: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(deserialize_with = "string_or_number")]
    pub gas_used: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub gas_wanted: i64,
    pub logs: Vec<LogWire>,
    #[serde(default)]
    pub events: Vec<EventWire>,
    pub tx: TxEnvelopeWire,
}

#[derive(Debug, Deserialize)]
pub struct LogWire {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct EventWire {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<AttributeWire>,
}

#[derive(Debug, Deserialize)]
pub struct AttributeWire {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct TxEnvelopeWire {
    pub value: TxValueWire,
}

#[derive(Debug, Deserialize)]
pub struct TxValueWire {
    pub fee: FeeWire,
    #[serde(rename = "msg")]
    pub msgs: Vec<MsgWire>,
}

#[derive(Debug, Deserialize)]
pub struct FeeWire {
    pub amount: Vec<CoinWire>,
}

#[derive(Debug, Deserialize)]
pub struct CoinWire {
    pub denom: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct MsgWire {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

impl TryFrom<TxsResponse> for ChainTxsPage {
    type Error = ChainError;

    fn try_from(resp: TxsResponse) -> Result<Self, Self::Error> {
        let txs = resp
            .txs
            .into_iter()
            .map(ChainTx::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChainTxsPage { txs })
    }
}

impl TryFrom<TxWire> for ChainTx {
    type Error = ChainError;

    fn try_from(tx: TxWire) -> Result<Self, Self::Error> {
        Ok(ChainTx {
            hash: tx.hash,
            height: tx.height,
            timestamp: tx.timestamp,
            gas_used: tx.gas_used,
            gas_wanted: tx.gas_wanted,
            logs: tx.logs.into_iter().map(|l| ChainLog { success: l.success }).collect(),
            events: tx
                .events
                .into_iter()
                .map(|e| ChainEvent {
                    kind: e.kind,
                    attributes: e
                        .attributes
                        .into_iter()
                        .map(|a| ChainAttribute { key: a.key, value: a.value })
                        .collect(),
                })
                .collect(),
            fee: tx
                .tx
                .value
                .fee
                .amount
                .into_iter()
                .map(|c| Coin { denom: c.denom, amount: c.amount })
                .collect(),
            messages: tx
                .tx
                .value
                .msgs
                .into_iter()
                .map(|m| ChainMsg { msg_type: m.kind, payload: m.value })
                .collect(),
        })
    }
}
