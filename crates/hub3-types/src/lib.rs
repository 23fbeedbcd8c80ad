//! Domain types shared by every stage of the hub3 indexer pipeline.
//!
//! These are the normalized rows the decoder produces and the saver persists.
//! Nothing in this crate talks to the network or a database; it is pure data.

pub mod chain;
pub mod denom;
pub mod entities;
pub mod id;

pub use chain::{ChainAttribute, ChainBlock, ChainEvent, ChainLog, ChainMsg, ChainTxsPage, Coin, ChainTx};
pub use denom::{DENOM, PRECISION};
pub use entities::*;
pub use id::make_id;
pub use rust_decimal::Decimal;
