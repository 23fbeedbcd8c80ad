//! Messages passed between pipeline stages over `tokio::sync::mpsc` channels.

use hub3_decode::Batch;
use hub3_types::{ChainBlock, ChainTxsPage};

/// Work item consumed by the fetcher pool.
#[derive(Debug, Clone, Copy)]
pub enum FetchTask {
    Block { height: u64 },
    Txs { height: u64, page: u64 },
}

/// Result of a successfully completed `FetchTask`, handed to the decoder.
#[derive(Debug)]
pub enum FetchOutcome {
    Block { height: u64, block: ChainBlock },
    Txs { height: u64, page: u64, txs: ChainTxsPage },
}

/// Tells the decoder a new batch round is starting, and how big it is.
#[derive(Debug, Clone, Copy)]
pub struct BatchStart {
    pub start_height: u64,
    pub batch_size: u64,
}

/// A fully assembled batch, handed from decoder to saver. `new_height` is the
/// cursor value to persist once every row group lands.
#[derive(Debug)]
pub struct CompletedBatch {
    pub batch: Batch,
    pub new_height: u64,
}

/// A decode failure that aborts the in-flight batch. Carries enough context
/// for the operator to find the offending transaction.
#[derive(Debug, Clone, thiserror::Error)]
#[error("fatal decode error at height {height} decoding {msg_type}: {cause}")]
pub struct FatalDecodeError {
    pub height: u64,
    pub msg_type: String,
    pub cause: hub3_decode::DecodeError,
}
