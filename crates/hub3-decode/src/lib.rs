//! Pure decoding: transforms chain-native transactions into the normalized
//! rows the saver persists.
//!
//! Nothing in this crate performs I/O. `decode_tx` is the single entry point
//! the pipeline's decoder task calls per fetched transaction.

pub mod amount;
pub mod batch;
pub mod messages;

pub use batch::Batch;

use hub3_types::ChainTx;
use thiserror::Error;

/// A structural failure the decoder cannot recover from. The pipeline wraps
/// this with `(height, msg_type)` context and aborts the in-flight batch.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("unknown demon (currency): {0}")]
    UnknownDenom(String),
    #[error("malformed amount: {0}")]
    Malformed(String),
    #[error("transaction has an empty hash")]
    EmptyTxHash,
    #[error("validator {validator} not present in withdraw_rewards events")]
    MissingValidatorInEvents { validator: String },
    #[error("missing attribute {attribute} on event {event}")]
    MissingEventAttribute { event: String, attribute: String },
    #[error("failed to decode {msg_type} payload: {reason}")]
    Payload { msg_type: String, reason: String },
    /// Wraps any of the above with the message type that was being decoded
    /// when it happened, attached once at the point `decode_tx` dispatches
    /// into a message decoder — the individual decoders never see or
    /// construct this themselves.
    #[error("{msg_type}: {source}")]
    InMessage {
        msg_type: String,
        #[source]
        source: Box<DecodeError>,
    },
}

/// Decodes one transaction into `batch`.
///
/// Appends exactly one Transaction row. A transaction is successful iff it
/// has at least one log entry and every log entry succeeded; unsuccessful
/// transactions contribute only their Transaction row, no message is
/// inspected. An empty tx hash is always fatal, successful or not.
pub fn decode_tx(tx: &ChainTx, batch: &mut Batch) -> Result<(), DecodeError> {
    if tx.hash.is_empty() {
        return Err(DecodeError::EmptyTxHash);
    }

    let status = !tx.logs.is_empty() && tx.logs.iter().all(|log| log.success);
    let fee = amount::sum_coins(&tx.fee)?;

    batch.transactions.push(hub3_types::Transaction {
        hash: tx.hash.clone(),
        status,
        height: tx.height,
        message_count: tx.messages.len() as u64,
        fee,
        gas_used: tx.gas_used,
        gas_wanted: tx.gas_wanted,
        created_at: tx.timestamp,
    });

    if !status {
        return Ok(());
    }

    for (index, msg) in tx.messages.iter().enumerate() {
        messages::decode_message(tx, index, msg, batch).map_err(|cause| DecodeError::InMessage {
            msg_type: msg.msg_type.clone(),
            source: Box::new(cause),
        })?;
    }
    Ok(())
}
