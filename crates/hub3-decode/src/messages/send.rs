use hub3_types::{make_id, ChainMsg, ChainTx, Transfer};
use serde::Deserialize;

use super::err;
use crate::{amount, Batch, DecodeError};

#[derive(Deserialize)]
struct MsgSend {
    from_address: String,
    to_address: String,
}

/// Emits one Transfer whose amount is `tx.fee`, not the message's own
/// `amount` field.
///
/// Almost certainly a bug in the system this was modeled on, but faithfully
/// reproduced here rather than silently corrected: changing it would change
/// the persisted data model's semantics for every historical Send.
pub fn decode(tx: &ChainTx, index: usize, msg: &ChainMsg, batch: &mut Batch) -> Result<(), DecodeError> {
    let payload: MsgSend =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;
    let transfer_amount = amount::sum_coins(&tx.fee)?;

    batch.transfers.push(Transfer {
        id: make_id(&tx.hash, index, ""),
        tx_hash: tx.hash.clone(),
        from: payload.from_address,
        to: payload.to_address,
        amount: transfer_amount,
        created_at: tx.timestamp,
    });
    Ok(())
}
