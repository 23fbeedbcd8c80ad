use hub3_types::{make_id, ChainMsg, ChainTx, Coin, Transfer};
use serde::Deserialize;

use super::err;
use crate::{amount, Batch, DecodeError};

#[derive(Deserialize)]
struct InOut {
    address: String,
    coins: Vec<Coin>,
}

#[derive(Deserialize)]
struct MsgMultiSend {
    inputs: Vec<InOut>,
    outputs: Vec<InOut>,
}

/// Emits one Transfer per input (destination left blank) and one per output
/// (source left blank), each amount the sum of that leg's coin list.
pub fn decode(tx: &ChainTx, index: usize, msg: &ChainMsg, batch: &mut Batch) -> Result<(), DecodeError> {
    let payload: MsgMultiSend =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;

    for (n, input) in payload.inputs.iter().enumerate() {
        batch.transfers.push(Transfer {
            id: make_id(&tx.hash, index, &format!(".i.{n}")),
            tx_hash: tx.hash.clone(),
            from: input.address.clone(),
            to: String::new(),
            amount: amount::sum_coins(&input.coins)?,
            created_at: tx.timestamp,
        });
    }

    for (n, output) in payload.outputs.iter().enumerate() {
        batch.transfers.push(Transfer {
            id: make_id(&tx.hash, index, &format!(".o.{n}")),
            tx_hash: tx.hash.clone(),
            from: String::new(),
            to: output.address.clone(),
            amount: amount::sum_coins(&output.coins)?,
            created_at: tx.timestamp,
        });
    }

    Ok(())
}
