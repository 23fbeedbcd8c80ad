use hub3_types::{make_id, ChainMsg, ChainTx, Coin, Delegation};
use serde::Deserialize;

use super::err;
use crate::{amount, Batch, DecodeError};

#[derive(Deserialize)]
pub(super) struct MsgDelegate {
    pub(super) delegator_address: String,
    pub(super) validator_address: String,
    pub(super) amount: Coin,
}

/// Emits one Delegation with a positive amount.
pub fn decode(tx: &ChainTx, index: usize, msg: &ChainMsg, batch: &mut Batch) -> Result<(), DecodeError> {
    let payload: MsgDelegate =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;

    batch.delegations.push(Delegation {
        id: make_id(&tx.hash, index, ""),
        tx_hash: tx.hash.clone(),
        delegator: payload.delegator_address,
        validator: payload.validator_address,
        amount: amount::coin_amount(&payload.amount)?,
        created_at: tx.timestamp,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hub3_types::ChainLog;
    use serde_json::json;

    #[test]
    fn emits_positive_delegation() {
        let tx = ChainTx {
            hash: "H".to_string(),
            height: 1,
            timestamp: Utc::now(),
            gas_used: 1,
            gas_wanted: 1,
            logs: vec![ChainLog { success: true }],
            events: vec![],
            fee: vec![],
            messages: vec![],
        };
        let msg = ChainMsg {
            msg_type: "cosmos-sdk/MsgDelegate".to_string(),
            payload: json!({
                "delegator_address": "D",
                "validator_address": "V",
                "amount": {"denom": "uatom", "amount": "10000000"},
            }),
        };
        let mut batch = Batch::new();
        decode(&tx, 0, &msg, &mut batch).unwrap();
        let row = &batch.delegations[0];
        assert_eq!(row.delegator, "D");
        assert_eq!(row.validator, "V");
        assert_eq!(row.amount, rust_decimal::Decimal::from(10u64));
    }
}
