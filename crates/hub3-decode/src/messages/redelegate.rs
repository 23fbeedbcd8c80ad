use hub3_types::{make_id, ChainMsg, ChainTx, Coin, Delegation};
use serde::Deserialize;

use super::err;
use crate::{amount, Batch, DecodeError};

#[derive(Deserialize)]
struct MsgBeginRedelegate {
    delegator_address: String,
    validator_src_address: String,
    validator_dst_address: String,
    amount: Coin,
}

/// Emits the two legs of a redelegation: a negative Delegation against the
/// source validator and a positive one against the destination validator.
/// The two amounts always sum to zero.
pub fn decode(tx: &ChainTx, index: usize, msg: &ChainMsg, batch: &mut Batch) -> Result<(), DecodeError> {
    let payload: MsgBeginRedelegate =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;
    let leg_amount = amount::coin_amount(&payload.amount)?;

    batch.delegations.push(Delegation {
        id: make_id(&tx.hash, index, ".s"),
        tx_hash: tx.hash.clone(),
        delegator: payload.delegator_address.clone(),
        validator: payload.validator_src_address,
        amount: -leg_amount,
        created_at: tx.timestamp,
    });
    batch.delegations.push(Delegation {
        id: make_id(&tx.hash, index, ".d"),
        tx_hash: tx.hash.clone(),
        delegator: payload.delegator_address,
        validator: payload.validator_dst_address,
        amount: leg_amount,
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
    fn legs_sum_to_zero() {
        let tx = ChainTx {
            hash: "H".to_string(),
            height: 400,
            timestamp: Utc::now(),
            gas_used: 1,
            gas_wanted: 1,
            logs: vec![ChainLog { success: true }],
            events: vec![],
            fee: vec![],
            messages: vec![],
        };
        let msg = ChainMsg {
            msg_type: "cosmos-sdk/MsgBeginRedelegate".to_string(),
            payload: json!({
                "delegator_address": "D",
                "validator_src_address": "SRC",
                "validator_dst_address": "DST",
                "amount": {"denom": "uatom", "amount": "10000000"},
            }),
        };
        let mut batch = Batch::new();
        decode(&tx, 2, &msg, &mut batch).unwrap();
        assert_eq!(batch.delegations.len(), 2);
        assert_eq!(batch.delegations[0].amount + batch.delegations[1].amount, rust_decimal::Decimal::ZERO);
        assert_eq!(batch.delegations[0].id, make_id("H", 2, ".s"));
        assert_eq!(batch.delegations[1].id, make_id("H", 2, ".d"));
    }
}
