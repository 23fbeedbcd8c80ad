use hub3_types::{make_id, ChainMsg, ChainTx, DelegatorReward, ValidatorReward};
use serde::Deserialize;

use super::err;
use crate::{amount, Batch, DecodeError};

#[derive(Deserialize)]
struct MsgWithdrawDelegationReward {
    delegator_address: String,
    validator_address: String,
}

#[derive(Deserialize)]
struct MsgWithdrawValidatorCommission {
    validator_address: String,
}

const EVENT_WITHDRAW_REWARDS: &str = "withdraw_rewards";
const EVENT_WITHDRAW_COMMISSION: &str = "withdraw_commission";
const ATTR_AMOUNT: &str = "amount";
const ATTR_VALIDATOR: &str = "validator";

/// Emits one DelegatorReward, with the amount read from the transaction's
/// `withdraw_rewards` events.
///
/// The message payload itself carries no amount; the chain only reports it
/// via events whose attributes alternate `(amount, validator)` pairs, one
/// pair per validator a reward was withdrawn from in this tx. The pair
/// matching `validator_address` is the one that applies to this message.
pub fn decode_delegator_reward(
    tx: &ChainTx,
    index: usize,
    msg: &ChainMsg,
    batch: &mut Batch,
) -> Result<(), DecodeError> {
    let payload: MsgWithdrawDelegationReward =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;

    let reward_amount = tx
        .events
        .iter()
        .filter(|event| event.kind == EVENT_WITHDRAW_REWARDS)
        .find_map(|event| {
            event.attributes.chunks(2).find_map(|pair| {
                let [amount_attr, validator_attr] = pair else { return None };
                if amount_attr.key == ATTR_AMOUNT
                    && validator_attr.key == ATTR_VALIDATOR
                    && validator_attr.value == payload.validator_address
                {
                    Some(amount_attr.value.clone())
                } else {
                    None
                }
            })
        })
        .ok_or_else(|| DecodeError::MissingValidatorInEvents { validator: payload.validator_address.clone() })?;

    batch.delegator_rewards.push(DelegatorReward {
        id: make_id(&tx.hash, index, ""),
        tx_hash: tx.hash.clone(),
        delegator: payload.delegator_address,
        validator: payload.validator_address,
        amount: amount::str_to_amount(&reward_amount)?,
        created_at: tx.timestamp,
    });
    Ok(())
}

/// Emits one ValidatorReward, with the amount read from the transaction's
/// single `withdraw_commission` event.
pub fn decode_validator_reward(
    tx: &ChainTx,
    index: usize,
    msg: &ChainMsg,
    batch: &mut Batch,
) -> Result<(), DecodeError> {
    let payload: MsgWithdrawValidatorCommission =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;

    let reward_amount = tx
        .events
        .iter()
        .find(|event| event.kind == EVENT_WITHDRAW_COMMISSION)
        .and_then(|event| event.attributes.iter().find(|attr| attr.key == ATTR_AMOUNT))
        .ok_or_else(|| DecodeError::MissingEventAttribute {
            event: EVENT_WITHDRAW_COMMISSION.to_string(),
            attribute: ATTR_AMOUNT.to_string(),
        })?
        .value
        .clone();

    batch.validator_rewards.push(ValidatorReward {
        id: make_id(&tx.hash, index, ""),
        tx_hash: tx.hash.clone(),
        address: payload.validator_address,
        amount: amount::str_to_amount(&reward_amount)?,
        created_at: tx.timestamp,
    });
    Ok(())
}
