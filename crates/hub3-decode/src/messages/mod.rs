//! One module per recognized message kind, dispatched by the exact wire
//! discriminator string the upstream node's amino-JSON encoding uses.

mod delegate;
mod governance;
mod multisend;
mod redelegate;
mod reward;
mod send;
mod undelegate;

use hub3_types::{ChainMsg, ChainTx};
use tracing::warn;

use crate::{Batch, DecodeError};

const MSG_SEND: &str = "cosmos-sdk/MsgSend";
const MSG_MULTI_SEND: &str = "cosmos-sdk/MsgMultiSend";
const MSG_DELEGATE: &str = "cosmos-sdk/MsgDelegate";
const MSG_UNDELEGATE: &str = "cosmos-sdk/MsgUndelegate";
const MSG_BEGIN_REDELEGATE: &str = "cosmos-sdk/MsgBeginRedelegate";
const MSG_WITHDRAW_DELEGATION_REWARD: &str = "cosmos-sdk/MsgWithdrawDelegationReward";
const MSG_WITHDRAW_DELEGATION_REWARDS_ALL: &str = "cosmos-sdk/MsgWithdrawDelegationRewardsAll";
const MSG_WITHDRAW_VALIDATOR_COMMISSION: &str = "cosmos-sdk/MsgWithdrawValidatorCommission";
const MSG_SUBMIT_PROPOSAL: &str = "cosmos-sdk/MsgSubmitProposal";
const MSG_DEPOSIT: &str = "cosmos-sdk/MsgDeposit";
const MSG_VOTE: &str = "cosmos-sdk/MsgVote";

/// Decodes one message of a successful transaction into `batch`.
///
/// `index` is the message's position within the transaction, the input to
/// the synthetic id rule. Message kinds not in the recognized list above are
/// silently ignored (the chain has many message types this indexer does not
/// track); `MsgWithdrawDelegationRewardsAll` is recognized but intentionally
/// unimplemented, logged at warn level instead of decoded.
pub fn decode_message(
    tx: &ChainTx,
    index: usize,
    msg: &ChainMsg,
    batch: &mut Batch,
) -> Result<(), DecodeError> {
    match msg.msg_type.as_str() {
        MSG_SEND => send::decode(tx, index, msg, batch),
        MSG_MULTI_SEND => multisend::decode(tx, index, msg, batch),
        MSG_DELEGATE => delegate::decode(tx, index, msg, batch),
        MSG_UNDELEGATE => undelegate::decode(tx, index, msg, batch),
        MSG_BEGIN_REDELEGATE => redelegate::decode(tx, index, msg, batch),
        MSG_WITHDRAW_DELEGATION_REWARD => reward::decode_delegator_reward(tx, index, msg, batch),
        MSG_WITHDRAW_VALIDATOR_COMMISSION => reward::decode_validator_reward(tx, index, msg, batch),
        MSG_WITHDRAW_DELEGATION_REWARDS_ALL => {
            warn!(tx_hash = %tx.hash, index, "MsgWithdrawDelegationRewardsAll is not decoded, skipping");
            Ok(())
        }
        MSG_SUBMIT_PROPOSAL => governance::decode_submit_proposal(tx, index, msg, batch),
        MSG_DEPOSIT => governance::decode_deposit(tx, index, msg, batch),
        MSG_VOTE => governance::decode_vote(tx, index, msg, batch),
        _ => Ok(()),
    }
}

fn payload_error(msg_type: &str, source: serde_json::Error) -> DecodeError {
    DecodeError::Payload { msg_type: msg_type.to_string(), reason: source.to_string() }
}

pub(crate) use payload_error as err;
