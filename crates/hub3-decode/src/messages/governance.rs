use hub3_types::{make_id, ChainMsg, ChainTx, Coin, Proposal, ProposalDeposit, ProposalVote};
use serde::Deserialize;

use super::err;
use crate::{amount, Batch, DecodeError};

#[derive(Deserialize)]
struct MsgSubmitProposal {
    proposer: String,
    initial_deposit: Vec<Coin>,
    content: serde_json::Value,
}

#[derive(Deserialize)]
struct MsgDeposit {
    proposal_id: String,
    depositor: String,
    amount: Vec<Coin>,
}

#[derive(Deserialize)]
struct MsgVote {
    proposal_id: String,
    voter: String,
    option: String,
}

/// Emits one Proposal. `id` is bound to `tx_hash`, not the real on-chain
/// proposal id — a temporary binding carried over from the system this was
/// modeled on; see the design notes for why it is kept rather than fixed.
pub fn decode_submit_proposal(
    tx: &ChainTx,
    _index: usize,
    msg: &ChainMsg,
    batch: &mut Batch,
) -> Result<(), DecodeError> {
    let payload: MsgSubmitProposal =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;

    batch.proposals.push(Proposal {
        id: tx.hash.clone(),
        proposer: payload.proposer,
        init_deposit: amount::sum_coins(&payload.initial_deposit)?,
        content: payload.content.to_string(),
        created_at: tx.timestamp,
    });
    Ok(())
}

/// Emits one ProposalDeposit, amount the sum of the message's coin list.
pub fn decode_deposit(tx: &ChainTx, index: usize, msg: &ChainMsg, batch: &mut Batch) -> Result<(), DecodeError> {
    let payload: MsgDeposit =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;

    batch.proposal_deposits.push(ProposalDeposit {
        id: make_id(&tx.hash, index, ""),
        proposal_id: payload.proposal_id,
        depositor: payload.depositor,
        amount: amount::sum_coins(&payload.amount)?,
        created_at: tx.timestamp,
    });
    Ok(())
}

/// Emits one ProposalVote.
pub fn decode_vote(tx: &ChainTx, index: usize, msg: &ChainMsg, batch: &mut Batch) -> Result<(), DecodeError> {
    let payload: MsgVote =
        serde_json::from_value(msg.payload.clone()).map_err(|e| err(&msg.msg_type, e))?;

    batch.proposal_votes.push(ProposalVote {
        id: make_id(&tx.hash, index, ""),
        proposal_id: payload.proposal_id,
        voter: payload.voter,
        option: payload.option,
        created_at: tx.timestamp,
    });
    Ok(())
}
