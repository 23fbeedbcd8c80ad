//! The in-flight accumulator a decoder task appends rows to.
//!
//! Single-writer, single-reader: the decoder owns it exclusively until the
//! batch-completion predicate fires, then hands it to the saver by move.

use hub3_types::{
    Block, Delegation, DelegatorReward, Proposal, ProposalDeposit, ProposalVote, Transaction,
    Transfer, ValidatorReward,
};

#[derive(Debug, Default)]
pub struct Batch {
    pub blocks: Vec<Block>,
    pub transactions: Vec<Transaction>,
    pub transfers: Vec<Transfer>,
    pub delegations: Vec<Delegation>,
    pub delegator_rewards: Vec<DelegatorReward>,
    pub validator_rewards: Vec<ValidatorReward>,
    pub proposals: Vec<Proposal>,
    pub proposal_deposits: Vec<ProposalDeposit>,
    pub proposal_votes: Vec<ProposalVote>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.transactions.is_empty()
    }
}
