//! The saver: single writer to the store, persisting each completed batch in
//! a fixed group order and advancing the cursor last.

use std::sync::Arc;

use hub3_store::{Store, StoreError};
use hub3_types::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info};

use crate::config::REPEAT_DELAY;
use crate::task::CompletedBatch;

/// Runs the saver until cancellation or channel closure (which only happens
/// once the decoder has shut down, i.e. the whole pipeline is stopping).
///
/// Sends the new cursor height on `batch_done_tx` once a batch is fully
/// persisted, which is the supervisor's cue to advance its in-memory cursor
/// and start the next round.
pub async fn run(
    store: Arc<dyn Store>,
    mut completed_rx: mpsc::Receiver<CompletedBatch>,
    batch_done_tx: mpsc::Sender<u64>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let completed = tokio::select! {
            biased;
            _ = shutdown.recv() => return,
            completed = completed_rx.recv() => completed,
        };
        let Some(completed) = completed else {
            return;
        };

        let Some(new_height) = persist(store.as_ref(), completed, &mut shutdown).await else {
            return;
        };
        if batch_done_tx.send(new_height).await.is_err() {
            return;
        }
    }
}

/// Persists one batch, retrying each group indefinitely until the store
/// accepts it. Returns `None` only if cancellation interrupted a retry wait,
/// meaning the batch was not (fully) persisted.
async fn persist(
    store: &dyn Store,
    completed: CompletedBatch,
    shutdown: &mut broadcast::Receiver<()>,
) -> Option<u64> {
    let CompletedBatch { batch, new_height } = completed;

    retry(|| store.create_blocks(batch.blocks.clone()), shutdown).await?;
    retry(|| store.create_transactions(batch.transactions.clone()), shutdown).await?;
    retry(|| store.create_transfers(batch.transfers.clone()), shutdown).await?;
    retry(|| store.create_delegations(batch.delegations.clone()), shutdown).await?;
    retry(|| store.create_delegator_rewards(batch.delegator_rewards.clone()), shutdown).await?;
    retry(|| store.create_validator_rewards(batch.validator_rewards.clone()), shutdown).await?;
    retry(|| store.create_proposals(batch.proposals.clone()), shutdown).await?;
    retry(|| store.create_proposal_deposits(batch.proposal_deposits.clone()), shutdown).await?;
    retry(|| store.create_proposal_votes(batch.proposal_votes.clone()), shutdown).await?;

    let parser = Parser { id: 1, title: Parser::TITLE.to_string(), height: new_height };
    retry(|| store.update_parser(parser.clone()), shutdown).await?;

    info!(new_height, "cursor advanced");
    Some(new_height)
}

async fn retry<F, Fut>(mut attempt: F, shutdown: &mut broadcast::Receiver<()>) -> Option<()>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<(), StoreError>>,
{
    loop {
        match attempt().await {
            Ok(()) => return Some(()),
            Err(error) => {
                error!(%error, "transient store error, retrying");
                tokio::select! {
                    biased;
                    _ = shutdown.recv() => return None,
                    _ = tokio::time::sleep(REPEAT_DELAY) => {}
                }
            }
        }
    }
}
