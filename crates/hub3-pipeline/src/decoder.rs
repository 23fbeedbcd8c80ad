//! The decoder: a single task that owns the in-flight batch accumulator.
//!
//! Single-writer by construction — there is exactly one decoder task, so the
//! accumulator never needs a lock.

use hub3_decode::{decode_tx, Batch, DecodeError};
use hub3_types::Block;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::config::PAGE_SIZE;
use crate::task::{BatchStart, CompletedBatch, FatalDecodeError, FetchOutcome, FetchTask};

struct BatchState {
    start_height: u64,
    batch_size: u64,
    blocks_collected: u64,
    txs_expected: u64,
    txs_parsed: u64,
    accumulator: Batch,
}

impl BatchState {
    fn new(start: BatchStart) -> Self {
        Self {
            start_height: start.start_height,
            batch_size: start.batch_size,
            blocks_collected: 0,
            txs_expected: 0,
            txs_parsed: 0,
            accumulator: Batch::new(),
        }
    }

    fn is_complete(&self) -> bool {
        self.blocks_collected == self.batch_size && self.txs_parsed == self.txs_expected
    }
}

/// Runs the decoder until cancellation or a fatal decode error.
///
/// On every `BatchStart` it resets its local counters and accumulator, then
/// consumes `FetchOutcome`s (emitting further tx-page `FetchTask`s as blocks
/// arrive) until the batch-completion predicate holds, at which point it
/// hands the batch to the saver and goes back to waiting for the next round.
pub async fn run(
    mut batch_start_rx: mpsc::Receiver<BatchStart>,
    mut outcome_rx: mpsc::Receiver<FetchOutcome>,
    task_tx: mpsc::Sender<FetchTask>,
    completed_tx: mpsc::Sender<CompletedBatch>,
    error_tx: mpsc::Sender<FatalDecodeError>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let start = tokio::select! {
            biased;
            _ = shutdown.recv() => return,
            start = batch_start_rx.recv() => start,
        };
        let Some(start) = start else {
            return;
        };

        let mut state = BatchState::new(start);
        debug!(start_height = state.start_height, batch_size = state.batch_size, "batch started");

        loop {
            let outcome = tokio::select! {
                biased;
                _ = shutdown.recv() => return,
                outcome = outcome_rx.recv() => outcome,
            };
            let Some(outcome) = outcome else {
                return;
            };

            if let Err(fatal) = apply(outcome, &mut state, &task_tx).await {
                let _ = error_tx.send(fatal).await;
                return;
            }

            if state.is_complete() {
                break;
            }
        }

        info!(start_height = state.start_height, batch_size = state.batch_size, "batch complete");
        let new_height = state.start_height + state.batch_size - 1;
        if completed_tx
            .send(CompletedBatch { batch: state.accumulator, new_height })
            .await
            .is_err()
        {
            return;
        }
    }
}

async fn apply(
    outcome: FetchOutcome,
    state: &mut BatchState,
    task_tx: &mpsc::Sender<FetchTask>,
) -> Result<(), FatalDecodeError> {
    match outcome {
        FetchOutcome::Block { height, block } => {
            state.accumulator.blocks.push(Block {
                height: block.height,
                hash: block.hash,
                proposer: block.proposer,
                created_at: block.time,
            });
            state.blocks_collected += 1;
            state.txs_expected += block.num_txs;

            // The node's tx-listing endpoint pages from 1, not 0.
            let pages = block.num_txs.div_ceil(PAGE_SIZE);
            for page in 1..=pages {
                if task_tx.send(FetchTask::Txs { height, page }).await.is_err() {
                    return Ok(());
                }
            }
            Ok(())
        }
        FetchOutcome::Txs { txs, .. } => {
            for tx in txs.txs {
                let height = tx.height;
                decode_tx(&tx, &mut state.accumulator).map_err(|cause| fatal(height, &cause))?;
                state.txs_parsed += 1;
            }
            Ok(())
        }
    }
}

fn fatal(height: u64, cause: &DecodeError) -> FatalDecodeError {
    let msg_type = match cause {
        DecodeError::InMessage { msg_type, .. } => msg_type.clone(),
        // Only reached for tx-level failures (empty hash, bad fee) that
        // occur before any message is dispatched, so no message type applies.
        _ => "<unspecified>".to_string(),
    };
    FatalDecodeError { height, msg_type, cause: cause.clone() }
}
