//! The fetcher pool: the only stage that performs network I/O, and the only
//! source of parallelism in the pipeline.

use std::sync::Arc;
use std::time::Duration;

use hub3_chain_client::{ChainClient, TxsFilter};
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{instrument, warn};

use crate::config::PAGE_SIZE;
use crate::task::{FetchOutcome, FetchTask};

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Spawns `count` fetcher workers sharing one task queue.
///
/// A task queue has exactly one logical consumer (the pool), so the shared
/// `mpsc::Receiver` is wrapped in a `tokio::sync::Mutex` rather than using a
/// dedicated MPMC channel crate — holding the lock across the `.recv().await`
/// is safe here because the only work done under it is waiting for the next
/// task, never the fetch itself.
pub fn spawn(
    count: usize,
    chain: Arc<dyn ChainClient>,
    task_rx: Arc<Mutex<mpsc::Receiver<FetchTask>>>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    shutdown: broadcast::Sender<()>,
) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|id| {
            let chain = chain.clone();
            let task_rx = task_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let shutdown_rx = shutdown.subscribe();
            tokio::spawn(worker(id, chain, task_rx, outcome_tx, shutdown_rx))
        })
        .collect()
}

#[instrument(skip_all, fields(worker_id = id))]
async fn worker(
    id: usize,
    chain: Arc<dyn ChainClient>,
    task_rx: Arc<Mutex<mpsc::Receiver<FetchTask>>>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    loop {
        let task = {
            let mut rx = task_rx.lock().await;
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => return,
                task = rx.recv() => task,
            }
        };
        let Some(task) = task else {
            return;
        };

        match fetch_with_retry(chain.as_ref(), task, &mut shutdown_rx).await {
            Some(outcome) => {
                if outcome_tx.send(outcome).await.is_err() {
                    return;
                }
            }
            None => return,
        }
    }
}

/// Retries a single task forever, 1s between attempts, until it succeeds or
/// cancellation arrives. Upstream transport errors are assumed transient;
/// there is no max-attempts cutoff, matching the pipeline's error taxonomy.
async fn fetch_with_retry(
    chain: &dyn ChainClient,
    task: FetchTask,
    shutdown_rx: &mut broadcast::Receiver<()>,
) -> Option<FetchOutcome> {
    loop {
        let attempt = match task {
            FetchTask::Block { height } => {
                chain.block_at(height).await.map(|block| FetchOutcome::Block { height, block })
            }
            FetchTask::Txs { height, page } => chain
                .txs_at(TxsFilter { height, page, limit: PAGE_SIZE })
                .await
                .map(|txs| FetchOutcome::Txs { height, page, txs }),
        };

        match attempt {
            Ok(outcome) => return Some(outcome),
            Err(error) => {
                warn!(?task, %error, "transient fetch error, retrying");
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => return None,
                    _ = tokio::time::sleep(RETRY_DELAY) => {}
                }
            }
        }
    }
}
