//! Owns every component's lifetime and the single cancellation signal.

use std::sync::Arc;
use std::time::Duration;

use hub3_chain_client::ChainClient;
use hub3_store::Store;
use hub3_types::{ChainBlock, Parser};
use tokio::sync::{broadcast, mpsc, Mutex};
use tracing::{error, info, warn};

use crate::config::{Config, REPEAT_DELAY};
use crate::errors::PipelineError;
use crate::task::{BatchStart, FetchTask};
use crate::{decoder, fetcher, saver};

const QUEUE_CAPACITY: usize = 100_000;
const TIP_RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct Supervisor {
    config: Config,
    chain: Arc<dyn ChainClient>,
    store: Arc<dyn Store>,
}

impl Supervisor {
    pub fn new(config: Config, chain: Arc<dyn ChainClient>, store: Arc<dyn Store>) -> Self {
        Self { config, chain, store }
    }

    /// Runs the pipeline to completion: either cooperative shutdown (`Ok`)
    /// or a fatal decode error (`Err`). Spawns its own SIGINT listener, so
    /// the caller only needs to await the returned future.
    pub async fn run(self) -> Result<(), PipelineError> {
        let mut cursor = self
            .store
            .get_parser(Parser::TITLE)
            .await?
            .ok_or_else(|| PipelineError::MissingParserRow(Parser::TITLE.to_string()))?
            .height;

        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        tokio::spawn({
            let shutdown_tx = shutdown_tx.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, shutting down");
                    let _ = shutdown_tx.send(());
                }
            }
        });

        let (task_tx, task_rx) = mpsc::channel::<FetchTask>(QUEUE_CAPACITY);
        let task_rx = Arc::new(Mutex::new(task_rx));
        let (outcome_tx, outcome_rx) = mpsc::channel(QUEUE_CAPACITY);
        let (batch_start_tx, batch_start_rx) = mpsc::channel(1);
        let (completed_tx, completed_rx) = mpsc::channel(1);
        let (batch_done_tx, mut batch_done_rx) = mpsc::channel(1);
        let (error_tx, mut error_rx) = mpsc::channel(1);

        let mut workers = fetcher::spawn(
            self.config.parser.fetchers,
            self.chain.clone(),
            task_rx,
            outcome_tx,
            shutdown_tx.clone(),
        );
        workers.push(tokio::spawn(decoder::run(
            batch_start_rx,
            outcome_rx,
            task_tx.clone(),
            completed_tx,
            error_tx,
            shutdown_tx.subscribe(),
        )));
        workers.push(tokio::spawn(saver::run(
            self.store.clone(),
            completed_rx,
            batch_done_tx,
            shutdown_tx.subscribe(),
        )));

        let result = loop {
            let tip = match fetch_tip_with_retry(self.chain.as_ref(), &mut shutdown_rx).await {
                Some(tip) => tip,
                None => break Ok(()),
            };

            if cursor >= tip.height {
                if sleep_or_cancel(REPEAT_DELAY, &mut shutdown_rx).await.is_none() {
                    break Ok(());
                }
                continue;
            }

            let batch_size = self.config.parser.batch.min(tip.height - cursor);
            let start_height = cursor + 1;

            if batch_start_tx.send(BatchStart { start_height, batch_size }).await.is_err() {
                break Ok(());
            }

            let mut enqueue_failed = false;
            for height in start_height..start_height + batch_size {
                if task_tx.send(FetchTask::Block { height }).await.is_err() {
                    enqueue_failed = true;
                    break;
                }
            }
            if enqueue_failed {
                break Ok(());
            }

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break Ok(()),
                fatal = error_rx.recv() => {
                    match fatal {
                        Some(fatal) => {
                            error!(height = fatal.height, msg_type = %fatal.msg_type, cause = %fatal.cause, "fatal decode error, aborting");
                            let _ = shutdown_tx.send(());
                            break Err(PipelineError::Fatal(fatal));
                        }
                        None => break Ok(()),
                    }
                }
                new_height = batch_done_rx.recv() => {
                    match new_height {
                        Some(new_height) => {
                            cursor = new_height;
                            info!(cursor, "batch done");
                        }
                        None => break Ok(()),
                    }
                }
            }
        };

        // Every worker shares the same shutdown signal, so a `break` above
        // (for any reason) means they are already unwinding; wait for them
        // to actually quiesce before handing control back to the caller.
        let _ = shutdown_tx.send(());
        for worker in workers {
            let _ = worker.await;
        }

        result
    }
}

async fn fetch_tip_with_retry(
    chain: &dyn ChainClient,
    shutdown_rx: &mut broadcast::Receiver<()>,
) -> Option<ChainBlock> {
    loop {
        match chain.latest_block().await {
            Ok(block) => return Some(block),
            Err(error) => {
                warn!(%error, "transient error fetching tip, retrying");
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => return None,
                    _ = tokio::time::sleep(TIP_RETRY_DELAY) => {}
                }
            }
        }
    }
}

async fn sleep_or_cancel(delay: Duration, shutdown_rx: &mut broadcast::Receiver<()>) -> Option<()> {
    tokio::select! {
        biased;
        _ = shutdown_rx.recv() => None,
        _ = tokio::time::sleep(delay) => Some(()),
    }
}
