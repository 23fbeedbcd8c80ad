use hub3_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::task::FatalDecodeError;

/// Top-level error a `Supervisor::run` can return. Any variant here means
/// the process should exit non-zero; cancellation is not an error and never
/// produces one of these.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("store error during startup: {0}")]
    Store(#[from] StoreError),
    #[error("parser row \"{0}\" is missing from the store")]
    MissingParserRow(String),
    #[error(transparent)]
    Fatal(#[from] FatalDecodeError),
}
