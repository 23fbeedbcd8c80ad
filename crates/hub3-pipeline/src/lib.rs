//! The fetch/decode/persist orchestrator: bounded-concurrency fan-out over a
//! single-threaded decoder and a single-threaded saver, driven by a
//! supervisor that owns the one cancellation signal for the whole pipeline.

pub mod config;
pub mod decoder;
pub mod errors;
pub mod fetcher;
pub mod saver;
pub mod supervisor;
pub mod task;

pub use config::Config;
pub use errors::PipelineError;
pub use supervisor::Supervisor;
