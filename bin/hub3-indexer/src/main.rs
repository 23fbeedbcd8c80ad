//! Entrypoint: loads configuration, wires the `ChainClient` and `Store`
//! implementations into a `Supervisor`, and runs it to completion.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser as ClapParser;
use eyre::WrapErr;
use hub3_chain_client::HttpChainClient;
use hub3_pipeline::{Config, Supervisor};
use hub3_store::{MemoryStore, Store};
use hub3_types::Parser as ParserRow;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Cosmos-family chain indexer core.
#[derive(Debug, ClapParser)]
#[command(name = "hub3-indexer", about = "Fetches, decodes, and persists hub3 chain data")]
struct Cli {
    /// Path to a TOML configuration file. Falls back to built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides `parser.node` from the config file.
    #[arg(long)]
    node: Option<String>,

    /// Overrides `parser.batch` from the config file.
    #[arg(long)]
    batch: Option<u64>,

    /// Overrides `parser.fetchers` from the config file.
    #[arg(long)]
    fetchers: Option<usize>,

    /// Starting cursor height for a fresh in-memory store. Ignored once a
    /// real backend replaces `MemoryStore`.
    #[arg(long, default_value_t = 0)]
    from_height: u64,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("reading config file {}", path.display()))?;
            Config::from_toml_str(&raw).wrap_err("parsing config file")?
        }
        None => Config::default(),
    };

    if let Some(node) = cli.node {
        config.parser.node = node;
    }
    if let Some(batch) = cli.batch {
        config.parser.batch = batch;
    }
    if let Some(fetchers) = cli.fetchers {
        config.parser.fetchers = fetchers;
    }

    let base_url = Url::parse(&config.parser.node).wrap_err("invalid parser.node URL")?;
    let chain = Arc::new(HttpChainClient::new(base_url));

    // A real deployment points this at a SQL-backed `Store`; that backend is
    // an external collaborator and out of scope here. The in-memory store
    // needs its cursor seeded up front since nothing else provisions it.
    let store = Arc::new(MemoryStore::new());
    store
        .update_parser(ParserRow { id: 1, title: ParserRow::TITLE.to_string(), height: cli.from_height })
        .await
        .wrap_err("seeding initial parser cursor")?;

    tracing::info!(node = %config.parser.node, batch = config.parser.batch, fetchers = config.parser.fetchers, "starting hub3-indexer");

    Supervisor::new(config, chain, store).run().await?;

    Ok(())
}
