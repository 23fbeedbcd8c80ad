//! Typed, TOML-loadable configuration for a running pipeline.
//!
//! Only `parser.node`, `parser.batch`, and `parser.fetchers` are runtime
//! knobs; precision, page size, and retry spacing are fixed chain-protocol
//! constants, not configuration.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Tx page size requested from the chain client per fetch.
pub const PAGE_SIZE: u64 = 50;

/// Spacing between retries: fetcher upstream retries and saver group
/// retries both use this, though fetchers also use a faster 1s spacing for
/// their own per-task retry loop (see `fetcher::RETRY_DELAY`).
pub const REPEAT_DELAY: Duration = Duration::from_secs(5);

fn default_batch() -> u64 {
    100
}

fn default_fetchers() -> usize {
    8
}

fn default_node() -> String {
    "http://localhost:1317".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_node")]
    pub node: String,
    #[serde(default = "default_batch")]
    pub batch: u64,
    #[serde(default = "default_fetchers")]
    pub fetchers: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { node: default_node(), batch: default_batch(), fetchers: default_fetchers() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_section_is_sparse() {
        let raw = "[parser]\nnode = \"http://node:1317\"\n";
        let config = Config::from_toml_str(raw).unwrap();
        assert_eq!(config.parser.node, "http://node:1317");
        assert_eq!(config.parser.batch, 100);
        assert_eq!(config.parser.fetchers, 8);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let raw = r#"
            [parser]
            node = "http://node:1317"
            batch = 25
            fetchers = 4
        "#;
        let config = Config::from_toml_str(raw).unwrap();
        assert_eq!(config.parser.batch, 25);
        assert_eq!(config.parser.fetchers, 4);
    }
}
