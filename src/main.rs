//! HoneyMoney chain workbench
//!
//! Loads blocks from a node and serves the editable chain over JSON-RPC, or
//! hashes and validates header files offline.

use clap::{Parser, Subcommand};
use honey_core::chain::{ChainSession, EditableBlock};
use honey_core::config::Config;
use honey_core::crypto::{hashes_match, HeaderDigest};
use honey_core::header::{compute_header_hash, BlockHeader};
use honey_core::logging::{init_logging, LogFormat};
use honey_core::rpc::{start_rpc_server, EthClient, RpcState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "honey-workbench", about = "Block header hashing and chain integrity workbench")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "HONEY_CONFIG")]
    config: Option<PathBuf>,

    /// Upstream node JSON-RPC URL.
    #[arg(long, env = "HONEY_RPC_URL")]
    rpc_url: Option<String>,

    /// Port for the workbench API.
    #[arg(long, env = "HONEY_PORT")]
    port: Option<u16>,

    /// Header digest: "sha256", "blake3" or "keccak256".
    #[arg(long, env = "HONEY_DIGEST")]
    digest: Option<HeaderDigest>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "HONEY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "HONEY_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load blocks from the node and serve the workbench API.
    Serve {
        /// Serve headers from a JSON file instead of loading from the node.
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
    /// Hash a single header read from a JSON file.
    Hash { file: PathBuf },
    /// Check parent links across a JSON array of headers.
    ///
    /// Headers are taken as loaded, so stored hashes are not rechecked and
    /// only broken parent links are reported. Use `hash` to check a single
    /// header's stored hash.
    Validate { file: PathBuf },
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };
        if let Some(url) = &self.rpc_url {
            config.rpc_url = url.clone();
        }
        if let Some(port) = self.port {
            config.listen_port = port;
        }
        if let Some(digest) = self.digest {
            config.digest = digest;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

/// Recompute a header's hash and report whether the stored one agrees
fn rehash_header(header: &BlockHeader, digest: HeaderDigest) -> (String, bool) {
    let hash = compute_header_hash(header, digest);
    let matches = hashes_match(&header.hash, &hash);
    (hash, matches)
}

fn read_headers(path: &Path) -> anyhow::Result<Vec<BlockHeader>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Serve { from_file } => {
            let (session, client) = match from_file {
                Some(path) => {
                    tracing::info!(path = %path.display(), "loading headers from file");
                    (ChainSession::with_headers(read_headers(&path)?, config.digest), None)
                }
                None => {
                    let client = EthClient::new(
                        config.rpc_url.clone(),
                        Duration::from_secs(config.request_timeout_secs),
                    )?;
                    let headers = client.load_blocks(config.max_blocks).await?;
                    (ChainSession::with_headers(headers, config.digest), Some(client))
                }
            };

            tracing::info!(
                digest = %config.digest,
                blocks = session.len(),
                "starting workbench"
            );
            let state = Arc::new(RpcState::new(session, client, config.max_blocks));
            start_rpc_server(state, config.listen_port).await?;
        }
        Command::Hash { file } => {
            let header: BlockHeader = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let (hash, matches) = rehash_header(&header, config.digest);
            println!("{hash}");
            if !matches {
                tracing::info!(stored = %header.hash, "stored hash differs");
            }
        }
        Command::Validate { file } => {
            let blocks: Vec<EditableBlock> =
                read_headers(&file)?.into_iter().map(EditableBlock::new).collect();
            let report = honey_core::chain::validate_chain(&blocks, config.digest);
            let status = report.status();
            println!("{}", status.message);
            for detail in &status.details {
                println!("  {detail}");
            }
            if !report.is_valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use honey_core::header::RpcBlock;

    #[test]
    fn test_rehash_ignores_stored_hash_case() {
        let mut header = BlockHeader::from_rpc(RpcBlock::default());
        let hash = compute_header_hash(&header, HeaderDigest::Keccak256);
        header.hash = hash.to_uppercase().replacen("0X", "0x", 1);

        let (recomputed, matches) = rehash_header(&header, HeaderDigest::Keccak256);
        assert_eq!(recomputed, hash);
        assert!(matches);

        header.hash = "N/A".to_string();
        assert!(!rehash_header(&header, HeaderDigest::Keccak256).1);
    }

    #[test]
    fn test_validate_help_says_links_only() {
        let cli = Cli::command();
        let about = cli
            .find_subcommand("validate")
            .and_then(|cmd| cmd.get_about())
            .map(|about| about.to_string())
            .unwrap_or_default();
        assert!(about.contains("parent links"));
    }

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }
}
