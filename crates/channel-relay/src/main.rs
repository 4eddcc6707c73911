//! # rpc-channel-server
//!
//! Broadcast relay for game channels. Participants `send` messages into
//! named channels and long-poll them back with `receive`.
//!
//! ```text
//! rpc-channel-server --port 32500 [--host 127.0.0.1]
//! ```
//!
//! Logging is controlled through `RUST_LOG` (default `info`).

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use channel_relay::{ChannelRegistry, RelayConfig, RelayServer};

/// Broadcast relay server for game channels
#[derive(Parser, Debug)]
#[command(name = "rpc-channel-server")]
#[command(version, about = "JSON-RPC broadcast relay for game channels")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = RelayConfig::new(args.host, args.port);
    let server = RelayServer::new(config, Arc::new(ChannelRegistry::new()))
        .context("invalid relay configuration")?;

    server.serve().await.context("relay server failed")?;
    Ok(())
}
