//! Binary crate for the `cuaca` server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving forecast and region lookups over HTTP
//! - Interactive configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
