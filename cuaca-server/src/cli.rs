use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use cuaca_core::{Config, RegionDirectory, assemble_from_upstream, provider::provider_from_config};
use inquire::{CustomType, Text};

use crate::{api::AppState, web};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cuaca", version, about = "BMKG forecast proxy and region lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Address to bind, overrides the config file.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides the config file.
        #[arg(long, short)]
        port: Option<u16>,

        /// Directory with provinces/cities/districts/villages JSON files.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Fetch the forecast once and print the normalized JSON.
    Fetch {
        /// Village code (adm4), e.g. "64.71.01.1001".
        #[arg(long)]
        adm4: Option<String>,
    },

    /// Interactively write the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Serve {
                host,
                port,
                data_dir,
            } => {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                if let Some(data_dir) = data_dir {
                    config.server.data_dir = data_dir;
                }
                serve(config).await
            }
            Command::Fetch { adm4 } => {
                if let Some(adm4) = adm4 {
                    config.upstream.adm4 = adm4;
                }
                fetch(&config).await
            }
            Command::Configure => configure(config),
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let regions = RegionDirectory::load(&config.server.data_dir);
    let provider = provider_from_config(&config)?;

    let state = AppState {
        provider: Arc::from(provider),
        regions: Arc::new(regions),
        adm4: config.upstream.adm4.clone(),
    };

    web::run(&config, state).await
}

async fn fetch(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let raw = provider
        .fetch_forecast(&config.upstream.adm4)
        .await
        .context("ERROR: Gagal mengambil data.")?;

    let response = assemble_from_upstream(&raw);
    let json = serde_json::to_string_pretty(&response).context("Failed to serialize forecast")?;
    println!("{json}");
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let adm4 = config.upstream.adm4.clone();
    config.upstream.adm4 = Text::new("Village code (adm4):")
        .with_default(&adm4)
        .prompt()?;

    config.server.port = CustomType::<u16>::new("HTTP port:")
        .with_default(config.server.port)
        .with_error_message("Please enter a port between 0 and 65535")
        .prompt()?;

    let data_dir = config.server.data_dir.display().to_string();
    config.server.data_dir = Text::new("Region data directory:")
        .with_default(&data_dir)
        .prompt()?
        .into();

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
