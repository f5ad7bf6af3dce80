//! Contract connector CLI.
//!
//! Loads a datasource settings file and drives the connector the way a host
//! framework would: validate, build the contract handles, connect, close.
//!
//! ```text
//! contract-connector validate datasource.json
//! contract-connector inspect  datasource.json
//! contract-connector ping     datasource.json --timeout-secs 5
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::time::timeout;

use contract_connector::blockchain::SigningProvider;
use contract_connector::config::{load_config, load_settings};
use contract_connector::connector::initialize;
use contract_connector::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "contract-connector")]
#[command(about = "Expose deployed smart contracts as data sources", long_about = None)]
struct Cli {
    /// Default log directive when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a settings file and list its contracts
    Validate { path: PathBuf },
    /// Build the connector and show its contract handles
    Inspect { path: PathBuf },
    /// Connect to the endpoint, then disconnect
    Ping {
        path: PathBuf,

        /// Give up waiting for the transport after this many seconds.
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Validate { path } => {
            let config = load_config(&path)?;
            println!("provider: {}", config.provider);
            if let Some(mnemonic) = &config.mnemonic {
                println!("mnemonic: {}", mnemonic.method);
            }
            for name in config.contracts.names() {
                println!("contract: {}", name);
            }
        }
        Commands::Inspect { path } => {
            let settings = load_settings(&path)?;
            let connector = initialize(&settings).await?;

            match connector.signing_provider() {
                SigningProvider::Endpoint(endpoint) => println!("signer: node-managed ({})", endpoint),
                SigningProvider::Wallet(wallet) => {
                    println!("signer: wallet {} ({})", wallet.address(), wallet.endpoint())
                }
            }
            for (name, handle) in connector.contracts().into_iter().flatten() {
                println!(
                    "{}: {} ({} abi items)",
                    name,
                    handle.address(),
                    handle.abi().len()
                );
            }
        }
        Commands::Ping { path, timeout_secs } => {
            let settings = load_settings(&path)?;
            let connector = initialize(&settings).await?;

            match timeout(Duration::from_secs(timeout_secs), connector.connect()).await {
                Ok(result) => result?,
                Err(_) => {
                    tracing::error!(timeout_secs, "Timed out waiting for the transport");
                    return Err(format!("transport not listening after {}s", timeout_secs).into());
                }
            }
            println!("connected: {}", connector.signing_provider().endpoint());

            connector.close().await?;
            println!("closed");
        }
    }

    Ok(())
}
