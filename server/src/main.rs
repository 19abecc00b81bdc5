use clap::Parser;
use ledger_server::backend::config::{Backend, LedgerConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ledger-server")]
#[command(version)]
#[command(about = "Bank account ledger with a HATEOAS REST interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "ledger.yaml")]
    config: PathBuf,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Keep accounts in memory instead of the database
    #[arg(long)]
    memory: bool,

    /// Delete all accounts and transactions at startup
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = LedgerConfig::load(&args.config)?;
    config.apply_env()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.memory {
        config.storage.backend = Backend::Memory;
    }
    if args.clear {
        config.storage.clear_on_start = true;
    }
    info!("Config loaded from {}: {:?}", args.config.display(), config);

    ledger_server::run(config).await
}
