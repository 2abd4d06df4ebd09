use anyhow::Result;

use clap::{Parser, Subcommand};
use tracing::info;

use frontdesk::{telemetry, Config, Service};

#[derive(Parser, Debug)]
#[clap(name = "frontdesk-setup", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[clap(flatten)]
    pub config: Config,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and the initial admin account
    Init,
}

/// Initialize the database
async fn db_init(config: &Config) -> Result<()> {
    Service::connect(config).await?;
    info!(members_db = %config.members_db, "database initialized");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(&cli.config.log_level)?;

    match cli.command {
        Command::Init => db_init(&cli.config).await?,
    }
    Ok(())
}
