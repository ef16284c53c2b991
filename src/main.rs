mod cli;

use imgdrop::{config, server};

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "imgdrop=debug,tower_http=debug".to_string()
        } else {
            "imgdrop=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::resolve(cli.config.as_deref(), cli.overrides())?;

    tracing::info!("Starting imgdrop");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::start_server(config))
}
