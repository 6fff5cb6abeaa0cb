//! keywordd: ranks noun and verb keywords of documents and writes them to a graph.

mod cli;
mod client;
mod commands;
mod init;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,keywordd=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command() {
        Command::Run(args) => commands::run(&cli, args).await,
        Command::Refresh => commands::refresh(&cli).await,
        Command::Annotate { ids } => commands::annotate(&cli, ids).await,
        Command::Preview { id } => commands::preview(&cli, id).await,
        Command::Sample => commands::sample(&cli),
        Command::Keywords { id } => commands::keywords(&cli, id).await,
        Command::Load { path } => commands::load(&cli, &path).await,
    }
}
