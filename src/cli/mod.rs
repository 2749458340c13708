//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod categories;
pub mod config;
pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Find LGBTQ+ venues and services near an address
#[derive(Parser)]
#[command(name = "gay2z")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for places near an address
    Search(search::SearchArgs),

    /// List searchable categories
    Categories,

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    init_logging(match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    });

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Categories => categories::run(),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Initialize logging; RUST_LOG wins over the default level
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
