//! Caixa CLI - Conversational expense tracker
//!
//! Usage:
//!   caixa init                Initialize database
//!   caixa serve --port 3000   Start webhook server for the messaging bridge
//!   caixa chat                Talk to the bot on the terminal
//!   caixa report              Print this month's report

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt).await,
        Commands::Report => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_report(&db)
        }
        Commands::Chat => commands::cmd_chat(&cli.db, cli.no_encrypt).await,
        Commands::Send { text } => commands::cmd_send(&cli.db, &text, cli.no_encrypt).await,
        Commands::Ollama { text } => commands::cmd_ollama(text.as_deref()).await,
    }
}
