//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Caixa - Track expenses by chatting
#[derive(Parser)]
#[command(name = "caixa")]
#[command(about = "Conversational expense tracker backed by a local LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "caixa.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set CAIXA_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the webhook server for the messaging bridge
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, /api requests need a key from CAIXA_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },

    /// Print this month's spending report
    Report,

    /// Chat with the bot on the terminal (one message per line)
    Chat,

    /// Send a single message to the bot and print the reply
    Send {
        /// Message text (e.g. "50 farmacia")
        text: String,
    },

    /// Test the Ollama connection and a sample extraction
    Ollama {
        /// Message to extract (default: a few samples)
        #[arg(short, long)]
        text: Option<String>,
    },
}
