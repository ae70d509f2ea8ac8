//! Server command implementation

use std::path::Path;

use anyhow::Result;
use caixa_core::ai::AIClient;
use caixa_server::{ServerConfig, API_KEYS_ENV, BRIDGE_URL_ENV};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
) -> Result<()> {
    println!("🚀 Starting Caixa webhook server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let config = ServerConfig::from_env(!no_auth);

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if config.api_keys.is_empty() {
        println!(
            "   ⚠️  No API keys configured; set {} so the bridge can call /api",
            API_KEYS_ENV
        );
    } else {
        println!(
            "   🔑 API keys: {} configured ({})",
            config.api_keys.len(),
            API_KEYS_ENV
        );
    }

    match std::env::var(BRIDGE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => println!("   🔁 Bridge: {}", url),
        _ => println!("   💡 Tip: Set {} to enable automatic reconnects", BRIDGE_URL_ENV),
    }
    println!();

    let db = open_db(db_path, no_encrypt)?;
    let ai = AIClient::from_env();

    caixa_server::serve_with_config(db, ai, host, port, config).await
}
