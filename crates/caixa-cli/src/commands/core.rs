//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_report` - Print the monthly report

use std::path::Path;

use anyhow::{Context, Result};
use caixa_core::db::Database;
use caixa_core::report::generate_monthly_report;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let count = db.count_expenses().context("Failed to read expenses")?;
    println!("   {} expense(s) on record", count);

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else if db.is_encrypted().context("Failed to query encryption state")? {
        println!("   🔒 Encryption: ENABLED");
    } else {
        println!("   ⚠️  Encryption: not active");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Try the bot locally: caixa chat");
    println!("  2. Start the webhook server: caixa serve");

    Ok(())
}

pub fn cmd_report(db: &Database) -> Result<()> {
    let report = generate_monthly_report(db).context("Failed to build report")?;
    println!("{}", report);
    Ok(())
}
