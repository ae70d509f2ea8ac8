//! Ollama-related command implementations

use anyhow::Result;
use caixa_core::ai::{
    AIBackend, OllamaBackend, DEFAULT_OLLAMA_HOST as DEFAULT_HOST,
    DEFAULT_OLLAMA_MODEL as DEFAULT_MODEL,
};

/// Test Ollama connection and expense extraction
pub async fn cmd_ollama(text: Option<&str>) -> Result<()> {
    println!("🔍 Testing Ollama connection...\n");

    // Check environment variables
    let host = std::env::var("OLLAMA_HOST");
    let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    match &host {
        Ok(h) => println!("  OLLAMA_HOST: {}", h),
        Err(_) => {
            println!("  ⚠️  OLLAMA_HOST not set (defaulting to {})", DEFAULT_HOST);
        }
    }
    println!("  OLLAMA_MODEL: {}\n", model);

    let host = host.unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let client = OllamaBackend::new(&host, &model);

    // Health check
    print!("Checking Ollama availability... ");
    if client.health_check().await {
        println!("✅ Connected");
    } else {
        println!("❌ Failed");
        println!("\n⚠️  Could not connect to Ollama at {}", host);
        println!("\nTo set up Ollama:");
        println!("  1. Install Ollama: https://ollama.ai/download");
        println!("  2. Start the server: ollama serve");
        println!("  3. Pull the model: ollama pull {}", model);
        println!("  4. Set environment variable: export OLLAMA_HOST={}", host);
        return Ok(());
    }

    let samples = text.map(|t| vec![t.to_string()]).unwrap_or_else(|| {
        vec![
            "50 farmacia".to_string(),
            "32.90 almoço no centro".to_string(),
            "12 uber".to_string(),
        ]
    });

    println!("\n📋 Testing expense extraction...\n");

    for sample in &samples {
        print!("  \"{}\" → ", sample);
        match client.extract_expense(sample).await {
            Ok(result) => {
                println!(
                    "R$ {:.2} | {} | {}",
                    result.amount, result.category, result.description
                );
            }
            Err(e) => {
                println!("❌ Error: {}", e);
            }
        }
    }

    Ok(())
}
