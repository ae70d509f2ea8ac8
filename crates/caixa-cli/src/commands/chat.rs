//! Console transport
//!
//! Each input line is delivered to the bot as an inbound message and the
//! reply, if any, is printed. Useful for trying the bot without a chat
//! network.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use caixa_core::ai::{AIBackend, AIClient};
use caixa_core::{Bot, InboundMessage};

use super::open_db;

/// Lines that end a chat session
const QUIT_COMMANDS: &[&str] = &["/sair", "/quit"];

/// Feed every line of `input` to the bot, writing replies to `output`
///
/// Returns the number of replies written.
pub async fn run_chat<B, R, W>(bot: &Bot<B>, input: R, mut output: W) -> Result<usize>
where
    B: AIBackend,
    R: BufRead,
    W: Write,
{
    let mut replies = 0;

    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&text) {
            break;
        }

        if let Some(reply) = bot.handle(&InboundMessage::new(line.as_str())).await {
            writeln!(output, "{}\n", reply)?;
            output.flush()?;
            replies += 1;
        }
    }

    Ok(replies)
}

async fn open_bot(db_path: &Path, no_encrypt: bool) -> Result<Bot> {
    let db = open_db(db_path, no_encrypt)?;
    let ai = AIClient::from_env();

    if !ai.health_check().await {
        println!(
            "⚠️  AI backend not responding at {} (model: {}); expenses will fail",
            ai.host(),
            ai.model()
        );
    }

    Ok(Bot::new(db, ai))
}

pub async fn cmd_chat(db_path: &Path, no_encrypt: bool) -> Result<()> {
    let bot = open_bot(db_path, no_encrypt).await?;

    println!("💬 Caixa console. Envie um gasto (ex: \"50 farmacia\"), \"relatório\" ou /sair.");
    println!();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_chat(&bot, stdin.lock(), stdout.lock()).await?;

    Ok(())
}

pub async fn cmd_send(db_path: &Path, text: &str, no_encrypt: bool) -> Result<()> {
    let bot = open_bot(db_path, no_encrypt).await?;

    match bot.handle(&InboundMessage::new(text)).await {
        Some(reply) => println!("{}", reply),
        None => println!("(sem resposta)"),
    }
    Ok(())
}
