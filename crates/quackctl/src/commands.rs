//! Command implementations for quackctl.

use crate::client::QuackClient;
use anyhow::Result;
use owo_colors::OwoColorize;
use quack_common::rpc::{AnswerSource, LearnRequest};

/// Ask the daemon a question and print the tagged reply.
pub async fn ask(client: &QuackClient, prompt: &str) -> Result<()> {
    let response = client.ask(prompt).await?;

    let tag = match response.source {
        AnswerSource::Local => "[local]",
        AnswerSource::Internet => "[internet]",
    };
    println!("{} {}", tag.dimmed(), response.reply);
    Ok(())
}

/// Teach the daemon one prompt/answer pair.
pub async fn learn(client: &QuackClient, prompt: String, answer: String) -> Result<()> {
    let response = client.learn(&[LearnRequest { prompt, answer }]).await?;

    if response.learned > 0 {
        println!("{} {}", "ok:".green().bold(), response.message);
    } else {
        println!("{} {}", "rejected:".red().bold(), response.message);
    }
    Ok(())
}

/// Show daemon health.
pub async fn status(client: &QuackClient) -> Result<()> {
    let health = client.health().await?;

    println!("{}", "quackd".bold());
    println!("  status:    {}", health.status.green());
    println!("  version:   {}", health.version);
    println!("  uptime:    {}s", health.uptime_seconds);
    println!("  scenarios: {}", health.scenarios_loaded);
    Ok(())
}
