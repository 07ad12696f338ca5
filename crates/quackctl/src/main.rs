//! Quack Control - CLI client for the Quack assistant daemon.
//!
//! Provides user interface to ask, teach, and check on the duck.

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quackctl")]
#[command(about = "Quack Assistant - ask the duck", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon address (host:port)
    #[arg(long, global = true)]
    addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the assistant a question
    Ask {
        /// The prompt to send
        prompt: String,
    },

    /// Teach the assistant a new prompt/answer pair
    Learn {
        /// Prompt to recognize
        prompt: String,

        /// Answer to give for it
        answer: String,
    },

    /// Show daemon health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::QuackClient::new(cli.addr.as_deref())?;

    match cli.command {
        Commands::Ask { prompt } => commands::ask(&client, &prompt).await,
        Commands::Learn { prompt, answer } => commands::learn(&client, prompt, answer).await,
        Commands::Status => commands::status(&client).await,
    }
}
