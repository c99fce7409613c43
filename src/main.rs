mod cli;
mod config;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::{eyre, Result};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::intent::classify;
use crate::cli::chat::ChatContext;
use crate::config::{ChatConfig, TypingDelay};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    chat: ChatArgs,
}

#[derive(clap::Args, Clone, Default)]
struct ChatArgs {
    /// Send a single message, print Nova's reply and exit
    #[arg(short, long)]
    input: Option<String>,

    /// Print the transcript as JSON (with --input)
    #[arg(long)]
    json: bool,

    /// Render replies without colors or emphasis markers
    #[arg(long)]
    plain: bool,

    /// Reply without the simulated typing pause
    #[arg(long)]
    instant: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a chat session with Nova
    Chat {
        #[command(flatten)]
        chat: ChatArgs,
    },
    /// Print the answer topic a message would be routed to
    Classify {
        /// Message to classify
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let args = match &cli.command {
        Some(Commands::Chat { chat }) => chat.clone(),
        _ => cli.chat.clone(),
    };

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("Failed to set tracing subscriber: {}", e))?;

    if let Some(Commands::Classify { text }) = &cli.command {
        if text.trim().is_empty() {
            eprintln!("Nothing to classify: the message is empty");
            return Ok(ExitCode::from(2));
        }
        println!("{}", classify(text));
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = ChatConfig::from_env()?;
    config.plain = args.plain;
    config.json = args.json;
    if args.instant {
        config.typing_delay = TypingDelay::instant();
    }

    info!("Starting Nova chat");
    debug!(
        "Typing delay between {:?} and {:?}",
        config.typing_delay.min(),
        config.typing_delay.max()
    );

    let interactive = args.input.is_none();
    let mut chat_context = ChatContext::new(Box::new(io::stdout()), args.input, interactive, config);
    chat_context.run().await
}
