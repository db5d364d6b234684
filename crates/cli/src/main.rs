//! Murmur CLI — the main entry point.
//!
//! Commands:
//! - `collate` — Split streamed text into speakable sentences
//! - `format`  — Turn a transcript into chat-completion messages
//! - `config`  — Show, locate, or validate configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "murmur",
    about = "Murmur — sentence collation and transcript formatting for voice agents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collate text (or a JSON-lines token stream) into sentences
    Collate {
        /// Read input from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Treat each input line as a JSON-encoded token
        #[arg(long)]
        jsonl: bool,

        /// Print the aggregated function call at the end of the stream
        #[arg(long)]
        emit_function: bool,

        /// Override the sentence terminators (repeatable)
        #[arg(long = "ending", value_name = "TERMINATOR")]
        endings: Vec<String>,

        /// Print each segment as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Format a transcript JSON file as chat messages
    Format {
        /// Path to the transcript JSON
        transcript: PathBuf,

        /// System preamble (overrides the configured one)
        #[arg(short, long)]
        preamble: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Validate the configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Collate {
            file,
            jsonl,
            emit_function,
            endings,
            json,
        } => {
            let options = commands::collate::CollateOptions {
                file,
                jsonl,
                emit_function,
                endings,
                json,
            };
            commands::collate::run(options).await?
        }
        Commands::Format {
            transcript,
            preamble,
        } => commands::format::run(&transcript, preamble).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
        },
    }

    Ok(())
}
