use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snapnews_core::{AppConfig, Components};

mod commands;

#[derive(Parser)]
#[command(name = "snapnews")]
#[command(author, version, about = "A terminal news dashboard with streamed AI summaries")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI dashboard
    Run,
    /// List the tag taxonomy
    Tags,
    /// Fetch news for the given tags and print them
    Fetch {
        /// Tag to search for (repeatable)
        #[arg(short = 't', long = "tag", required = true)]
        tags: Vec<String>,
        /// Number of articles to request
        #[arg(short = 'l', long)]
        limit: Option<usize>,
        /// Print articles as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch news for the given tags and stream a summary to stdout
    Summarize {
        /// Tag to search for (repeatable)
        #[arg(short = 't', long = "tag", required = true)]
        tags: Vec<String>,
    },
}

/// Log to stderr, or to the data-dir log file while the TUI owns the terminal
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        std::fs::create_dir_all(config.data_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let is_tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, is_tui)?;

    if matches!(cli.command, Some(Commands::Tags)) {
        return commands::tags::run(&config);
    }

    // Everything past this point talks to both APIs
    config.require_credentials()?;
    let components = Arc::new(Components::new(config.clone()));

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(components).await,
        Some(Commands::Tags) => commands::tags::run(&config),
        Some(Commands::Fetch { tags, limit, json }) => {
            commands::fetch::run(&components, &tags, limit, json).await
        }
        Some(Commands::Summarize { tags }) => commands::summarize::run(&components, &tags).await,
    }
}
