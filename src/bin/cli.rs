//! Homework status notifier CLI
//!
//! Polls the review API and relays status changes to a Telegram chat.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use homework_notifier::{
    error::Result,
    models::{Config, Credentials, LoggingConfig},
    pipeline::Poller,
    services::{Notifier, PracticumClient, TelegramMessenger},
    utils::http,
};

/// Homework review status notifier
#[derive(Parser, Debug)]
#[command(name = "homework-notifier", version, about = "Homework review status notifier")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Poll for status changes until interrupted (default)
    Run,

    /// Run a single polling cycle and exit
    Once,

    /// Validate configuration and environment variables
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let command = cli.command.unwrap_or(Command::Run);

    // Logging level may come from the file, so the load error is reported afterwards.
    let loaded = Config::try_load(&cli.config);
    let level = match &loaded {
        Ok(Some(config)) => config.logging.level.clone(),
        _ => LoggingConfig::default().level,
    };
    init_logging(cli.verbose, &level);

    let config = match loaded {
        Ok(Some(config)) => {
            log::info!("Loaded configuration from {}", cli.config.display());
            config
        }
        Ok(None) => {
            log::info!(
                "No configuration at {}. Using defaults.",
                cli.config.display()
            );
            Config::default()
        }
        Err(e) if matches!(command, Command::Validate) => {
            log::error!("CRITICAL: Config load failed from {}: {}", cli.config.display(), e);
            return Err(e);
        }
        Err(e) => {
            log::warn!(
                "Config load failed from {}: {}. Using defaults.",
                cli.config.display(),
                e
            );
            Config::default()
        }
    };

    let credentials = Credentials::from_env();
    if let Err(e) = credentials.validate() {
        log::error!("CRITICAL: {}", e);
        return Err(e);
    }
    if let Err(e) = config.validate() {
        log::error!("CRITICAL: {}", e);
        return Err(e);
    }

    if let Command::Validate = command {
        log::info!("Configuration OK: {:?}", credentials);
        return Ok(());
    }

    let source = PracticumClient::new(&config.api, &credentials)?;
    let messenger = TelegramMessenger::new(
        http::create_messenger_client(&config.api)?,
        &config.telegram,
        &credentials,
    );
    let cursor = chrono::Utc::now().timestamp();
    let mut poller = Poller::new(
        source,
        Notifier::new(messenger),
        cursor,
        Duration::from_secs(config.poller.retry_period_secs),
    );

    match command {
        Command::Once => poller.run_cycle().await,
        _ => {
            log::info!(
                "Polling {} every {}s",
                config.api.endpoint,
                config.poller.retry_period_secs
            );
            // Run polls this once before the greeting, which installs the SIGINT handler.
            poller
                .run(&config.poller.greeting, async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        log::error!("Failed to listen for shutdown signal: {}", e);
                        std::future::pending::<()>().await;
                    }
                })
                .await;
        }
    }

    Ok(())
}
