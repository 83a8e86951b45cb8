//! Party finder watcher CLI
//!
//! Runs the Discord bot and its one-shot setup commands.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use pfwatch::{
    error::{AppError, Result},
    models::{Config, DataCentre, KnownValue, Region},
    pipeline::{self, ListingTracker, NewListing},
    services::{ListingExtractor, scrape_listings},
    sink::DiscordSink,
    utils::HttpSource,
};

/// pfwatch - Party Finder roster messages for Discord
#[derive(Parser, Debug)]
#[command(
    name = "pfwatch",
    version,
    about = "Keeps Discord messages in sync with party finder listings"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Update every tracked message periodically
    Run,

    /// Write a default configuration file
    SetupConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Post the first message for a new tracked listing
    SetupMessage {
        /// Unique name of the tracked listing; prompted if absent
        #[arg(long)]
        name: Option<String>,

        /// Exact duty name; prompted if absent
        #[arg(long)]
        duty_name: Option<String>,

        /// Data centre; prompted if absent
        #[arg(long, value_parser = parse_data_centre)]
        data_centre: Option<DataCentre>,

        /// Discord channel to post in; prompted if absent
        #[arg(long)]
        channel_id: Option<u64>,
    },

    /// Scrape once and print the listings as JSON
    Scrape {
        /// Only keep listings for this duty
        #[arg(long, requires = "data_centre")]
        duty_name: Option<String>,

        /// Only keep listings on this data centre
        #[arg(long, requires = "duty_name")]
        data_centre: Option<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Value parser for `--data-centre`; lists the known names on error.
fn parse_data_centre(value: &str) -> std::result::Result<DataCentre, String> {
    DataCentre::from_known(value).ok_or_else(|| {
        let known: Vec<&str> = DataCentre::ALL.iter().map(|dc| dc.as_str()).collect();
        format!("expected one of: {}", known.join(", "))
    })
}

/// Initialize logging. `--verbose` wins over the configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Log filter before `--verbose` is applied. Falls back to `info` when no
/// config could be loaded.
fn configured_level(config: Option<&Config>) -> &str {
    config.map_or("info", |c| c.logging.level.as_str())
}

fn prompt_error(e: dialoguer::Error) -> AppError {
    AppError::config(format!("prompt failed: {e}"))
}

fn prompt_text(theme: &ColorfulTheme, label: &str) -> Result<String> {
    Input::<String>::with_theme(theme)
        .with_prompt(label)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map(|input| input.trim().to_string())
        .map_err(prompt_error)
}

fn prompt_data_centre(theme: &ColorfulTheme) -> Result<DataCentre> {
    let labels: Vec<&str> = DataCentre::ALL.iter().map(|dc| dc.as_str()).collect();
    let choice = Select::with_theme(theme)
        .with_prompt("Data centre")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(DataCentre::ALL[choice])
}

fn prompt_channel_id(theme: &ColorfulTheme) -> Result<u64> {
    Input::<u64>::with_theme(theme)
        .with_prompt("Channel ID")
        .interact_text()
        .map_err(prompt_error)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::SetupConfig { force } = cli.command {
        init_logging(cli.verbose, "info");
        if cli.config.exists() && !force {
            log::warn!(
                "Config already exists at {}. Use --force to overwrite.",
                cli.config.display()
            );
            return Ok(());
        }
        Config::default().save(&cli.config)?;
        log::info!("Fill in url, token and listings, then run 'setup-message'.");
        return Ok(());
    }

    let loaded = Config::load(&cli.config);
    init_logging(cli.verbose, configured_level(loaded.as_ref().ok()));
    let config = match loaded {
        Ok(config) => {
            log::info!("Config loaded from {}", cli.config.display());
            config
        }
        Err(e) => {
            log::error!("Unable to load {}: {e}", cli.config.display());
            return Err(e);
        }
    };

    match cli.command {
        Command::SetupConfig { .. } => {}

        Command::Run => {
            config.validate()?;

            let source = HttpSource::new(&config.http, &config.url)?;
            let sink = DiscordSink::new(&config.token);
            let tracker = ListingTracker::new(Box::new(source), &config)?;

            log::info!("pfwatch starting...");
            pipeline::run_forever(tracker, &sink, Duration::from_secs(config.period_secs)).await;
        }

        Command::SetupMessage {
            name,
            duty_name,
            data_centre,
            channel_id,
        } => {
            let mut config = config;
            let theme = ColorfulTheme::default();

            let name = match name {
                Some(name) => name,
                None => prompt_text(&theme, "Listing name (unique)")?,
            };
            let duty_name = match duty_name {
                Some(duty_name) => duty_name,
                None => prompt_text(&theme, "Duty name")?,
            };
            let data_centre = match data_centre {
                Some(dc) => dc,
                None => prompt_data_centre(&theme)?,
            };
            let channel_id = match channel_id {
                Some(id) => id,
                None => prompt_channel_id(&theme)?,
            };

            let source = HttpSource::new(&config.http, &config.url)?;
            let sink = DiscordSink::new(&config.token);
            let tracked = pipeline::setup_message(
                &mut config,
                &source,
                &sink,
                NewListing {
                    name,
                    duty_name,
                    data_centre,
                    channel_id,
                },
            )
            .await?;

            config.save(&cli.config)?;
            log::info!(
                "Added '{}' (message {}) to {}",
                tracked.name,
                tracked.message_id,
                cli.config.display()
            );
        }

        Command::Scrape {
            duty_name,
            data_centre,
        } => {
            let source = HttpSource::new(&config.http, &config.url)?;
            let extractor = ListingExtractor::new()?;
            let mut listings = scrape_listings(&source, &extractor).await?;

            if let (Some(duty_name), Some(data_centre)) = (duty_name, data_centre) {
                let region = Region::parse(&data_centre);
                listings = pipeline::filter_listings(&listings, &duty_name, &region);
            }

            log::info!("Scraped {} listings", listings.len());
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} tracked listings)",
                config.listings.len()
            );
        }
    }

    Ok(())
}
