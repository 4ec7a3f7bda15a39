//! Farming assistant Top Tools - command line
//!
//! Runs the unit-cost estimator and the weather lookup from a terminal,
//! with the same fallbacks and saved preferences as the web panel.

use clap::{Parser, Subcommand};
use shared::{ResolveOptions, WeatherLookup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod external;
mod geolocation;
mod storage;

use commands::{EstimateArgs, PrefsArgs, WeatherArgs};
use config::Config;
use external::WeatherClient;
use geolocation::ConfiguredPosition;
use storage::FileStore;

#[derive(Parser, Debug)]
#[command(name = "farm-tools", version, about = "Farm input estimates and current weather")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the amount and cost of an input for an area
    Estimate(EstimateArgs),
    /// Show current weather
    Weather(WeatherArgs),
    /// Show or clear saved preferences
    Prefs(PrefsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_tools=info,shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    let cli = Cli::parse();

    tracing::debug!("Environment: {}", config.environment);
    let store = FileStore::new(&config.storage.preferences_path);

    let output = match &cli.command {
        Command::Estimate(args) => commands::estimate::run(args, &store),
        Command::Weather(args) => {
            let client = WeatherClient::new(&config.weather)?;
            let locator = ConfiguredPosition::new(config.geolocation.fixed_position()?);
            let lookup = WeatherLookup::new(ResolveOptions {
                geolocation_timeout: config.geolocation.timeout(),
            });
            commands::weather::run(args, &lookup, &client, &locator, &store).await?
        }
        Command::Prefs(args) => commands::prefs::run(args, &store)?,
    };

    println!("{}", output);
    Ok(())
}
