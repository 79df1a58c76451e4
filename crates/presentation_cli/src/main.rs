//! met6h CLI
//!
//! Runs the Met.no six-hour forecast entity, fetches a one-off forecast,
//! checks that Met.no answers, or prints the effective configuration.

#![allow(clippy::print_stdout)]

mod output;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use application::{ATTR_FORECAST_JSON, SixHoursWeather};
use clap::{Parser, Subcommand};
use domain::{GeoLocation, LocationName};
use infrastructure::{
    AppConfig, FORECAST_REFRESH_TASK, MetNoForecastAdapter, SchedulerConfig, TaskEvent,
    TaskScheduler, TaskStats, create_forecast_refresh_task, init_logging,
};
use tracing::{info, warn};

/// met6h CLI
#[derive(Parser)]
#[command(name = "met6h")]
#[command(author, version, about = "Met.no next 6 hours forecast", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish the forecast and refresh it every 40-49 minutes until Ctrl-C
    Run {
        /// Configuration file (default: ./met6h.toml if present)
        #[arg(short, long, env = "MET6H_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Fetch the forecast once and print it
    ///
    /// Example: met6h fetch --lat 59.9139 --lon 10.7522 --name Oslo
    Fetch {
        /// Latitude (-90.0 to 90.0)
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude (-180.0 to 180.0)
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Location name
        #[arg(short, long, default_value = "Home")]
        name: String,

        /// Print the forecast JSON attribute instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check that the Met.no service answers (used by container healthchecks)
    Health {
        /// Configuration file (default: ./met6h.toml if present)
        #[arg(short, long, env = "MET6H_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file (default: ./met6h.toml if present)
        #[arg(short, long, env = "MET6H_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };
    Ok(config)
}

fn build_weather(
    config: &AppConfig,
    name: LocationName,
    location: GeoLocation,
) -> anyhow::Result<SixHoursWeather> {
    let adapter = MetNoForecastAdapter::with_config(config.metno.to_client_config())
        .context("Failed to create Met.no client")?;
    Ok(SixHoursWeather::new(name, location, Arc::new(adapter)))
}

/// Log a refresh outcome together with the state the entity now publishes
fn log_refresh(weather: &SixHoursWeather, event: &TaskEvent, stats: Option<&TaskStats>) {
    let succeeded = stats.map_or(0, |s| s.success_count);
    let failed = stats.map_or(0, |s| s.failure_count);
    if event.success {
        info!(
            entity = %weather.unique_id(),
            succeeded,
            failed,
            temperature = ?weather.temperature(),
            condition = ?weather.condition(),
            periods = weather.forecast().map_or(0, |f| f.len()),
            duration_ms = event.duration_ms,
            "Forecast published"
        );
    } else {
        warn!(
            entity = %weather.unique_id(),
            succeeded,
            failed,
            error = event.error.as_deref().unwrap_or("unknown"),
            published = weather.published().is_some(),
            "Forecast refresh failed, previous state kept"
        );
    }
}

async fn run(config_path: Option<&Path>, verbose: u8) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    config.validate().context("Invalid configuration")?;
    init_logging(&config.logging, verbose)?;

    let weather = Arc::new(build_weather(
        &config,
        config.location.to_location_name()?,
        config.location.to_geo_location()?,
    )?);
    info!(
        entity = %weather.unique_id(),
        lat = weather.location().latitude(),
        lon = weather.location().longitude(),
        "Starting {}",
        weather.name()
    );

    if config.update.run_on_startup {
        match weather.update().await {
            Ok(()) => info!(
                periods = weather.forecast().map_or(0, |f| f.len()),
                "Initial forecast published"
            ),
            Err(e) => warn!(error = %e, "Initial forecast update failed"),
        }
    }

    let interval = config.update.pick_scan_interval();
    let scheduler = TaskScheduler::new(SchedulerConfig::default()).await?;
    let mut events = scheduler
        .take_event_receiver()
        .context("Scheduler event receiver already taken")?;

    scheduler
        .add_repeated_task(
            FORECAST_REFRESH_TASK,
            interval,
            create_forecast_refresh_task(Arc::clone(&weather)),
        )
        .await?;
    info!(interval_minutes = interval.as_secs() / 60, "Refresh scheduled");

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                let stats = scheduler.get_task_stats(FORECAST_REFRESH_TASK);
                log_refresh(&weather, &event, stats.as_ref());
            },
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Shutting down");
                break;
            }
        }
    }

    scheduler.stop().await?;
    Ok(())
}

/// Probe Met.no through the configured client
async fn check_health(config: &AppConfig) -> anyhow::Result<bool> {
    let weather = build_weather(
        config,
        config.location.to_location_name()?,
        config.location.to_geo_location()?,
    )?;
    Ok(weather.is_available().await)
}

async fn fetch(lat: f64, lon: f64, name: String, json: bool, verbose: u8) -> anyhow::Result<()> {
    let config = load_config(None)?;
    init_logging(&config.logging, verbose)?;

    let location = GeoLocation::new(lat, lon)?;
    let weather = build_weather(&config, LocationName::new(name)?, location)?;
    weather.update().await.context("Forecast update failed")?;

    let published = weather
        .published()
        .context("No forecast published after update")?;

    if json {
        let attributes = weather.extra_state_attributes();
        let forecast_json = attributes
            .get(ATTR_FORECAST_JSON)
            .context("Forecast attribute missing")?;
        let value: serde_json::Value = serde_json::from_str(forecast_json)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", weather.name());
    println!("{}", output::current_line(&published.snapshot.current));
    println!();
    for period in &published.snapshot.periods {
        println!("{}", output::period_line(period));
    }
    println!();
    println!("{}", weather.attribution());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => run(config.as_deref(), cli.verbose).await?,

        Commands::Fetch {
            lat,
            lon,
            name,
            json,
        } => fetch(lat, lon, name, json, cli.verbose).await?,

        Commands::Health { config } => {
            let config = load_config(config.as_deref())?;
            init_logging(&config.logging, cli.verbose)?;
            if check_health(&config).await? {
                println!("✅ Met.no reachable");
            } else {
                println!("❌ Met.no unreachable");
                std::process::exit(1);
            }
        },

        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
            if let Err(e) = config.validate() {
                println!();
                println!("# warning: {e}");
            }
        },
    }

    Ok(())
}
