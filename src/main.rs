use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::debug;

use aqihorizon::view::{Legend, LocationList};
use aqihorizon::{AqiConfig, AqiError, Dashboard, DashboardView, severity};

#[derive(Parser)]
#[command(name = "aqihorizon")]
#[command(about = "AQI Horizon - air quality monitoring and prediction in your terminal")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the station and city directory
    Search {
        /// City, station or region name
        query: String,
    },
    /// Select a location and show its current AQI and 24-hour forecast
    Show {
        /// City, station or region name
        query: String,
        /// Which search result to select (1-based)
        #[arg(short, long, default_value_t = 1)]
        pick: usize,
    },
    /// List every location in the directory
    Stations,
    /// Print the AQI color scale
    Scale,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AqiError>() {
                Some(aqi_err) if aqi_err.is_notice() => {
                    println!("{}", aqi_err.user_message());
                    return ExitCode::SUCCESS;
                }
                Some(aqi_err) => eprintln!("Error: {}", aqi_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone();
    let config = AqiConfig::load_from_path(config_path.clone())?;
    aqihorizon::logging::init(&config.logging, cli.verbose)?;
    debug!("Configuration loaded: {:?}", config);

    let mut dashboard =
        Dashboard::from_config(&config).context("Failed to set up the dashboard")?;

    match cli.command {
        None => print_welcome(&dashboard, &config, config_path, cli.verbose),
        Some(Commands::Search { query }) => {
            let results = dashboard.submit_query(&query).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                println!("Search Results for \"{}\"", query.trim());
                print!("{}", LocationList(&results));
            }
        }
        Some(Commands::Show { query, pick }) => {
            let results = dashboard.submit_query(&query).await?;
            let location = pick
                .checked_sub(1)
                .and_then(|index| results.get(index))
                .cloned()
                .ok_or_else(|| {
                    anyhow!(
                        "--pick {pick} is out of range, the search returned {} locations",
                        results.len()
                    )
                })
                .with_context(|| format!("Invalid arguments for show \"{}\"", query.trim()))?;

            if !cli.json {
                println!("Loading AQI data for {}...", location.display_name());
            }
            let data = dashboard.select(location).await?;
            let view = DashboardView::build(data, config.display.pollutant_chart_hours);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!();
                print!("{view}");
            }
        }
        Some(Commands::Stations) => {
            let entries = dashboard.directory().entries();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(entries)?);
            } else {
                println!("Directory ({} locations)", entries.len());
                print!("{}", LocationList(entries));
            }
        }
        Some(Commands::Scale) => {
            let legend = severity::legend();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&legend)?);
            } else {
                print!("{}", Legend(&legend));
            }
        }
    }

    Ok(())
}

fn print_welcome(
    dashboard: &Dashboard,
    config: &AqiConfig,
    config_path: Option<PathBuf>,
    verbose: bool,
) {
    println!("AQI Horizon v{}", aqihorizon::VERSION);
    println!("Air Quality Monitoring & Prediction");
    println!();
    println!("Select a location to begin: aqihorizon show <name>");
    println!();
    println!("Popular locations:");
    print!("{}", LocationList(dashboard.popular()));
    println!();
    println!("Data is simulated locally, no setup required.");

    if verbose {
        let path = config_path
            .or_else(AqiConfig::get_config_path)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string());
        println!();
        println!("Using config from: {path}");
        println!(
            "Directory: {}",
            config
                .directory
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        println!(
            "Simulated latency: search {} ms, data {} ms",
            config.simulation.search_latency_ms, config.simulation.generation_latency_ms
        );
        println!("Log level: {}", config.logging.level);
    }
}
