mod classifier;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod reference;

use clap::Parser;
use classifier::DecisionForest;
use cli::{AdviseArgs, Cli, Commands};
use config::Config;
use datasources::{GeocodingClient, OpenMeteoClient};
use error::Result;
use logic::AdvisoryService;
use models::AdvisoryRequest;
use reference::{load_records, CropRangeTable};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
            Ok(())
        }
        Commands::Check => {
            let config = load_config(cli.config);
            check(&config).await
        }
        Commands::Advise(args) => {
            let config = load_config(cli.config);
            advise(&config, args).await
        }
    }
}

fn load_config(config_override: Option<std::path::PathBuf>) -> Config {
    match Config::load(config_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `agroadvisor init` to create a configuration.");
            std::process::exit(1);
        }
    }
}

/// Load both startup artifacts. Either one failing means the service has no
/// recommendation or viability capability, so the process refuses to serve.
fn load_artifacts(config: &Config) -> (CropRangeTable, DecisionForest) {
    let ranges = load_records(&config.data.dataset_path)
        .and_then(|records| CropRangeTable::from_records(&records));
    let ranges = match ranges {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Fatal: cannot load historical dataset: {}", e);
            std::process::exit(1);
        }
    };

    let forest = match DecisionForest::load(&config.data.model_path) {
        Ok(forest) => forest,
        Err(e) => {
            eprintln!("Fatal: cannot load classifier artifact: {}", e);
            std::process::exit(1);
        }
    };

    (ranges, forest)
}

fn build_geocoder(config: &Config) -> Result<Option<GeocodingClient>> {
    config
        .geocoding
        .as_ref()
        .filter(|c| c.enabled && !c.api_key.is_empty())
        .map(|c| GeocodingClient::new(c.clone()))
        .transpose()
}

async fn advise(config: &Config, args: AdviseArgs) -> Result<()> {
    let (ranges, forest) = load_artifacts(config);
    let climate = OpenMeteoClient::new(config.climate.clone())?;
    let geocoder = build_geocoder(config)?;

    let service = AdvisoryService::new(ranges, Box::new(forest), climate, geocoder);

    let request = AdvisoryRequest {
        lat: args.lat,
        lon: args.lon,
        soil_type: args.soil_type,
        n: args.n,
        p: args.p,
        k: args.k,
        ph: args.ph,
        user_crop: args.crop,
    };

    let response = service.advise(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn check(config: &Config) -> Result<()> {
    let (ranges, forest) = load_artifacts(config);
    println!(
        "Reference data: OK ({} crops, {} classes in classifier)",
        ranges.crop_count(),
        forest.classes.len()
    );
    println!(
        "Risk rules: {}",
        logic::RiskEngine::new().list_rules().join(", ")
    );

    let climate = OpenMeteoClient::new(config.climate.clone())?;
    match climate.test_connection().await {
        Ok(true) => println!("Climate archive: OK"),
        Ok(false) => println!("Climate archive: OFFLINE"),
        Err(e) => println!("Climate archive: OFFLINE ({})", e),
    }

    match build_geocoder(config)? {
        Some(geocoder) => match geocoder.test_connection().await {
            Ok(true) => println!("Geocoding: OK"),
            Ok(false) => println!("Geocoding: OFFLINE"),
            Err(e) => println!("Geocoding: OFFLINE ({})", e),
        },
        None => println!("Geocoding: not configured"),
    }

    Ok(())
}
