use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agroadvisor", version, about = "Farmer crop advisory CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the advisory pipeline for one field
    Advise(AdviseArgs),
    /// Re-run interactive setup
    Init,
    /// Validate config, load artifacts and test connections
    Check,
}

#[derive(Args)]
pub struct AdviseArgs {
    /// Field latitude
    #[arg(long)]
    pub lat: f64,

    /// Field longitude
    #[arg(long)]
    pub lon: f64,

    /// Soil type label (e.g. loam, clay)
    #[arg(long, default_value = "unknown")]
    pub soil_type: String,

    /// Soil nitrogen content
    #[arg(short, long)]
    pub n: f64,

    /// Soil phosphorus content
    #[arg(short, long)]
    pub p: f64,

    /// Soil potassium content
    #[arg(short, long)]
    pub k: f64,

    /// Soil pH
    #[arg(long)]
    pub ph: f64,

    /// Crop the farmer wants checked for viability
    #[arg(long)]
    pub crop: Option<String>,
}
