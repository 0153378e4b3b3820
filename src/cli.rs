use clap::{Parser, Subcommand};
use std::path::PathBuf;

use geofetch::modules::Region;

#[derive(Parser, Debug)]
#[command(name = "geofetch")]
#[command(about = "Fetch geospatial datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan and fetch entries from a data-source module
    Fetch(FetchArgs),
    /// List registered modules and their options
    Modules,
    /// List presets from the user's preset file
    Presets,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Module to run, e.g. "gebco"
    pub module: String,

    /// Region of interest as west/east/south/north
    #[arg(short = 'R', long, allow_hyphen_values = true)]
    pub region: Option<Region>,

    /// Module option as key=value; may be repeated
    #[arg(short = 'O', long = "opt", value_parser = parse_key_val)]
    pub options: Vec<(String, String)>,

    /// Apply this preset's hook pipeline after each fetch
    #[arg(long)]
    pub preset: Option<String>,

    /// Destination directory (defaults to the configured output dir)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Print planned entries as JSON instead of fetching
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.trim().to_string(), value.trim().to_string())),
        None => Err(format!("expected key=value, got '{s}'")),
    }
}
