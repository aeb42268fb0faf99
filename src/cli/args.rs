use crate::utils::constants::{DEFAULT_GEOJSON_FILE, DEFAULT_HARMONICS_FILE, DEFAULT_STATIONS_FILE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tidecon-processor")]
#[command(about = "Convert TICON tidal constituents into XTide harmonic files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors, no progress bars")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Configuration file [default: tidecon.toml if present]")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Group TICON rows into stations and write the station JSON
    Aggregate {
        #[arg(short, long, help = "Input TICON CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_STATIONS_FILE)]
        output: PathBuf,
    },

    /// Reverse-geocode station names, checkpointing after every lookup
    Name {
        #[arg(short, long, default_value = DEFAULT_STATIONS_FILE)]
        stations: PathBuf,

        #[arg(long, help = "Clear all existing names first")]
        redo: bool,

        #[arg(long, help = "Use coordinate fallback names without network access")]
        offline: bool,

        #[arg(long, help = "Delay after each lookup in milliseconds [default: from config]")]
        delay_ms: Option<u64>,
    },

    /// Resolve each station's datum from a datum-offset dataset
    Datum {
        #[arg(short, long, default_value = DEFAULT_STATIONS_FILE)]
        stations: PathBuf,

        #[arg(short, long, help = "Datum-offset JSON dataset")]
        datums: PathBuf,
    },

    /// Write the harmonic constituent text file (and optionally GeoJSON)
    Export {
        #[arg(short, long, default_value = DEFAULT_STATIONS_FILE)]
        stations: PathBuf,

        #[arg(short, long, default_value = DEFAULT_HARMONICS_FILE)]
        output: PathBuf,

        #[arg(
            long,
            num_args = 0..=1,
            default_missing_value = DEFAULT_GEOJSON_FILE,
            help = "Also write a GeoJSON point layer [bare flag: TICON-4.geojson]"
        )]
        geojson: Option<PathBuf>,

        #[arg(long, help = "Omit stations whose datum did not resolve")]
        skip_unresolved: bool,
    },

    /// Run the whole pipeline: aggregate, name, resolve datums, export
    Run {
        #[arg(short, long, help = "Input TICON CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = DEFAULT_STATIONS_FILE)]
        stations: PathBuf,

        #[arg(short, long, help = "Datum-offset JSON dataset")]
        datums: PathBuf,

        #[arg(short, long, default_value = DEFAULT_HARMONICS_FILE)]
        output: PathBuf,

        #[arg(
            long,
            num_args = 0..=1,
            default_missing_value = DEFAULT_GEOJSON_FILE,
            help = "Also write a GeoJSON point layer [bare flag: TICON-4.geojson]"
        )]
        geojson: Option<PathBuf>,

        #[arg(long, help = "Rebuild the station JSON from the CSV even if it exists")]
        rebuild: bool,

        #[arg(long, help = "Clear all existing names first")]
        redo_names: bool,

        #[arg(long, help = "Use coordinate fallback names without network access")]
        offline: bool,

        #[arg(long, help = "Omit stations whose datum did not resolve")]
        skip_unresolved: bool,
    },

    /// Summarize the datum descriptions present in a TICON CSV
    Stats {
        #[arg(short, long, help = "Input TICON CSV file")]
        input: PathBuf,
    },

    /// One-off migration: tag datum records with gauge ids by array position
    TagDatums {
        #[arg(short, long, default_value = DEFAULT_STATIONS_FILE)]
        stations: PathBuf,

        #[arg(short, long, help = "Datum-offset JSON dataset, rewritten in place")]
        datums: PathBuf,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Aggregate { .. } => "aggregate",
            Commands::Name { .. } => "name",
            Commands::Datum { .. } => "datum",
            Commands::Export { .. } => "export",
            Commands::Run { .. } => "run",
            Commands::Stats { .. } => "stats",
            Commands::TagDatums { .. } => "tag-datums",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["tidecon-processor"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_run_without_geojson_writes_none() {
        match parse(&["run", "-i", "TICON-4.csv", "-d", "datums.json"]) {
            Commands::Run {
                stations,
                output,
                geojson,
                ..
            } => {
                assert_eq!(stations, Path::new(DEFAULT_STATIONS_FILE));
                assert_eq!(output, Path::new(DEFAULT_HARMONICS_FILE));
                assert_eq!(geojson, None);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_bare_geojson_flag_uses_default_file() {
        match parse(&["run", "-i", "TICON-4.csv", "-d", "datums.json", "--geojson"]) {
            Commands::Run { geojson, .. } => {
                assert_eq!(geojson.as_deref(), Some(Path::new(DEFAULT_GEOJSON_FILE)));
            }
            _ => panic!("expected run"),
        }

        match parse(&["export", "--geojson", "out/points.geojson"]) {
            Commands::Export { geojson, .. } => {
                assert_eq!(geojson.as_deref(), Some(Path::new("out/points.geojson")));
            }
            _ => panic!("expected export"),
        }
    }
}
