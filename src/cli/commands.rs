use crate::analyzers::DatumAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::geocoding::{NominatimClient, OfflineNamer};
use crate::processors::{tag_datum_records, PipelinePaths, TidePipeline};
use crate::readers::{DatumOffsets, ObservationReader, StationStore};
use crate::utils::constants::DEFAULT_CONFIG_FILE;
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::{debug, info};

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet);

    let mut config = PipelineConfig::load(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_FILE))?;
    debug!("Configuration: {:?}", config);
    let quiet = cli.quiet;

    match cli.command {
        Commands::Aggregate { input, output } => {
            info!("Aggregating {}", input.display());

            let pipeline = TidePipeline::new(config);
            let (stations, stats) = pipeline.build_stations(&input)?;
            StationStore::save(&output, &stations)?;

            println!("\n{}", stats.summary());
            println!("Wrote {} stations to {}", stations.len(), output.display());
        }

        Commands::Name {
            stations: stations_path,
            redo,
            offline,
            delay_ms,
        } => {
            if let Some(ms) = delay_ms {
                config.name_delay_ms = ms;
            }
            let mut stations = StationStore::load(&stations_path)?;
            let pipeline = TidePipeline::new(config).with_redo_names(redo);
            let to_name = if redo {
                stations.len()
            } else {
                stations.iter().filter(|s| !s.has_name()).count()
            };
            let progress = ProgressReporter::new(to_name as u64, "Naming stations...", quiet);

            let stats = if offline {
                pipeline
                    .name_stations(&mut stations, &stations_path, OfflineNamer, Some(&progress))
                    .await?
            } else {
                let client = NominatimClient::new(pipeline.config())?;
                pipeline
                    .name_stations(&mut stations, &stations_path, client, Some(&progress))
                    .await?
            };

            progress.finish_with_message(&format!("Named {} stations", stats.named));
            println!(
                "{} stations named, {} already named",
                stats.named, stats.already_named
            );
        }

        Commands::Datum {
            stations: stations_path,
            datums,
        } => {
            let offsets = DatumOffsets::load(&datums)?;
            let mut stations = StationStore::load(&stations_path)?;

            let pipeline = TidePipeline::new(config);
            let report = pipeline.resolve_datums(&mut stations, &offsets);
            StationStore::save(&stations_path, &stations)?;

            println!("\n{}", report.summary());
        }

        Commands::Export {
            stations: stations_path,
            output,
            geojson,
            skip_unresolved,
        } => {
            config.skip_unresolved |= skip_unresolved;
            let stations = StationStore::load(&stations_path)?;

            let pipeline = TidePipeline::new(config);
            let file_info = pipeline.export(&stations, &output, geojson.as_deref())?;

            println!("\n{}", file_info.summary());
            println!("Wrote {}", output.display());
        }

        Commands::Run {
            input,
            stations,
            datums,
            output,
            geojson,
            rebuild,
            redo_names,
            offline,
            skip_unresolved,
        } => {
            config.skip_unresolved |= skip_unresolved;
            let paths = PipelinePaths {
                observations: &input,
                stations: &stations,
                datums: &datums,
                harmonics: &output,
                geojson: geojson.as_deref(),
            };
            let pipeline = TidePipeline::new(config)
                .with_rebuild(rebuild)
                .with_redo_names(redo_names);
            let progress = ProgressReporter::new_spinner("Naming stations...", quiet);

            let report = if offline {
                pipeline.run(paths, OfflineNamer, Some(&progress)).await?
            } else {
                let client = NominatimClient::new(pipeline.config())?;
                pipeline.run(paths, client, Some(&progress)).await?
            };
            progress.finish_with_message("Pipeline complete");

            if let Some(stats) = &report.aggregation {
                println!("\n{}", stats.summary());
            }
            println!(
                "Names: {} looked up, {} already present",
                report.enrichment.named, report.enrichment.already_named
            );
            println!("\n{}", report.datums.summary());
            println!("{}", report.harmonics.summary());
        }

        Commands::Stats { input } => {
            let rows = ObservationReader::new().read_observations(&input)?;
            let stats = DatumAnalyzer::new().summarize(&rows);
            println!("{}", stats.detailed_summary());
        }

        Commands::TagDatums {
            stations: stations_path,
            datums,
        } => {
            let stations = StationStore::load(&stations_path)?;
            let mut records = DatumOffsets::load(&datums)?.into_records();

            let report = tag_datum_records(&stations, &mut records);
            DatumOffsets::new(records).save(&datums)?;

            println!(
                "Tagged {} datum records ({} retagged, {} records beyond the station list, {} stations without a record)",
                report.tagged, report.retagged, report.untouched_records, report.stations_without_record
            );
        }
    }

    Ok(())
}

/// Structured logging to stderr; `RUST_LOG` overrides the flag-derived level.
fn setup_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tidecon_processor={}", log_level)));

    // try_init: a subscriber may already be installed when run is called from tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}
