use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::Station;
use crate::processors::{
    AggregationStats, DatumReport, DatumResolver, EnrichmentStats, NameEnricher, PlaceNamer,
    StationAggregator,
};
use crate::readers::{DatumOffsets, ObservationReader, StationStore};
use crate::utils::progress::ProgressReporter;
use crate::writers::{GeoJsonWriter, HarmonicFileInfo, HarmonicOptions, HarmonicWriter};
use std::path::Path;
use tracing::info;

/// Everything a full run produced, for reporting.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub aggregation: Option<AggregationStats>,
    pub enrichment: EnrichmentStats,
    pub datums: DatumReport,
    pub harmonics: HarmonicFileInfo,
}

/// Where a full run reads from and writes to.
#[derive(Debug, Clone, Copy)]
pub struct PipelinePaths<'a> {
    pub observations: &'a Path,
    pub stations: &'a Path,
    pub datums: &'a Path,
    pub harmonics: &'a Path,
    pub geojson: Option<&'a Path>,
}

/// Sequential TICON -> harmonics pipeline.
///
/// Each step is usable on its own; [`run`](Self::run) chains them in order.
/// Station order (index) and constituent-table order are the only orderings
/// the output depends on, so nothing here runs concurrently.
pub struct TidePipeline {
    config: PipelineConfig,
    rebuild: bool,
    redo_names: bool,
}

impl TidePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            rebuild: false,
            redo_names: false,
        }
    }

    pub fn with_rebuild(mut self, rebuild: bool) -> Self {
        self.rebuild = rebuild;
        self
    }

    pub fn with_redo_names(mut self, redo_names: bool) -> Self {
        self.redo_names = redo_names;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn build_stations(&self, observations: &Path) -> Result<(Vec<Station>, AggregationStats)> {
        let rows = ObservationReader::new().read_observations(observations)?;
        StationAggregator::new(&self.config).aggregate(&rows)
    }

    pub async fn name_stations<N: PlaceNamer>(
        &self,
        stations: &mut [Station],
        checkpoint: &Path,
        namer: N,
        progress: Option<&ProgressReporter>,
    ) -> Result<EnrichmentStats> {
        NameEnricher::new(namer, checkpoint)
            .with_delay(self.config.name_delay())
            .enrich(stations, self.redo_names, progress)
            .await
    }

    pub fn resolve_datums(&self, stations: &mut [Station], offsets: &DatumOffsets) -> DatumReport {
        DatumResolver::new(offsets).resolve_all(stations)
    }

    pub fn export(
        &self,
        stations: &[Station],
        harmonics: &Path,
        geojson: Option<&Path>,
    ) -> Result<HarmonicFileInfo> {
        if let Some(path) = geojson {
            GeoJsonWriter::new().write(stations, path)?;
        }
        HarmonicWriter::new(HarmonicOptions::from_config(&self.config)).write(stations, harmonics)
    }

    /// Full run. Inputs are read and validated before anything is written; the
    /// station JSON is reused as a checkpoint unless a rebuild is requested.
    pub async fn run<N: PlaceNamer>(
        &self,
        paths: PipelinePaths<'_>,
        namer: N,
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();

        let offsets = DatumOffsets::load(paths.datums)?;

        let mut stations = if self.rebuild || !paths.stations.exists() {
            let (stations, stats) = self.build_stations(paths.observations)?;
            StationStore::save(paths.stations, &stations)?;
            report.aggregation = Some(stats);
            stations
        } else {
            info!("Resuming from {}", paths.stations.display());
            StationStore::load(paths.stations)?
        };

        report.enrichment = self
            .name_stations(&mut stations, paths.stations, namer, progress)
            .await?;

        report.datums = self.resolve_datums(&mut stations, &offsets);

        if let Some(path) = paths.geojson {
            GeoJsonWriter::new().write(&stations, path)?;
        }
        StationStore::save(paths.stations, &stations)?;
        report.harmonics = self.export(&stations, paths.harmonics, None)?;

        Ok(report)
    }
}
