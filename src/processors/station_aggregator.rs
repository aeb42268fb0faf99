use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{Harmonic, ObservationRow, Station};
use crate::utils::coordinates::{nautical_timezone, CoordinateKey};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Counters from one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub total_rows: usize,
    pub coordinate_groups: usize,
    pub stations: usize,
    pub excluded_by_country: usize,
    pub excluded_by_quality: usize,
    /// Rows that overwrote an earlier row for the same station and constituent
    pub duplicate_constituents: usize,
}

impl AggregationStats {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Aggregation Report ===\n");
        summary.push_str(&format!("Observation rows: {}\n", self.total_rows));
        summary.push_str(&format!("Coordinate groups: {}\n", self.coordinate_groups));
        summary.push_str(&format!("Stations kept: {}\n", self.stations));
        summary.push_str(&format!(
            "Excluded by country: {}\n",
            self.excluded_by_country
        ));
        summary.push_str(&format!(
            "Excluded by record quality: {}\n",
            self.excluded_by_quality
        ));
        summary.push_str(&format!(
            "Duplicate constituents overwritten: {}\n",
            self.duplicate_constituents
        ));
        summary
    }
}

/// Groups observation rows into stations keyed by exact (lat, lon).
///
/// Known limitations, kept deliberately:
/// - metadata (including the country and quality used for filtering) comes from
///   the first row of each group; later rows are not checked for consistency
/// - a repeated constituent within a group overwrites the earlier value
pub struct StationAggregator<'a> {
    config: &'a PipelineConfig,
    excluded_countries: HashSet<&'a str>,
    included_record_qualities: HashSet<&'a str>,
}

impl<'a> StationAggregator<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            excluded_countries: config.excluded_countries.iter().map(String::as_str).collect(),
            included_record_qualities: config
                .included_record_qualities
                .iter()
                .map(String::as_str)
                .collect(),
        }
    }

    /// Build stations in the order their coordinate pair first appears in `rows`.
    pub fn aggregate(&self, rows: &[ObservationRow]) -> Result<(Vec<Station>, AggregationStats)> {
        let mut stats = AggregationStats {
            total_rows: rows.len(),
            ..Default::default()
        };

        let groups = group_by_coordinates(rows);
        stats.coordinate_groups = groups.len();

        let mut stations = Vec::new();
        for group in groups {
            let first = group[0];

            if !self.passes_country_filter(first) {
                stats.excluded_by_country += 1;
                continue;
            }
            if !self.included_record_qualities.contains(first.record_quality.as_str()) {
                stats.excluded_by_quality += 1;
                continue;
            }

            let mut station = Station::from_first_row(stations.len(), first);
            station.country_from_iso = self.config.country_name(&first.country);
            station.tz = nautical_timezone(first.lon)?;

            for row in &group {
                let harmonic = Harmonic {
                    amp: row.amp,
                    pha: row.pha,
                };
                if station.insert_constituent(&row.con, harmonic).is_some() {
                    stats.duplicate_constituents += 1;
                    warn!(
                        "Duplicate constituent {} at station {} ({}, {}); keeping the later row",
                        row.con, first.tide_gauge_name, first.lat, first.lon
                    );
                }
            }

            debug!(
                "Station {} {} with {} constituents",
                station.index,
                station.tide_gauge_name,
                station.constituents.len()
            );
            stations.push(station);
        }

        stats.stations = stations.len();
        info!(
            "Aggregated {} rows into {} stations ({} groups excluded)",
            stats.total_rows,
            stats.stations,
            stats.excluded_by_country + stats.excluded_by_quality
        );

        Ok((stations, stats))
    }

    fn passes_country_filter(&self, row: &ObservationRow) -> bool {
        if !self.excluded_countries.contains(row.country.as_str()) {
            return true;
        }
        self.config
            .carve_out_stations
            .iter()
            .any(|pattern| !pattern.is_empty() && row.tide_gauge_name.contains(pattern.as_str()))
    }
}

/// Rows grouped by coordinate pair, groups in first-appearance order, rows in input order.
fn group_by_coordinates(rows: &[ObservationRow]) -> Vec<Vec<&ObservationRow>> {
    let mut positions: HashMap<CoordinateKey, usize> = HashMap::new();
    let mut groups: Vec<Vec<&ObservationRow>> = Vec::new();

    for row in rows {
        let key = CoordinateKey::new(row.lat, row.lon);
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[position].push(row);
    }

    groups
}
