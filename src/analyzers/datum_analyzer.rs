use crate::models::{classify_datum, DatumKind, ObservationRow};
use crate::utils::coordinates::CoordinateKey;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct DatumCount {
    pub datum_information: String,
    pub kind: DatumKind,
    pub stations: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatumStatistics {
    /// Distinct (lat, lon, datum_information) combinations
    pub unique_stations: usize,
    /// Most common description first
    pub counts: Vec<DatumCount>,
}

impl DatumStatistics {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== TICON Datums ===\n");

        let width = self
            .counts
            .iter()
            .map(|c| c.datum_information.len())
            .max()
            .unwrap_or(0);
        for count in &self.counts {
            summary.push_str(&format!(
                "{:<width$}  {:>6}  -> {}\n",
                count.datum_information,
                count.stations,
                count.kind,
                width = width
            ));
        }

        summary.push_str(&format!("\nTotal unique stations: {}\n", self.unique_stations));
        summary.push_str(&format!("Total datums: {}\n", self.counts.len()));
        summary
    }
}

/// Survey of the datum descriptions present in a TICON table, before any filtering.
pub struct DatumAnalyzer;

impl DatumAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, rows: &[ObservationRow]) -> DatumStatistics {
        let mut seen: HashSet<(CoordinateKey, &str)> = HashSet::new();
        let mut per_datum: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            let key = (CoordinateKey::new(row.lat, row.lon), row.datum_information.as_str());
            if seen.insert(key) {
                *per_datum.entry(row.datum_information.as_str()).or_default() += 1;
            }
        }

        let mut counts: Vec<DatumCount> = per_datum
            .into_iter()
            .map(|(text, stations)| DatumCount {
                datum_information: text.to_string(),
                kind: classify_datum(text),
                stations,
            })
            .collect();
        counts.sort_by(|a, b| {
            b.stations
                .cmp(&a.stations)
                .then_with(|| a.datum_information.cmp(&b.datum_information))
        });

        DatumStatistics {
            unique_stations: seen.len(),
            counts,
        }
    }
}

impl Default for DatumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
