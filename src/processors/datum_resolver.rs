use crate::models::{classify_datum, DatumKind, Station};
use crate::readers::DatumOffsets;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum DatumFailureReason {
    /// No dataset record carries the station's gauge id
    NoMatch,
    /// More than one record carries the gauge id
    Ambiguous(usize),
    /// The single matching record has no numeric value for the classified kind
    MissingLevel(DatumKind),
}

impl fmt::Display for DatumFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatumFailureReason::NoMatch => write!(f, "no datum record"),
            DatumFailureReason::Ambiguous(n) => write!(f, "{} datum records", n),
            DatumFailureReason::MissingLevel(kind) => write!(f, "datum record has no {} value", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatumFailure {
    pub station_index: usize,
    pub tide_gauge_name: String,
    pub reason: DatumFailureReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatumReport {
    pub resolved: usize,
    pub failures: Vec<DatumFailure>,
}

impl DatumReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Datum Resolution Report ===\n");
        summary.push_str(&format!("Resolved: {}\n", self.resolved));
        summary.push_str(&format!("Unresolved: {}\n", self.failures.len()));

        if !self.failures.is_empty() {
            summary.push_str("\nFirst 10 failures:\n");
            for (i, failure) in self.failures.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. Station {} ({}): {}\n",
                    i + 1,
                    failure.station_index,
                    failure.tide_gauge_name,
                    failure.reason
                ));
            }
        }

        summary
    }
}

/// Classifies each station's datum and attaches the chart-zero correction.
///
/// The dataset stores datum heights above chart zero; the harmonic file wants
/// the datum expressed relative to chart zero, so the stored value is negated.
pub struct DatumResolver<'a> {
    offsets: &'a DatumOffsets,
}

impl<'a> DatumResolver<'a> {
    pub fn new(offsets: &'a DatumOffsets) -> Self {
        Self { offsets }
    }

    /// Resolve every station. Failures clear the station's datum fields and are
    /// reported; they never abort the pass.
    pub fn resolve_all(&self, stations: &mut [Station]) -> DatumReport {
        let mut report = DatumReport::default();

        for station in stations.iter_mut() {
            match self.resolve(station) {
                Ok((kind, value)) => {
                    station.datum_name = Some(kind);
                    station.datum_value = Some(value);
                    report.resolved += 1;
                }
                Err(reason) => {
                    station.clear_datum();
                    warn!(
                        "Datum resolution failed for station {} ({}): {}",
                        station.index, station.tide_gauge_name, reason
                    );
                    report.failures.push(DatumFailure {
                        station_index: station.index,
                        tide_gauge_name: station.tide_gauge_name.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            "Resolved datums for {} stations, {} unresolved",
            report.resolved,
            report.failures.len()
        );
        report
    }

    /// The datum kind and signed correction for one station.
    pub fn resolve(&self, station: &Station) -> Result<(DatumKind, f64), DatumFailureReason> {
        let kind = classify_datum(&station.datum_information);

        let record = match self.offsets.matches(&station.tide_gauge_name).as_slice() {
            [] => return Err(DatumFailureReason::NoMatch),
            [record] => *record,
            many => return Err(DatumFailureReason::Ambiguous(many.len())),
        };

        let level = record
            .level(kind)
            .ok_or(DatumFailureReason::MissingLevel(kind))?;

        Ok((kind, -level))
    }
}
