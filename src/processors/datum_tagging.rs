use crate::models::{DatumOffsetRecord, Station};
use tracing::{info, warn};

/// Outcome of the one-off gauge-id tagging migration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggingReport {
    pub tagged: usize,
    pub retagged: usize,
    pub untouched_records: usize,
    pub stations_without_record: usize,
}

/// Copy each station's gauge id onto the datum record at the same array position.
///
/// This is a maintenance task for datasets produced in station order without
/// ids. It is the only place position is trusted; run it once, review the
/// result, and let [`DatumResolver`](crate::processors::DatumResolver) match
/// by id from then on.
pub fn tag_datum_records(stations: &[Station], records: &mut [DatumOffsetRecord]) -> TaggingReport {
    let mut report = TaggingReport::default();

    if stations.len() != records.len() {
        warn!(
            "{} stations but {} datum records; tagging the first {} only",
            stations.len(),
            records.len(),
            stations.len().min(records.len())
        );
    }

    let mut ordered: Vec<&Station> = stations.iter().collect();
    ordered.sort_by_key(|s| s.index);

    for (station, record) in ordered.iter().zip(records.iter_mut()) {
        match &record.tide_gauge_name {
            Some(existing) if *existing == station.tide_gauge_name => {}
            Some(existing) => {
                warn!(
                    "Datum record for station {} was tagged '{}', retagging as '{}'",
                    station.index, existing, station.tide_gauge_name
                );
                report.retagged += 1;
            }
            None => {}
        }
        record.tide_gauge_name = Some(station.tide_gauge_name.clone());
        report.tagged += 1;
    }

    report.untouched_records = records.len().saturating_sub(stations.len());
    report.stations_without_record = stations.len().saturating_sub(records.len());

    info!("Tagged {} datum records", report.tagged);
    report
}
