use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{DatumKind, ObservationRow};

/// Amplitude (cm) and raw phase (degrees) of one constituent at one station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub amp: f64,
    pub pha: f64,
}

/// A tide station aggregated from every observation row sharing its (lat, lon) pair.
///
/// Serializes to the intermediate JSON layout: fixed metadata keys, one key per
/// observed TICON constituent, and the name/datum annotations filled in by the
/// downstream passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub index: usize,
    pub lat: f64,
    pub lon: f64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub no_of_obs: Option<f64>,
    #[serde(default)]
    pub years_of_obs: Option<f64>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,

    pub gesla_source: String,
    pub tide_gauge_name: String,
    #[serde(default)]
    pub gauge_type: String,
    pub country: String,

    #[serde(rename = "country_from_ISO", default)]
    pub country_from_iso: String,

    #[serde(default)]
    pub record_quality: String,

    #[serde(default)]
    pub tz: String,

    #[serde(default)]
    pub datum_information: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datum_name: Option<DatumKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datum_value: Option<f64>,

    /// Keyed by TICON constituent name
    #[serde(flatten)]
    pub constituents: BTreeMap<String, Harmonic>,
}

impl Station {
    /// Build a station from the first row of its coordinate group.
    pub fn from_first_row(index: usize, row: &ObservationRow) -> Self {
        Self {
            index,
            lat: row.lat,
            lon: row.lon,
            name: String::new(),
            no_of_obs: row.no_of_obs,
            years_of_obs: row.years_of_obs,
            start_date: row.start_date.clone(),
            end_date: row.end_date.clone(),
            gesla_source: row.gesla_source.clone(),
            tide_gauge_name: row.tide_gauge_name.clone(),
            gauge_type: row.gauge_type.clone(),
            country: row.country.clone(),
            country_from_iso: row.country.clone(),
            record_quality: row.record_quality.clone(),
            tz: String::new(),
            datum_information: row.datum_information.clone(),
            datum_name: None,
            datum_value: None,
            constituents: BTreeMap::new(),
        }
    }

    /// Record a constituent; returns the previous value if the key was already present.
    pub fn insert_constituent(&mut self, con: &str, harmonic: Harmonic) -> Option<Harmonic> {
        self.constituents.insert(con.to_string(), harmonic)
    }

    pub fn constituent(&self, con: &str) -> Option<&Harmonic> {
        self.constituents.get(con)
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_datum_resolved(&self) -> bool {
        self.datum_name.is_some() && self.datum_value.is_some()
    }

    pub fn clear_datum(&mut self) {
        self.datum_name = None;
        self.datum_value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_station() -> Station {
        let row = ObservationRow::new(59.9, 10.7, "M2", 14.2, 301.5)
            .with_station("GESLA3", "oslo-nor-cmems")
            .with_country("NOR")
            .with_record_quality("No obvious issues");
        let mut station = Station::from_first_row(0, &row);
        station.insert_constituent("M2", Harmonic { amp: 14.2, pha: 301.5 });
        station.tz = "Etc/GMT-1".to_string();
        station
    }

    #[test]
    fn test_duplicate_constituent_overwrites() {
        let mut station = sample_station();
        let previous = station.insert_constituent("M2", Harmonic { amp: 1.0, pha: 2.0 });

        assert_eq!(previous, Some(Harmonic { amp: 14.2, pha: 301.5 }));
        assert_eq!(station.constituent("M2"), Some(&Harmonic { amp: 1.0, pha: 2.0 }));
        assert_eq!(station.constituents.len(), 1);
    }

    #[test]
    fn test_json_layout_flattens_constituents() {
        let station = sample_station();
        let value = serde_json::to_value(&station).unwrap();

        assert_eq!(value["M2"]["amp"], 14.2);
        assert_eq!(value["country_from_ISO"], "NOR");
        assert!(value.get("datum_name").is_none());
        assert!(value.get("datum_value").is_none());
    }

    #[test]
    fn test_json_roundtrip_keeps_annotations() {
        let mut station = sample_station();
        station.name = "Oslo, Norway".to_string();
        station.datum_name = Some(DatumKind::Lat);
        station.datum_value = Some(-0.92);

        let json = serde_json::to_string(&station).unwrap();
        let parsed: Station = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, station);
        assert!(parsed.is_datum_resolved());
        assert!(parsed.has_name());
    }
}
