use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of the TICON table: a single constituent observed at a single station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ObservationRow {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    /// Constituent name in TICON convention (e.g. `LM2`, not `LDA2`)
    pub con: String,

    /// Amplitude in centimeters
    #[validate(range(min = 0.0))]
    pub amp: f64,

    /// Phase lag in degrees, not normalized
    pub pha: f64,

    #[serde(default)]
    pub amp_std: Option<f64>,

    #[serde(default)]
    pub pha_std: Option<f64>,

    #[serde(default)]
    pub missing_obs: Option<f64>,

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

    #[serde(rename = "type", default)]
    pub gauge_type: String,

    pub country: String,

    pub record_quality: String,

    #[serde(default)]
    pub datum_information: String,
}

impl ObservationRow {
    /// Minimal row used by tests and benchmarks; metadata fields take neutral values.
    pub fn new(lat: f64, lon: f64, con: &str, amp: f64, pha: f64) -> Self {
        Self {
            lat,
            lon,
            con: con.to_string(),
            amp,
            pha,
            amp_std: None,
            pha_std: None,
            missing_obs: None,
            no_of_obs: None,
            years_of_obs: None,
            start_date: String::new(),
            end_date: String::new(),
            gesla_source: String::new(),
            tide_gauge_name: String::new(),
            gauge_type: String::new(),
            country: String::new(),
            record_quality: String::new(),
            datum_information: String::new(),
        }
    }

    pub fn with_station(mut self, gesla_source: &str, tide_gauge_name: &str) -> Self {
        self.gesla_source = gesla_source.to_string();
        self.tide_gauge_name = tide_gauge_name.to_string();
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = country.to_string();
        self
    }

    pub fn with_record_quality(mut self, record_quality: &str) -> Self {
        self.record_quality = record_quality.to_string();
        self
    }

    pub fn with_datum_information(mut self, datum_information: &str) -> Self {
        self.datum_information = datum_information.to_string();
        self
    }
}
