use chrono::{Local, NaiveDate};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_EXCLUDED_COUNTRIES, DEFAULT_GEOCODER_URL,
    DEFAULT_INCLUDED_RECORD_QUALITIES, DEFAULT_NAME_DELAY_MS, DEFAULT_RESTRICTION,
    DEFAULT_USER_AGENT, ENV_PREFIX,
};

/// Run-wide settings, layered from defaults, an optional TOML file and
/// `TIDECON_*` environment variables (later sources win).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stations from these countries are dropped...
    pub excluded_countries: Vec<String>,

    /// ...unless their gauge id contains one of these substrings
    pub carve_out_stations: Vec<String>,

    /// Only stations with one of these record-quality labels are kept
    pub included_record_qualities: Vec<String>,

    /// Sleep after each reverse-geocoding call
    pub name_delay_ms: u64,

    pub geocoder_url: String,
    pub geocoder_email: String,
    pub user_agent: String,

    pub restriction: String,
    pub confidence: u8,

    /// `YYYYMMDD`; the run date when unset
    pub date_imported: Option<String>,

    /// ISO country code -> display name
    pub country_names: HashMap<String, String>,

    /// Leave stations without a resolved datum out of the harmonic file
    pub skip_unresolved: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            excluded_countries: DEFAULT_EXCLUDED_COUNTRIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            carve_out_stations: Vec::new(),
            included_record_qualities: DEFAULT_INCLUDED_RECORD_QUALITIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            name_delay_ms: DEFAULT_NAME_DELAY_MS,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            geocoder_email: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            restriction: DEFAULT_RESTRICTION.to_string(),
            confidence: DEFAULT_CONFIDENCE,
            date_imported: None,
            country_names: HashMap::new(),
            skip_unresolved: false,
        }
    }
}

impl PipelineConfig {
    /// Load configuration. A missing file is only an error when it was named explicitly.
    pub fn load(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        let file_source = match path {
            Some(p) => File::from(p).required(true),
            None => File::from(default_path).required(false),
        };

        let config = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("excluded_countries")
                    .with_list_parse_key("carve_out_stations")
                    .with_list_parse_key("included_record_qualities"),
            )
            .build()?;

        let pipeline: PipelineConfig = config.try_deserialize()?;
        pipeline.validate()?;
        Ok(pipeline)
    }

    fn validate(&self) -> Result<()> {
        if self.included_record_qualities.is_empty() {
            return Err(ProcessingError::Config(
                "included_record_qualities must name at least one label".to_string(),
            ));
        }
        if let Some(date) = &self.date_imported {
            NaiveDate::parse_from_str(date, "%Y%m%d").map_err(|e| {
                ProcessingError::Config(format!("date_imported '{}' is not YYYYMMDD: {}", date, e))
            })?;
        }
        Ok(())
    }

    pub fn name_delay(&self) -> Duration {
        Duration::from_millis(self.name_delay_ms)
    }

    pub fn date_imported(&self) -> String {
        self.date_imported
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y%m%d").to_string())
    }

    /// Display name for a country code, passing unknown codes through unchanged.
    pub fn country_name(&self, code: &str) -> String {
        self.country_names
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}
