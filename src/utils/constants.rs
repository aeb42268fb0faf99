/// Default file names
pub const DEFAULT_CONFIG_FILE: &str = "tidecon.toml";
pub const DEFAULT_STATIONS_FILE: &str = "TICON-4.json";
pub const DEFAULT_HARMONICS_FILE: &str = "TICON-4.txt";
pub const DEFAULT_GEOJSON_FILE: &str = "TICON-4.geojson";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "TIDECON";

/// Station filtering defaults
pub const DEFAULT_EXCLUDED_COUNTRIES: &[&str] = &["USA"];
pub const DEFAULT_INCLUDED_RECORD_QUALITIES: &[&str] = &["No obvious issues"];

/// Reverse geocoding defaults
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_USER_AGENT: &str = "tidecon-processor";
pub const DEFAULT_NAME_DELAY_MS: u64 = 1250;
pub const GEOCODER_TIMEOUT_SECS: u64 = 10;

/// Harmonic file header values
pub const DEFAULT_RESTRICTION: &str = "Public Domain";
pub const DEFAULT_CONFIDENCE: u8 = 10;
pub const UNITS: &str = "meters";
pub const UTC_OFFSET: &str = "+00:00";

/// Emitted for a table constituent the station has no data for
pub const SENTINEL_LINE: &str = "x 0 0";

/// Unit conversion
pub const CENTIMETERS_PER_METER: f64 = 100.0;
pub const DEGREES_PER_CYCLE: f64 = 360.0;
