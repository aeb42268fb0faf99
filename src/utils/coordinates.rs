use crate::error::{ProcessingError, Result};

/// Exact-match grouping key for a station's (lat, lon) pair.
///
/// Coordinates are compared bit for bit as parsed from the input; no tolerance
/// is applied. Negative zero is folded into positive zero so `-0.0` and `0.0`
/// name the same station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateKey {
    lat_bits: u64,
    lon_bits: u64,
}

impl CoordinateKey {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat_bits: (lat + 0.0).to_bits(),
            lon_bits: (lon + 0.0).to_bits(),
        }
    }
}

/// Render a float the way the harmonic header and fallback names expect:
/// shortest round-trip digits, always with a decimal point (`47.6`, `0.0`, `-1.25`).
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Deterministic station name used whenever reverse geocoding has nothing better.
pub fn fallback_name(lat: f64, lon: f64, country: &str) -> String {
    format!("{} {}, {}", format_float(lat), format_float(lon), country)
}

/// IANA `Etc/GMT` zone for the nautical time zone containing `lon`.
///
/// `Etc` zones use the POSIX sign convention, so stations east of Greenwich
/// get `Etc/GMT-N`.
pub fn nautical_timezone(lon: f64) -> Result<String> {
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Longitude {} is outside [-180, 180]",
            lon
        )));
    }

    let hours = ((lon / 15.0).round() as i32).clamp(-12, 12);
    let zone = match hours {
        0 => "Etc/GMT".to_string(),
        h if h > 0 => format!("Etc/GMT-{}", h),
        h => format!("Etc/GMT+{}", -h),
    };

    Ok(zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_coordinate_key_exact_match() {
        assert_eq!(CoordinateKey::new(47.6, -122.33), CoordinateKey::new(47.6, -122.33));
        assert_ne!(
            CoordinateKey::new(47.6, -122.33),
            CoordinateKey::new(47.600001, -122.33)
        );
        assert_eq!(CoordinateKey::new(-0.0, 0.0), CoordinateKey::new(0.0, -0.0));

        let keys: HashSet<_> = [(1.0, 2.0), (1.0, 2.0), (2.0, 1.0)]
            .iter()
            .map(|(lat, lon)| CoordinateKey::new(*lat, *lon))
            .collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(47.6), "47.6");
        assert_eq!(format_float(-122.33), "-122.33");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(5.0), "5.0");
    }

    #[test]
    fn test_fallback_name() {
        assert_eq!(fallback_name(60.4, 5.3, "Norway"), "60.4 5.3, Norway");
    }

    #[test]
    fn test_nautical_timezone() {
        assert_eq!(nautical_timezone(0.0).unwrap(), "Etc/GMT");
        assert_eq!(nautical_timezone(5.3).unwrap(), "Etc/GMT");
        assert_eq!(nautical_timezone(10.7).unwrap(), "Etc/GMT-1");
        assert_eq!(nautical_timezone(-122.33).unwrap(), "Etc/GMT+8");
        assert_eq!(nautical_timezone(180.0).unwrap(), "Etc/GMT-12");
        assert_eq!(nautical_timezone(-180.0).unwrap(), "Etc/GMT+12");
        assert!(nautical_timezone(181.0).is_err());
        assert!(nautical_timezone(f64::NAN).is_err());
    }
}
