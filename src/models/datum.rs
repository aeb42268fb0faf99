use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Vertical reference level a station's harmonics are corrected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatumKind {
    /// Mean lower low water, used by the USGS archive
    #[serde(rename = "MLLW")]
    Mllw,
    #[serde(rename = "MSL")]
    Msl,
    /// Lowest astronomical tide, the fallback for every other datum description
    #[serde(rename = "LAT")]
    Lat,
}

impl DatumKind {
    /// Key used both in the harmonic file header and in the datum-offset dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatumKind::Mllw => "MLLW",
            DatumKind::Msl => "MSL",
            DatumKind::Lat => "LAT",
        }
    }
}

impl fmt::Display for DatumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumPattern {
    Exact(&'static str),
    OneOf(&'static [&'static str]),
}

impl DatumPattern {
    pub fn matches(&self, datum_information: &str) -> bool {
        match self {
            DatumPattern::Exact(text) => *text == datum_information,
            DatumPattern::OneOf(texts) => texts.contains(&datum_information),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatumRule {
    pub pattern: DatumPattern,
    pub kind: DatumKind,
}

/// Classification rules, evaluated top to bottom; the first match wins.
pub static DATUM_RULES: &[DatumRule] = &[
    DatumRule {
        pattern: DatumPattern::Exact(
            "USGS Station Datum (see station page for tie to geocentric datum)",
        ),
        kind: DatumKind::Mllw,
    },
    DatumRule {
        pattern: DatumPattern::OneOf(&[
            "MSL",
            "Normal Amsterdam Level",
            "RH 2000 (Swedish National Height System 2000)",
            "BSCD2000",
            "DVR90",
        ]),
        kind: DatumKind::Msl,
    },
];

pub const DEFAULT_DATUM_KIND: DatumKind = DatumKind::Lat;

/// Map a free-text `datum_information` value to a datum kind.
pub fn classify_datum(datum_information: &str) -> DatumKind {
    DATUM_RULES
        .iter()
        .find(|rule| rule.pattern.matches(datum_information))
        .map(|rule| rule.kind)
        .unwrap_or(DEFAULT_DATUM_KIND)
}

/// One station entry of the external datum-offset dataset.
///
/// Datum heights are stored under their kind key (`"LAT"`, `"MSL"`, ...) as
/// height above the station's chart zero. Any other keys are carried through
/// untouched so the dataset can be rewritten without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatumOffsetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tide_gauge_name: Option<String>,

    #[serde(flatten)]
    pub levels: Map<String, Value>,
}

impl DatumOffsetRecord {
    pub fn level(&self, kind: DatumKind) -> Option<f64> {
        self.levels.get(kind.as_str()).and_then(Value::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_usgs_datum() {
        assert_eq!(
            classify_datum("USGS Station Datum (see station page for tie to geocentric datum)"),
            DatumKind::Mllw
        );
    }

    #[test]
    fn test_classify_msl_family() {
        for text in ["MSL", "Normal Amsterdam Level", "BSCD2000", "DVR90"] {
            assert_eq!(classify_datum(text), DatumKind::Msl, "{}", text);
        }
        assert_eq!(
            classify_datum("RH 2000 (Swedish National Height System 2000)"),
            DatumKind::Msl
        );
    }

    #[test]
    fn test_classify_defaults_to_lat() {
        assert_eq!(classify_datum("Chart Datum"), DatumKind::Lat);
        assert_eq!(classify_datum(""), DatumKind::Lat);
        // matching is exact, not case-insensitive or substring
        assert_eq!(classify_datum("msl"), DatumKind::Lat);
        assert_eq!(classify_datum("MSL (local)"), DatumKind::Lat);
    }

    #[test]
    fn test_datum_kind_serde_names() {
        assert_eq!(serde_json::to_string(&DatumKind::Mllw).unwrap(), "\"MLLW\"");
        let kind: DatumKind = serde_json::from_str("\"LAT\"").unwrap();
        assert_eq!(kind, DatumKind::Lat);
        assert_eq!(DatumKind::Msl.to_string(), "MSL");
    }

    #[test]
    fn test_offset_record_levels() {
        let record: DatumOffsetRecord = serde_json::from_str(
            r#"{"tide_gauge_name": "bergen", "LAT": 1.12, "MSL": 0.87, "HAT": 2.3}"#,
        )
        .unwrap();

        assert_eq!(record.tide_gauge_name.as_deref(), Some("bergen"));
        assert_eq!(record.level(DatumKind::Lat), Some(1.12));
        assert_eq!(record.level(DatumKind::Msl), Some(0.87));
        assert_eq!(record.level(DatumKind::Mllw), None);
    }
}
