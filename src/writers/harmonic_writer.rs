use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{ConstituentMapping, Harmonic, Station, CONSTITUENT_TABLE};
use crate::utils::constants::{
    CENTIMETERS_PER_METER, DEFAULT_CONFIDENCE, DEFAULT_RESTRICTION, DEGREES_PER_CYCLE,
    SENTINEL_LINE, UNITS, UTC_OFFSET,
};
use crate::utils::coordinates::format_float;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Header values shared by every station block.
#[derive(Debug, Clone)]
pub struct HarmonicOptions {
    pub restriction: String,
    pub confidence: u8,
    /// `YYYYMMDD`
    pub date_imported: String,
    pub skip_unresolved: bool,
}

impl HarmonicOptions {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            restriction: config.restriction.clone(),
            confidence: config.confidence,
            date_imported: config.date_imported(),
            skip_unresolved: config.skip_unresolved,
        }
    }
}

impl Default for HarmonicOptions {
    fn default() -> Self {
        Self {
            restriction: DEFAULT_RESTRICTION.to_string(),
            confidence: DEFAULT_CONFIDENCE,
            date_imported: "20241228".to_string(),
            skip_unresolved: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarmonicFileInfo {
    pub stations_written: usize,
    pub stations_skipped: usize,
    pub unresolved_written: usize,
}

impl HarmonicFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Stations written: {}\nStations skipped (unresolved datum): {}\nStations written without datum: {}",
            self.stations_written, self.stations_skipped, self.unresolved_written
        )
    }
}

/// Normalize a phase into [0, 360).
pub fn normalize_phase(pha: f64) -> f64 {
    let phase = (pha + DEGREES_PER_CYCLE).rem_euclid(DEGREES_PER_CYCLE);
    // rem_euclid rounds up to 360 for tiny negative remainders
    if phase >= DEGREES_PER_CYCLE {
        0.0
    } else {
        phase
    }
}

/// One constituent line: name left-aligned in 10 columns, amplitude in meters
/// (10.4), phase in degrees (6.2), fields separated by two spaces.
pub fn constituent_line(output_id: &str, harmonic: &Harmonic) -> String {
    let amp = harmonic.amp / CENTIMETERS_PER_METER;
    let pha = normalize_phase(harmonic.pha);
    format!("{:<10}  {:>10.4}  {:>6.2}", output_id, amp, pha)
}

/// Renders stations in the harmonics text format read by `build_tide_db`.
pub struct HarmonicWriter {
    options: HarmonicOptions,
    table: &'static [ConstituentMapping],
}

impl HarmonicWriter {
    pub fn new(options: HarmonicOptions) -> Self {
        Self {
            options,
            table: CONSTITUENT_TABLE,
        }
    }

    /// Render one station block. Every table entry produces exactly one line.
    pub fn render_station(&self, station: &Station) -> String {
        let mut block = String::new();
        let datum_label = station.datum_name.map(|d| d.as_str()).unwrap_or("");
        let datum_value = station.datum_value.unwrap_or(0.0);

        block.push_str("#\n");
        block.push_str("# BEGIN HOT COMMENTS\n");
        block.push_str(&format!("# country: {}\n", station.country));
        block.push_str(&format!("# source: {}\n", station.gesla_source));
        block.push_str(&format!("# restriction: {}\n", self.options.restriction));
        block.push_str(&format!("# station_id_context: {}\n", station.gesla_source));
        block.push_str(&format!("# station_id: {}\n", station.tide_gauge_name));
        block.push_str(&format!("# date_imported: {}\n", self.options.date_imported));
        block.push_str(&format!("# datum: {}\n", datum_label));
        block.push_str(&format!("# confidence: {}\n", self.options.confidence));
        block.push_str(&format!("# !units: {}\n", UNITS));
        block.push_str(&format!("# !longitude: {}\n", format_float(station.lon)));
        block.push_str(&format!("# !latitude: {}\n", format_float(station.lat)));
        block.push_str(&format!("{}\n", station.name));
        block.push_str(&format!("{} :{}\n", UTC_OFFSET, station.tz));
        block.push_str(&format!("{} {}\n", format_float(datum_value), UNITS));

        for mapping in self.table {
            let harmonic = mapping
                .source_id
                .and_then(|source| station.constituent(source));
            match harmonic {
                Some(h) => block.push_str(&constituent_line(mapping.output_id, h)),
                None => block.push_str(SENTINEL_LINE),
            }
            block.push('\n');
        }

        block
    }

    /// Render all stations in index order.
    pub fn render(&self, stations: &[Station]) -> (String, HarmonicFileInfo) {
        let mut ordered: Vec<&Station> = stations.iter().collect();
        ordered.sort_by_key(|s| s.index);

        let mut text = String::new();
        let mut info = HarmonicFileInfo::default();

        for station in ordered {
            if !station.is_datum_resolved() {
                if self.options.skip_unresolved {
                    info.stations_skipped += 1;
                    continue;
                }
                warn!(
                    "Station {} ({}) written without a resolved datum",
                    station.index, station.tide_gauge_name
                );
                info.unresolved_written += 1;
            }
            text.push_str(&self.render_station(station));
            info.stations_written += 1;
        }

        (text, info)
    }

    pub fn write(&self, stations: &[Station], path: &Path) -> Result<HarmonicFileInfo> {
        let (text, info) = self.render(stations);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;

        info!(
            "Wrote {} stations to {}",
            info.stations_written,
            path.display()
        );
        Ok(info)
    }
}

impl Default for HarmonicWriter {
    fn default() -> Self {
        Self::new(HarmonicOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatumKind, ObservationRow};
    use pretty_assertions::assert_eq;

    fn station() -> Station {
        let row = ObservationRow::new(60.398, 5.32, "M2", 48.12, 305.4)
            .with_station("CMEMS", "bergen-ber-nor-cmems")
            .with_country("NOR");
        let mut station = Station::from_first_row(0, &row);
        station.name = "Bryggen, Bergen, Norway".to_string();
        station.tz = "Etc/GMT".to_string();
        station.datum_name = Some(DatumKind::Lat);
        station.datum_value = Some(-1.12);
        station.insert_constituent("M2", Harmonic { amp: 48.12, pha: 305.4 });
        station.insert_constituent("LM2", Harmonic { amp: 1.5, pha: -20.0 });
        station
    }

    #[test]
    fn test_normalize_phase() {
        assert_eq!(normalize_phase(370.0), 10.0);
        assert_eq!(normalize_phase(-20.0), 340.0);
        assert_eq!(normalize_phase(-400.0), 320.0);
        assert_eq!(normalize_phase(0.0), 0.0);
        assert_eq!(normalize_phase(360.0), 0.0);
        assert_eq!(normalize_phase(1080.5), 0.5);
        assert_eq!(normalize_phase(-1e-20), 0.0);
    }

    #[test]
    fn test_constituent_line_format() {
        let line = constituent_line("M2", &Harmonic { amp: 150.0, pha: 370.0 });
        assert_eq!(line, "M2              1.5000   10.00");
        assert_eq!(line.split_whitespace().collect::<Vec<_>>(), vec!["M2", "1.5000", "10.00"]);

        let line = constituent_line("2SN(MK)2", &Harmonic { amp: 0.004, pha: -0.001 });
        assert_eq!(line, "2SN(MK)2        0.0000  360.00");
    }

    #[test]
    fn test_station_header() {
        let text = HarmonicWriter::default().render_station(&station());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            &lines[..16],
            &[
                "#",
                "# BEGIN HOT COMMENTS",
                "# country: NOR",
                "# source: CMEMS",
                "# restriction: Public Domain",
                "# station_id_context: CMEMS",
                "# station_id: bergen-ber-nor-cmems",
                "# date_imported: 20241228",
                "# datum: LAT",
                "# confidence: 10",
                "# !units: meters",
                "# !longitude: 5.32",
                "# !latitude: 60.398",
                "Bryggen, Bergen, Norway",
                "+00:00 :Etc/GMT",
                "-1.12 meters",
            ]
        );
    }

    #[test]
    fn test_one_line_per_table_entry() {
        let text = HarmonicWriter::default().render_station(&station());
        let constituent_lines: Vec<&str> = text.lines().skip(16).collect();

        assert_eq!(constituent_lines.len(), CONSTITUENT_TABLE.len());
        // J1, K1, K2, L2, M1 are absent; M2 is the sixth entry
        assert_eq!(&constituent_lines[..5], &[SENTINEL_LINE; 5]);
        assert_eq!(constituent_lines[5], "M2              0.4812  305.40");

        let lda2 = CONSTITUENT_TABLE
            .iter()
            .position(|m| m.output_id == "LDA2")
            .unwrap();
        assert_eq!(constituent_lines[lda2], "LDA2            0.0150  340.00");

        let observed = constituent_lines
            .iter()
            .filter(|l| **l != SENTINEL_LINE)
            .count();
        assert_eq!(observed, 2);
    }

    #[test]
    fn test_source_name_is_not_output_name() {
        // a TICON column named like an output id but not used as a source is ignored
        let mut station = station();
        station.constituents.clear();
        station.insert_constituent("LDA2", Harmonic { amp: 1.0, pha: 1.0 });

        let text = HarmonicWriter::default().render_station(&station);
        assert!(text.lines().skip(16).all(|l| l == SENTINEL_LINE));
    }

    #[test]
    fn test_unmapped_entry_is_sentinel() {
        static TABLE: &[ConstituentMapping] = &[
            ConstituentMapping::unobserved("M2"),
            ConstituentMapping::new("S2", "S2"),
        ];
        let writer = HarmonicWriter {
            options: HarmonicOptions::default(),
            table: TABLE,
        };

        let text = writer.render_station(&station());
        let lines: Vec<&str> = text.lines().skip(16).collect();
        assert_eq!(lines, vec![SENTINEL_LINE, SENTINEL_LINE]);
    }

    #[test]
    fn test_render_orders_by_index_and_handles_unresolved() {
        let mut first = station();
        let mut second = station();
        second.index = 1;
        second.tide_gauge_name = "second".to_string();
        second.clear_datum();
        first.index = 0;

        let (text, info) = HarmonicWriter::default().render(&[second.clone(), first.clone()]);
        assert_eq!(info.stations_written, 2);
        assert_eq!(info.unresolved_written, 1);
        let ids: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("# station_id: "))
            .collect();
        assert_eq!(ids, vec!["# station_id: bergen-ber-nor-cmems", "# station_id: second"]);
        assert!(text.contains("# datum: \n"));
        assert!(text.contains("\n0.0 meters\n"));

        let writer = HarmonicWriter::new(HarmonicOptions {
            skip_unresolved: true,
            ..Default::default()
        });
        let (text, info) = writer.render(&[first, second]);
        assert_eq!(info.stations_written, 1);
        assert_eq!(info.stations_skipped, 1);
        assert!(!text.contains("# station_id: second"));
    }
}
