use crate::error::{ProcessingError, Result};
use crate::models::ObservationRow;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

/// Reads the TICON constituent table (one row per station and constituent).
#[derive(Debug, Default)]
pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every row of the file. Any unparseable or out-of-range row aborts the read.
    pub fn read_observations(&self, path: &Path) -> Result<Vec<ObservationRow>> {
        let file = File::open(path)?;
        let rows = self.read_from(file)?;
        info!("Read {} observation rows from {}", rows.len(), path.display());
        Ok(rows)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<Vec<ObservationRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut rows = Vec::new();
        for result in reader.deserialize::<ObservationRow>() {
            let row = result?;
            let line = rows.len() as u64 + 2;

            // range validation passes NaN through
            if !row.lat.is_finite() || !row.lon.is_finite() {
                return Err(ProcessingError::InvalidObservation {
                    line,
                    message: format!("non-finite coordinate ({}, {})", row.lat, row.lon),
                });
            }
            if !row.amp.is_finite() || !row.pha.is_finite() {
                return Err(ProcessingError::InvalidObservation {
                    line,
                    message: format!("non-finite amplitude or phase for {}", row.con),
                });
            }
            row.validate()
                .map_err(|e| ProcessingError::InvalidObservation {
                    line,
                    message: e.to_string(),
                })?;

            rows.push(row);
        }

        debug!("Parsed {} rows", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "lat,lon,con,amp,pha,amp_std,pha_std,missing_obs,no_of_obs,years_of_obs,start_date,end_date,gesla_source,tide_gauge_name,type,country,record_quality,datum_information";

    #[test]
    fn test_read_ticon_rows() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{}", HEADER)?;
        writeln!(
            temp_file,
            "60.398,5.320,M2,48.12,305.4,0.02,0.1,12,87000,10.2,2005-01-01,2015-03-01,CMEMS,bergen-ber-nor-cmems,Coastal,NOR,No obvious issues,Chart Datum"
        )?;
        writeln!(
            temp_file,
            "60.398,5.320,LM2,1.20,-20.0,,,,87000,10.2,2005-01-01,2015-03-01,CMEMS,bergen-ber-nor-cmems,Coastal,NOR,No obvious issues,Chart Datum"
        )?;

        let rows = ObservationReader::new().read_observations(temp_file.path())?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].con, "M2");
        assert_eq!(rows[0].amp, 48.12);
        assert_eq!(rows[0].gauge_type, "Coastal");
        assert_eq!(rows[0].missing_obs, Some(12.0));
        assert_eq!(rows[1].pha, -20.0);
        assert_eq!(rows[1].amp_std, None);
        assert_eq!(rows[1].datum_information, "Chart Datum");
        Ok(())
    }

    #[test]
    fn test_quoted_datum_information() -> Result<()> {
        let data = format!(
            "{}\n47.6,-122.33,M2,150.0,370.0,,,,,,,,USGS,seattle,Coastal,USA,No obvious issues,\"USGS Station Datum (see station page for tie to geocentric datum)\"\n",
            HEADER
        );
        let rows = ObservationReader::new().read_from(data.as_bytes())?;

        assert_eq!(
            rows[0].datum_information,
            "USGS Station Datum (see station page for tie to geocentric datum)"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_latitude_is_fatal() {
        let data = format!(
            "{}\n95.0,5.3,M2,1.0,1.0,,,,,,,,CMEMS,x,Coastal,NOR,No obvious issues,MSL\n",
            HEADER
        );
        let result = ObservationReader::new().read_from(data.as_bytes());

        assert!(matches!(
            result,
            Err(ProcessingError::InvalidObservation { line: 2, .. })
        ));
    }

    #[test]
    fn test_nan_coordinates_are_fatal() {
        for coords in ["NaN,5.0", "60.0,NaN", "inf,5.0"] {
            let data = format!(
                "{}\n60.0,5.3,M2,1.0,1.0,,,,,,,,CMEMS,x,Coastal,NOR,No obvious issues,MSL\n{},M2,1.0,1.0,,,,,,,,CMEMS,y,Coastal,NOR,No obvious issues,MSL\n",
                HEADER, coords
            );
            let result = ObservationReader::new().read_from(data.as_bytes());

            assert!(
                matches!(result, Err(ProcessingError::InvalidObservation { line: 3, .. })),
                "{} was accepted",
                coords
            );
        }
    }

    #[test]
    fn test_unparseable_amplitude_is_fatal() {
        let data = format!(
            "{}\n60.0,5.3,M2,abc,1.0,,,,,,,,CMEMS,x,Coastal,NOR,No obvious issues,MSL\n",
            HEADER
        );
        let result = ObservationReader::new().read_from(data.as_bytes());

        assert!(matches!(result, Err(ProcessingError::Csv(_))));
    }
}
