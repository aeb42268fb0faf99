use crate::error::Result;
use crate::models::Station;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use std::path::Path;
use tracing::info;

/// Point layer of the stations for map previews; feature id is the station index.
pub struct GeoJsonWriter;

impl GeoJsonWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn feature_collection(&self, stations: &[Station]) -> FeatureCollection {
        let features = stations
            .iter()
            .map(|station| {
                let mut properties = JsonObject::new();
                properties.insert("name".to_string(), station.name.clone().into());

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![station.lon, station.lat]))),
                    id: Some(Id::Number(station.index.into())),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    pub fn write(&self, stations: &[Station], path: &Path) -> Result<()> {
        let collection = self.feature_collection(stations);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string(&collection)?)?;
        info!("Wrote {} features to {}", stations.len(), path.display());
        Ok(())
    }
}

impl Default for GeoJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ObservationRow;
    use geojson::GeoJson;
    use tempfile::TempDir;

    fn stations() -> Vec<Station> {
        [(60.4, 5.3, "Bergen, Norway"), (59.9, 10.7, "Oslo, Norway")]
            .iter()
            .enumerate()
            .map(|(i, (lat, lon, name))| {
                let row = ObservationRow::new(*lat, *lon, "M2", 1.0, 1.0).with_country("NOR");
                let mut station = Station::from_first_row(i, &row);
                station.name = name.to_string();
                station
            })
            .collect()
    }

    #[test]
    fn test_write_feature_collection() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("stations.geojson");

        GeoJsonWriter::new().write(&stations(), &path)?;

        let parsed: GeoJson = std::fs::read_to_string(&path)?
            .parse()
            .map_err(|e| crate::error::ProcessingError::InvalidFormat(format!("{}", e)))?;
        let collection = match parsed {
            GeoJson::FeatureCollection(fc) => fc,
            other => panic!("expected a feature collection, got {:?}", other),
        };

        assert_eq!(collection.features.len(), 2);
        let second = &collection.features[1];
        assert_eq!(second.id, Some(Id::Number(1.into())));
        assert_eq!(
            second.geometry.as_ref().map(|g| g.value.clone()),
            Some(Value::Point(vec![10.7, 59.9]))
        );
        assert_eq!(
            second.property("name").and_then(|v| v.as_str()),
            Some("Oslo, Norway")
        );
        Ok(())
    }
}
