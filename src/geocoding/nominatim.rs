use crate::config::PipelineConfig;
use crate::error::Result;
use crate::processors::name_enrichment::PlaceNamer;
use crate::utils::constants::GEOCODER_TIMEOUT_SECS;
use crate::utils::coordinates::{fallback_name, format_float};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Address parts of a geocodejson reverse lookup that contribute to a station name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Geocoding {
    pub street: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    properties: GeocodeProperties,
}

#[derive(Debug, Deserialize)]
struct GeocodeProperties {
    geocoding: Geocoding,
}

/// Join the distinct address parts (street, district, city, state) and the
/// country. `None` when the lookup produced no usable part.
pub fn compose_place_name(geocoding: &Geocoding, country: &str) -> Option<String> {
    let street = geocoding.street.as_deref().filter(|s| !s.is_empty());
    let district = geocoding.district.as_deref().filter(|s| !s.is_empty());
    let city = geocoding.city.as_deref().filter(|s| !s.is_empty());
    let state = geocoding.state.as_deref().filter(|s| !s.is_empty());

    let mut parts: Vec<&str> = Vec::new();
    if let Some(street) = street {
        parts.push(street);
    }
    if let Some(district) = district {
        if Some(district) != street {
            parts.push(district);
        }
    }
    if let Some(city) = city {
        if Some(city) != district && Some(city) != street {
            parts.push(city);
        }
    }
    if let Some(state) = state {
        if Some(state) != city && Some(state) != district && Some(state) != street {
            parts.push(state);
        }
    }

    if parts.is_empty() {
        return None;
    }
    parts.push(country);
    Some(parts.join(", "))
}

/// Reverse geocoder backed by a Nominatim `reverse` endpoint.
pub struct NominatimClient {
    client: Client,
    endpoint: String,
    email: String,
}

impl NominatimClient {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(GEOCODER_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.geocoder_url.clone(),
            email: config.geocoder_email.clone(),
        })
    }

    async fn lookup(&self, lat: f64, lon: f64) -> Result<Option<Geocoding>> {
        let mut query = vec![
            ("format", "geocodejson".to_string()),
            ("lat", format_float(lat)),
            ("lon", format_float(lon)),
        ];
        if !self.email.is_empty() {
            query.push(("email", self.email.clone()));
        }

        let response = self.client.get(&self.endpoint).query(&query).send().await?;
        if !response.status().is_success() {
            warn!("Geocoder returned {} for ({}, {})", response.status(), lat, lon);
            return Ok(None);
        }

        let body: GeocodeResponse = response.json().await?;
        Ok(body.features.into_iter().next().map(|f| f.properties.geocoding))
    }
}

impl PlaceNamer for NominatimClient {
    fn place_name(&self, lat: f64, lon: f64, country: &str) -> impl Future<Output = String> + Send {
        let country = country.to_string();
        async move {
            let geocoding = match self.lookup(lat, lon).await {
                Ok(geocoding) => geocoding,
                Err(e) => {
                    warn!("Reverse geocoding failed for ({}, {}): {}", lat, lon, e);
                    None
                }
            };

            match geocoding.and_then(|g| compose_place_name(&g, &country)) {
                Some(name) => name,
                None => {
                    debug!("Falling back to coordinate name for ({}, {})", lat, lon);
                    fallback_name(lat, lon, &country)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geocoding(street: Option<&str>, district: Option<&str>, city: Option<&str>, state: Option<&str>) -> Geocoding {
        Geocoding {
            street: street.map(String::from),
            district: district.map(String::from),
            city: city.map(String::from),
            state: state.map(String::from),
        }
    }

    #[test]
    fn test_compose_all_parts() {
        let g = geocoding(Some("Bryggen"), Some("Bergenhus"), Some("Bergen"), Some("Vestland"));
        assert_eq!(
            compose_place_name(&g, "Norway").as_deref(),
            Some("Bryggen, Bergenhus, Bergen, Vestland, Norway")
        );
    }

    #[test]
    fn test_compose_skips_repeated_parts() {
        let g = geocoding(None, Some("Oslo"), Some("Oslo"), Some("Oslo"));
        assert_eq!(compose_place_name(&g, "Norway").as_deref(), Some("Oslo, Norway"));

        let g = geocoding(Some("Pier 3"), None, Some("Pier 3"), Some("Texas"));
        assert_eq!(
            compose_place_name(&g, "United States").as_deref(),
            Some("Pier 3, Texas, United States")
        );
    }

    #[test]
    fn test_compose_empty_is_none() {
        assert_eq!(compose_place_name(&Geocoding::default(), "Norway"), None);
        let g = geocoding(Some(""), None, None, None);
        assert_eq!(compose_place_name(&g, "Norway"), None);
    }

    #[test]
    fn test_parse_geocodejson() {
        let body = r#"{
            "type": "FeatureCollection",
            "geocoding": {"version": "0.1.0"},
            "features": [{
                "type": "Feature",
                "properties": {"geocoding": {"type": "house", "city": "Seattle", "state": "Washington", "country": "United States"}},
                "geometry": {"type": "Point", "coordinates": [-122.33, 47.6]}
            }]
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        let geocoding = &response.features[0].properties.geocoding;

        assert_eq!(
            compose_place_name(geocoding, "USA").as_deref(),
            Some("Seattle, Washington, USA")
        );
    }

    #[tokio::test]
    async fn test_unreachable_geocoder_falls_back() {
        let config = PipelineConfig {
            geocoder_url: "http://127.0.0.1:9/reverse".to_string(),
            ..Default::default()
        };
        let client = NominatimClient::new(&config).unwrap();

        let name = client.place_name(60.4, 5.3, "Norway").await;
        assert_eq!(name, "60.4 5.3, Norway");
    }
}
