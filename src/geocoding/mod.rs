pub mod nominatim;

pub use nominatim::{compose_place_name, Geocoding, NominatimClient};

use crate::processors::name_enrichment::PlaceNamer;
use crate::utils::coordinates::fallback_name;
use std::future::Future;

/// Names every station with its coordinate fallback; no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNamer;

impl PlaceNamer for OfflineNamer {
    fn place_name(&self, lat: f64, lon: f64, country: &str) -> impl Future<Output = String> + Send {
        let name = fallback_name(lat, lon, country);
        async move { name }
    }
}
