use crate::error::Result;
use crate::models::Station;
use crate::readers::StationStore;
use crate::utils::progress::ProgressReporter;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Supplies a human-readable place name for a coordinate.
///
/// Implementations are best effort: they never fail, and fall back to
/// [`fallback_name`](crate::utils::fallback_name) when nothing better is known.
pub trait PlaceNamer {
    fn place_name(&self, lat: f64, lon: f64, country: &str) -> impl Future<Output = String> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub already_named: usize,
    pub named: usize,
}

/// Names unnamed stations one at a time, checkpointing the full station list
/// after every lookup so an interrupted run resumes where it stopped.
pub struct NameEnricher<N: PlaceNamer> {
    namer: N,
    checkpoint: PathBuf,
    delay: Duration,
}

impl<N: PlaceNamer> NameEnricher<N> {
    pub fn new(namer: N, checkpoint: &Path) -> Self {
        Self {
            namer,
            checkpoint: checkpoint.to_path_buf(),
            delay: Duration::ZERO,
        }
    }

    /// Minimum pause after each lookup, for the geocoder's rate limit.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Name every station whose name is empty.
    ///
    /// With `redo`, all names are cleared first. Whether a station still needs
    /// a name is decided only from its `name` field, never from run counters.
    pub async fn enrich(
        &self,
        stations: &mut [Station],
        redo: bool,
        progress: Option<&ProgressReporter>,
    ) -> Result<EnrichmentStats> {
        if redo {
            info!("Clearing {} station names before renaming", stations.len());
            for station in stations.iter_mut() {
                station.name.clear();
            }
        }

        let mut stats = EnrichmentStats {
            already_named: stations.iter().filter(|s| s.has_name()).count(),
            named: 0,
        };
        info!(
            "{} stations already named, {} to name",
            stats.already_named,
            stations.len() - stats.already_named
        );

        for position in 0..stations.len() {
            if stations[position].has_name() {
                continue;
            }

            let (lat, lon, country) = {
                let station = &stations[position];
                if let Some(p) = progress {
                    p.set_message(&format!("Naming {}", station.tide_gauge_name));
                }
                (station.lat, station.lon, station.country_from_iso.clone())
            };
            let name = self.namer.place_name(lat, lon, &country).await;
            debug!("Station {} -> {}", stations[position].index, name);
            if let Some(p) = progress {
                p.println(&name);
                p.increment(1);
            }
            stations[position].name = name;
            stats.named += 1;

            StationStore::save(&self.checkpoint, stations)?;

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(stats)
    }
}
