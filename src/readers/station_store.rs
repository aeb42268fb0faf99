use crate::error::Result;
use crate::models::Station;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Intermediate station JSON, doubling as the naming checkpoint.
pub struct StationStore;

impl StationStore {
    pub fn load(path: &Path) -> Result<Vec<Station>> {
        let file = File::open(path)?;
        let stations: Vec<Station> = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {} stations from {}", stations.len(), path.display());
        Ok(stations)
    }

    /// Replace `path` with the serialized stations.
    ///
    /// The JSON is written to a sibling temporary file and renamed over the
    /// target, so readers see either the previous snapshot or the new one.
    pub fn save(path: &Path, stations: &[Station]) -> Result<()> {
        write_json_atomic(path, stations)
    }
}

/// Serialize `value` to a sibling temp file and atomically rename it over `path`.
pub fn write_json_atomic<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path)?;

    Ok(())
}
