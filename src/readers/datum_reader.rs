use crate::error::Result;
use crate::models::DatumOffsetRecord;
use crate::readers::station_store::write_json_atomic;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// The external per-station datum-offset dataset, indexed by gauge id.
#[derive(Debug, Clone, Default)]
pub struct DatumOffsets {
    records: Vec<DatumOffsetRecord>,
    by_gauge: HashMap<String, Vec<usize>>,
}

impl DatumOffsets {
    pub fn new(records: Vec<DatumOffsetRecord>) -> Self {
        let mut by_gauge: HashMap<String, Vec<usize>> = HashMap::new();
        let mut untagged = 0;

        for (position, record) in records.iter().enumerate() {
            match &record.tide_gauge_name {
                Some(name) => by_gauge.entry(name.clone()).or_default().push(position),
                None => untagged += 1,
            }
        }

        if untagged > 0 {
            warn!(
                "{} datum records have no tide_gauge_name and can never be matched",
                untagged
            );
        }

        Self { records, by_gauge }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let records: Vec<DatumOffsetRecord> = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {} datum records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_atomic(path, &self.records)
    }

    /// All records tagged with this gauge id; callers decide what a count other than one means.
    pub fn matches(&self, tide_gauge_name: &str) -> Vec<&DatumOffsetRecord> {
        self.by_gauge
            .get(tide_gauge_name)
            .map(|positions| positions.iter().map(|&p| &self.records[p]).collect())
            .unwrap_or_default()
    }

    pub fn records(&self) -> &[DatumOffsetRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DatumOffsetRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
