pub mod datum_analyzer;

pub use datum_analyzer::{DatumAnalyzer, DatumCount, DatumStatistics};
