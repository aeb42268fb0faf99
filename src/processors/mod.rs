pub mod datum_resolver;
pub mod datum_tagging;
pub mod name_enrichment;
pub mod pipeline;
pub mod station_aggregator;

pub use datum_resolver::{DatumFailure, DatumFailureReason, DatumReport, DatumResolver};
pub use datum_tagging::{tag_datum_records, TaggingReport};
pub use name_enrichment::{EnrichmentStats, NameEnricher, PlaceNamer};
pub use pipeline::{PipelinePaths, PipelineReport, TidePipeline};
pub use station_aggregator::{AggregationStats, StationAggregator};
