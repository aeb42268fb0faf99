pub mod geojson_writer;
pub mod harmonic_writer;

pub use geojson_writer::GeoJsonWriter;
pub use harmonic_writer::{HarmonicFileInfo, HarmonicOptions, HarmonicWriter};
