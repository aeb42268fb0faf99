pub mod datum_reader;
pub mod observation_reader;
pub mod station_store;

pub use datum_reader::DatumOffsets;
pub use observation_reader::ObservationReader;
pub use station_store::StationStore;
