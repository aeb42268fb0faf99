pub mod constituent;
pub mod datum;
pub mod observation;
pub mod station;

pub use constituent::{ConstituentMapping, CONSTITUENT_TABLE};
pub use datum::{classify_datum, DatumKind, DatumOffsetRecord, DatumPattern, DatumRule, DATUM_RULES};
pub use observation::ObservationRow;
pub use station::{Harmonic, Station};
