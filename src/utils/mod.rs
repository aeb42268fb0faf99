pub mod constants;
pub mod coordinates;
pub mod progress;

pub use constants::*;
pub use coordinates::{fallback_name, format_float, nautical_timezone, CoordinateKey};
pub use progress::ProgressReporter;
