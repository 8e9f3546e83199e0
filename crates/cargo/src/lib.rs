//! Cargo measurement domain module.
//!
//! Unit conversions, cargo lines, commercial parameters and the chargeable-units
//! calculator. Pure functions only (no IO, no logging, no global state).

pub mod lenient;
pub mod line;
pub mod metrics;
pub mod mode;
pub mod params;
pub mod units;

pub use line::{CargoLine, PackagingType};
pub use metrics::{CargoMetrics, ChargeableUnit, compute_cargo_metrics};
pub use mode::{Modality, Mode, RoadLoad, SeaLoad};
pub use params::{CommercialParameters, ParamsError};
