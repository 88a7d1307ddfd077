//! Numeric core for Taylor-parameterized continuous-wave signal injection.
//!
//! The modules cover re-anchoring a spindown model at the generation epoch,
//! choosing the model sampling resolution, inverting detector responses into
//! transfer functions, and accumulating per-source signals into one output
//! series.

pub mod detector;
pub mod math;
pub mod model;
pub mod prelude;
pub mod processing;
pub mod synthesis;
pub mod telemetry;

pub use prelude::{SimulationError, SimulationResult};
