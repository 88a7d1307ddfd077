//! Text file formats read and written by the simulator.

pub mod ephemeris;
pub mod format;
pub mod output;
pub mod response;

pub use ephemeris::read_ephemerides;
pub use output::write_output;
pub use response::read_response;
