pub mod series;
pub mod source;
pub mod time;

pub use num_complex::Complex64;
pub use series::{FrequencySeries, ResponseTable, SampleUnit, TimeSeries, TransferFunction, UnitRatio};
pub use source::{CoordinateSystem, PolynomialFrequencyModel, SkyPosition};
pub use time::GpsTime;
