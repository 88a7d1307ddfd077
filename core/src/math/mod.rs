pub mod binomial;
pub mod fft;
pub mod interp;
pub mod stats;

pub use binomial::choose;
pub use fft::FftHelper;
pub use stats::StatsHelper;
