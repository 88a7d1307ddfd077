//! Detector description handed to the coherent-signal synthesizer.

pub mod ephemeris;
pub mod site;

pub use ephemeris::{Ephemerides, EphemerisEntry, EphemerisTable};
pub use site::{DetectorSite, SiteGeometry};

use crate::model::TransferFunction;

/// Astronomical unit, metres.
pub const ASTRONOMICAL_UNIT_M: f64 = 149_597_870_700.0;
/// Speed of light in vacuum, metres per second.
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Padding added on both sides of the waveform span for a located detector,
/// wide enough to cover any barycentric delay.
pub fn barycentric_padding_ns() -> i64 {
    (1.1e9 * ASTRONOMICAL_UNIT_M / SPEED_OF_LIGHT_M_S) as i64
}

/// Everything the synthesizer needs to know about the detector.
///
/// No site means a stationary detector at the solar-system barycenter,
/// aligned with the wave's + polarization.
#[derive(Debug, Clone)]
pub struct DetectorResponse {
    pub transfer: TransferFunction,
    pub site: Option<DetectorSite>,
    pub ephemerides: Option<Ephemerides>,
    pub heterodyne_epoch_ns: i64,
}

impl DetectorResponse {
    pub fn barycentric(transfer: TransferFunction) -> Self {
        Self {
            transfer,
            site: None,
            ephemerides: None,
            heterodyne_epoch_ns: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_covers_earth_orbit_light_time() {
        let padding = barycentric_padding_ns() as f64 * 1.0e-9;
        assert!((padding - 548.9).abs() < 0.1);
    }
}
