use serde::{Deserialize, Serialize};

/// Coordinate system a sky position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoordinateSystem {
    #[default]
    Equatorial,
}

/// Sky position in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SkyPosition {
    pub system: CoordinateSystem,
    pub longitude: f64,
    pub latitude: f64,
}

impl SkyPosition {
    pub fn equatorial(right_ascension: f64, declination: f64) -> Self {
        Self {
            system: CoordinateSystem::Equatorial,
            longitude: right_ascension,
            latitude: declination,
        }
    }
}

/// Taylor-expanded frequency/phase model of one continuous-wave source.
///
/// The instantaneous frequency at `t` seconds after `epoch_ns` is
/// `f0 * (1 + sum_k spindown[k-1] * t^k)`. Coefficients are ordered by
/// increasing degree; an empty list is a monochromatic source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolynomialFrequencyModel {
    pub epoch_ns: i64,
    pub f0: f64,
    pub spindown: Vec<f64>,
    pub phi0: f64,
    pub psi: f64,
    pub a_plus: f64,
    pub a_cross: f64,
    pub position: SkyPosition,
}

impl PolynomialFrequencyModel {
    pub fn monochromatic(epoch_ns: i64, f0: f64, a_plus: f64, a_cross: f64) -> Self {
        Self {
            epoch_ns,
            f0,
            spindown: Vec::new(),
            phi0: 0.0,
            psi: 0.0,
            a_plus,
            a_cross,
            position: SkyPosition::default(),
        }
    }

    pub fn is_monochromatic(&self) -> bool {
        self.spindown.is_empty()
    }

    /// Frequency in Hz at `t` seconds after the anchor epoch.
    pub fn frequency_at(&self, t: f64) -> f64 {
        let mut t_n = 1.0;
        let mut factor = 1.0;
        for coefficient in &self.spindown {
            t_n *= t;
            factor += coefficient * t_n;
        }
        self.f0 * factor
    }

    /// Phase in radians at `t` seconds after the anchor epoch.
    pub fn phase_at(&self, t: f64) -> f64 {
        let mut t_n = t;
        let mut integral = t;
        for (i, coefficient) in self.spindown.iter().enumerate() {
            t_n *= t;
            integral += coefficient * t_n / (i as f64 + 2.0);
        }
        self.phi0 + std::f64::consts::TAU * self.f0 * integral
    }
}
