use cwcore::model::{PolynomialFrequencyModel, SkyPosition};

/// Reference epoch of the default source, GPS nanoseconds.
pub const DEFAULT_EPOCH_NS: i64 = 0;
pub const DEFAULT_A_PLUS: f64 = 1000.0;
pub const DEFAULT_A_CROSS: f64 = 1000.0;
pub const DEFAULT_PSI: f64 = 0.0;
pub const DEFAULT_RA: f64 = 0.0;
pub const DEFAULT_DEC: f64 = 0.0;
pub const DEFAULT_PHI0: f64 = 0.0;
pub const DEFAULT_F0: f64 = 100.0;

/// Monochromatic 100 Hz source overhead at RA 0h, dec 0 deg, used when no
/// source file is given.
pub fn default_source() -> PolynomialFrequencyModel {
    PolynomialFrequencyModel {
        epoch_ns: DEFAULT_EPOCH_NS,
        f0: DEFAULT_F0,
        spindown: Vec::new(),
        phi0: DEFAULT_PHI0,
        psi: DEFAULT_PSI,
        a_plus: DEFAULT_A_PLUS,
        a_cross: DEFAULT_A_CROSS,
        position: SkyPosition::equatorial(DEFAULT_RA, DEFAULT_DEC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_is_monochromatic() {
        let source = default_source();
        assert!(source.is_monochromatic());
        assert_eq!(source.f0, 100.0);
        assert_eq!((source.a_plus, source.a_cross), (1000.0, 1000.0));
    }
}
