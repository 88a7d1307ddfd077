use crate::math::binomial::choose;
use crate::model::time::seconds_between;
use crate::model::PolynomialFrequencyModel;
use std::f64::consts::TAU;

/// Re-anchors `model` at `target_epoch_ns` while keeping the physical
/// frequency and phase evolution it describes.
pub fn reepoch(model: &mut PolynomialFrequencyModel, target_epoch_ns: i64) {
    let t = seconds_between(model.epoch_ns, target_epoch_ns);
    shift_origin(model, t);
    model.epoch_ns = target_epoch_ns;
}

/// Moves the polynomial origin forward by `t` seconds without touching the
/// stored epoch.
///
/// The binomial shift pass must finish on the raw coefficients before the
/// normalization pass divides them by the new frequency factor; the two
/// loops are not interchangeable.
pub fn shift_origin(model: &mut PolynomialFrequencyModel, t: f64) {
    let coefficients = &mut model.spindown;
    let length = coefficients.len();
    let mut t_n = 1.0;
    let mut f_fac = 1.0;
    let mut t_fac = 1.0;

    for i in 0..length {
        let mut t_m = 1.0;
        t_n *= t;
        f_fac += coefficients[i] * t_n;
        t_fac += coefficients[i] * t_n / (i as f64 + 2.0);
        // Ascending order: every coefficients[j] read here is still unshifted.
        for j in (i + 1)..length {
            t_m *= t;
            let term = choose(j as u32 + 1, i as u32 + 1) as f64 * coefficients[j] * t_m;
            coefficients[i] += term;
        }
    }

    model.phi0 += TAU * model.f0 * t * t_fac;
    model.f0 *= f_fac;
    for coefficient in coefficients.iter_mut() {
        *coefficient /= f_fac;
    }
}
