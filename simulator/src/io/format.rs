/// Formats `value` like C's `printf("%W.Pe")`: `precision` mantissa digits
/// after the point, an exponent with sign and at least two digits, right
/// aligned to `width`.
pub fn c_exponential(value: f64, width: usize, precision: usize) -> String {
    let body = if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        let rust = format!("{value:.precision$e}");
        match rust.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            None => rust,
        }
    };
    format!("{body:>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_printf_layout() {
        assert_eq!(c_exponential(9.765625e-4, 23, 16), " 9.7656250000000000e-04");
        assert_eq!(c_exponential(1000.0, 16, 9), " 1.000000000e+03");
        assert_eq!(c_exponential(-0.5, 16, 9), "-5.000000000e-01");
        assert_eq!(c_exponential(0.0, 16, 9), " 0.000000000e+00");
        assert_eq!(c_exponential(1.0e-120, 16, 9), "1.000000000e-120");
    }

    #[test]
    fn non_finite_values_use_c_spelling() {
        assert_eq!(c_exponential(f64::NAN, 5, 2), "  nan");
        assert_eq!(c_exponential(f64::NEG_INFINITY, 5, 2), " -inf");
    }
}
