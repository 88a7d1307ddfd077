use std::ops::{Add, Mul, Sub};

/// Linear interpolation between `lower` and `upper` at fraction `frac`.
#[inline]
pub fn lerp<T>(lower: T, upper: T, frac: f64) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    lower + (upper - lower) * frac
}

/// Bracketing index and fraction of `position` in a table of `len` points.
///
/// `position` is measured in units of the table spacing from the first point.
/// Returns `None` outside `[0, len - 1]`. A single-point table only matches
/// position zero.
pub fn locate(position: f64, len: usize) -> Option<(usize, f64)> {
    if len == 0 || !position.is_finite() || position < 0.0 {
        return None;
    }
    let last = (len - 1) as f64;
    if position > last {
        return None;
    }
    if len == 1 {
        return Some((0, 0.0));
    }
    let index = (position.floor() as usize).min(len - 2);
    Some((index, position - index as f64))
}

/// Interpolates a table sampled at `start + k * step`.
pub fn linear_on_grid<T>(values: &[T], start: f64, step: f64, at: f64) -> Option<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    let (index, frac) = locate((at - start) / step, values.len())?;
    if values.len() == 1 {
        return Some(values[0]);
    }
    Some(lerp(values[index], values[index + 1], frac))
}
