use crate::prelude::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};

/// Safety factor applied to the frequency-derivative bound when choosing
/// the model sampling rate. Together with the square-root sum it targets a
/// phase error around 0.1 rad; it is a tunable heuristic.
pub const RESOLUTION_SAFETY_FACTOR: f64 = 10.0;

/// Largest generator-reported `df * dt` considered safe for interpolation.
pub const DFDT_WARNING_THRESHOLD: f64 = 2.0;

/// Largest model length the generator is asked for.
pub const MAX_MODEL_LENGTH: usize = i32::MAX as usize;

/// Sampling interval and sample count for the coarse frequency/phase model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelResolution {
    pub delta_t: f64,
    pub length: usize,
    /// Estimated required sampling rate, 1/s.
    pub dt_inv: f64,
}

impl ModelResolution {
    /// Estimates the model resolution for a waveform of `duration` seconds.
    ///
    /// `f0` and `spindown` must already be anchored at the waveform start.
    /// A non-finite rate is a range error; a model longer than
    /// [`MAX_MODEL_LENGTH`] samples is a memory error.
    pub fn estimate(f0: f64, spindown: &[f64], duration: f64) -> SimulationResult<Self> {
        if !(duration > 0.0) || !duration.is_finite() {
            return Err(SimulationError::Range(format!(
                "waveform duration must be positive and finite, got {duration}"
            )));
        }
        let mut t_n = 1.0;
        let mut dt_inv = 0.0;
        for (i, coefficient) in spindown.iter().enumerate() {
            dt_inv += ((i as f64 + 1.0) * coefficient.abs() * t_n).sqrt();
            t_n *= duration;
        }
        dt_inv *= RESOLUTION_SAFETY_FACTOR * f0.abs().sqrt();
        if !dt_inv.is_finite() {
            return Err(SimulationError::Range(format!(
                "model sampling rate is not finite (f0 = {f0}, {} spindown terms)",
                spindown.len()
            )));
        }

        if dt_inv < 1.0 / duration {
            return Ok(Self {
                delta_t: duration,
                length: 2,
                dt_inv,
            });
        }
        let intervals = (duration * dt_inv).floor();
        if intervals >= (MAX_MODEL_LENGTH - 2) as f64 {
            return Err(SimulationError::Memory(format!(
                "model needs {intervals:e} samples, limit is {MAX_MODEL_LENGTH}"
            )));
        }
        Ok(Self {
            delta_t: 1.0 / dt_inv,
            length: intervals as usize + 2,
            dt_inv,
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.length == 2
    }
}

/// True when the generator's reported `df * dt` is too large for safe interpolation.
pub fn resolution_too_coarse(dfdt: f64) -> bool {
    dfdt > DFDT_WARNING_THRESHOLD
}
