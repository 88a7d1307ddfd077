use crate::model::time::seconds_between;
use crate::model::PolynomialFrequencyModel;
use crate::prelude::{SimulationError, SimulationResult};
use crate::synthesis::{DenseWaveform, GenerationRequest, WaveformGenerator};
use log::debug;

/// Samples a Taylor-expanded frequency/phase model on a uniform grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaylorGenerator;

impl TaylorGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn allocate<T>(length: usize, what: &str) -> SimulationResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(length)
        .map_err(|err| SimulationError::Memory(format!("allocating {length} {what} samples: {err}")))?;
    Ok(buffer)
}

impl WaveformGenerator for TaylorGenerator {
    fn generate(&self, model: &PolynomialFrequencyModel, request: &GenerationRequest) -> SimulationResult<DenseWaveform> {
        if request.length < 2 {
            return Err(SimulationError::Subroutine(format!(
                "waveform needs at least two samples, got {}",
                request.length
            )));
        }
        if !(request.delta_t > 0.0) || !request.delta_t.is_finite() {
            return Err(SimulationError::Subroutine(format!(
                "waveform sampling interval must be positive, got {}",
                request.delta_t
            )));
        }

        let offset = seconds_between(model.epoch_ns, request.start_epoch_ns);
        let amplitude_pair = [model.a_plus as f32, model.a_cross as f32];
        let mut amplitude = allocate(request.length, "amplitude")?;
        let mut frequency = allocate(request.length, "frequency")?;
        let mut phase = allocate(request.length, "phase")?;
        let mut dfdt: f64 = 0.0;
        let mut previous: Option<f64> = None;

        for i in 0..request.length {
            let t = offset + i as f64 * request.delta_t;
            let f = model.frequency_at(t);
            if let Some(prev) = previous {
                dfdt = dfdt.max((f - prev).abs() * request.delta_t);
            }
            previous = Some(f);
            amplitude.push(amplitude_pair);
            frequency.push(f as f32);
            phase.push(model.phase_at(t));
        }

        debug!(
            "generated {} samples at dt={:.6e}s, max df*dt={:.3e}",
            request.length, request.delta_t, dfdt
        );

        Ok(DenseWaveform {
            epoch_ns: request.start_epoch_ns,
            delta_t: request.delta_t,
            psi: model.psi,
            amplitude,
            frequency,
            phase,
            dfdt,
        })
    }
}
