//! Waveform generation and detector-output synthesis collaborators.
//!
//! The driver only talks to the [`WaveformGenerator`] and
//! [`SignalSynthesizer`] traits; the bundled implementations cover the
//! Taylor-expanded source and the stationary barycentric detector.

pub mod coherent;
pub mod taylor;

pub use coherent::BarycentricSynthesizer;
pub use taylor::TaylorGenerator;

use crate::detector::DetectorResponse;
use crate::model::{PolynomialFrequencyModel, TimeSeries};
use crate::prelude::SimulationResult;
use serde::{Deserialize, Serialize};

/// Where and how densely the generator should sample the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub start_epoch_ns: i64,
    pub delta_t: f64,
    pub length: usize,
}

/// Sampled amplitude, frequency and phase of one source.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseWaveform {
    pub epoch_ns: i64,
    pub delta_t: f64,
    pub psi: f64,
    /// Plus and cross amplitudes per sample.
    pub amplitude: Vec<[f32; 2]>,
    /// Instantaneous frequency, Hz.
    pub frequency: Vec<f32>,
    /// Phase, radians.
    pub phase: Vec<f64>,
    /// Largest `df * dt` between consecutive samples.
    pub dfdt: f64,
}

impl DenseWaveform {
    pub fn len(&self) -> usize {
        self.phase.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phase.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.delta_t * self.len().saturating_sub(1) as f64
    }
}

/// Diagnostics from one synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SynthesisReport {
    /// Output samples outside the waveform's time span.
    pub outside_span: usize,
    /// Output samples whose frequency fell outside the transfer function grid.
    pub outside_band: usize,
    /// Largest instantaneous frequency seen in the output span, after heterodyning.
    pub max_frequency: f64,
}

pub trait WaveformGenerator {
    fn generate(&self, model: &PolynomialFrequencyModel, request: &GenerationRequest) -> SimulationResult<DenseWaveform>;
}

pub trait SignalSynthesizer {
    /// Writes the detector output for `waveform` into `signal`, which arrives
    /// zeroed and already shaped like the run's output series.
    fn synthesize(
        &self,
        waveform: &DenseWaveform,
        detector: &DetectorResponse,
        signal: &mut TimeSeries,
    ) -> SimulationResult<SynthesisReport>;
}
