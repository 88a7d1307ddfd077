use crate::prelude::{SimulationError, SimulationResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical unit attached to series samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SampleUnit {
    #[default]
    Dimensionless,
    Strain,
    AdcCount,
}

impl fmt::Display for SampleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dimensionless => "dimensionless",
            Self::Strain => "strain",
            Self::AdcCount => "count",
        };
        f.write_str(name)
    }
}

/// Unit of a quantity that maps `denominator` samples onto `numerator` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRatio {
    pub numerator: SampleUnit,
    pub denominator: SampleUnit,
}

impl UnitRatio {
    pub fn new(numerator: SampleUnit, denominator: SampleUnit) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Checks that this ratio turns `input` samples into `output` samples.
    pub fn converts(&self, input: SampleUnit, output: SampleUnit) -> bool {
        self.denominator == input && self.numerator == output
    }
}

impl fmt::Display for UnitRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}^-1", self.numerator, self.denominator)
    }
}

/// Complex samples on a uniform frequency grid `f0 + k * delta_f`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySeries {
    pub epoch_ns: i64,
    pub f0: f64,
    pub delta_f: f64,
    pub data: Vec<Complex64>,
}

impl FrequencySeries {
    pub fn new(epoch_ns: i64, f0: f64, delta_f: f64, data: Vec<Complex64>) -> SimulationResult<Self> {
        if !(delta_f > 0.0) || !delta_f.is_finite() {
            return Err(SimulationError::Range(format!(
                "frequency step must be positive, got {delta_f}"
            )));
        }
        if data.is_empty() {
            return Err(SimulationError::Range(
                "frequency series needs at least one sample".into(),
            ));
        }
        Ok(Self {
            epoch_ns,
            f0,
            delta_f,
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn max_frequency(&self) -> f64 {
        self.f0 + self.delta_f * (self.data.len() - 1) as f64
    }

    /// Linearly interpolated value at `frequency`, or `None` off the grid.
    pub fn value_at(&self, frequency: f64) -> Option<Complex64> {
        crate::math::interp::linear_on_grid(&self.data, self.f0, self.delta_f, frequency)
    }
}

/// Measured detector response R(f), mapping ADC output to strain.
pub type ResponseTable = FrequencySeries;

/// Detector transfer function T(f) = 1/R(f) with its explicit unit relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    pub series: FrequencySeries,
    pub units: UnitRatio,
}

/// Real samples on a uniform time grid.
///
/// The length and sampling interval are fixed when the series is allocated;
/// only sample values change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub name: String,
    pub epoch_ns: i64,
    pub delta_t: f64,
    /// Heterodyne reference frequency, zero when the series is not heterodyned.
    pub f0: f64,
    pub sample_unit: SampleUnit,
    data: Vec<f32>,
}

impl TimeSeries {
    /// Allocates a zero-filled series, reporting allocation failure instead of aborting.
    pub fn zeroed(name: impl Into<String>, epoch_ns: i64, delta_t: f64, length: usize) -> SimulationResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(length).map_err(|err| {
            SimulationError::Memory(format!("allocating {length} samples: {err}"))
        })?;
        data.resize(length, 0.0);
        Ok(Self::with_samples(name, epoch_ns, delta_t, data))
    }

    pub fn with_samples(name: impl Into<String>, epoch_ns: i64, delta_t: f64, data: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            epoch_ns,
            delta_t,
            f0: 0.0,
            sample_unit: SampleUnit::default(),
            data,
        }
    }

    /// Builds a series with this one's shape and metadata around `buffer`.
    ///
    /// The buffer is resized to this series' length and zero-filled.
    pub fn blank_like(&self, mut buffer: Vec<f32>) -> Self {
        buffer.clear();
        buffer.resize(self.data.len(), 0.0);
        Self {
            name: self.name.clone(),
            epoch_ns: self.epoch_ns,
            delta_t: self.delta_t,
            f0: self.f0,
            sample_unit: self.sample_unit,
            data: buffer,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }

    pub fn same_shape(&self, other: &TimeSeries) -> bool {
        self.data.len() == other.data.len()
            && self.delta_t == other.delta_t
            && self.epoch_ns == other.epoch_ns
    }

    /// Span covered by the samples, in seconds.
    pub fn duration(&self) -> f64 {
        self.delta_t * self.data.len() as f64
    }
}
