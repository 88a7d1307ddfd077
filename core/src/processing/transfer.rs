use crate::model::{FrequencySeries, ResponseTable, SampleUnit, TransferFunction, UnitRatio};
use crate::prelude::{SimulationError, SimulationResult};
use num_complex::Complex64;

/// Upper cutoff of the flat unit response used when no response table is given.
pub const FLAT_RESPONSE_CUTOFF_HZ: f64 = 16384.0;

/// Unit relation carried by every transfer function: strain in, ADC counts out.
pub fn transfer_units() -> UnitRatio {
    UnitRatio::new(SampleUnit::AdcCount, SampleUnit::Strain)
}

/// Inverts a measured response R(f) into the transfer function T(f) = 1/R(f).
///
/// Fails on the first exactly-zero response sample rather than producing
/// infinities.
pub fn response_to_transfer(response: ResponseTable) -> SimulationResult<TransferFunction> {
    if let Some(index) = response.data.iter().position(|r| *r == Complex64::new(0.0, 0.0)) {
        return Err(SimulationError::Range(format!(
            "response sample {index} at {} Hz is zero and cannot be inverted",
            response.f0 + response.delta_f * index as f64
        )));
    }
    let unity = Complex64::new(1.0, 0.0);
    let ResponseTable {
        epoch_ns,
        f0,
        delta_f,
        mut data,
    } = response;
    for sample in data.iter_mut() {
        *sample = unity / *sample;
    }
    Ok(TransferFunction {
        series: FrequencySeries {
            epoch_ns,
            f0,
            delta_f,
            data,
        },
        units: transfer_units(),
    })
}

/// Ideal unit-gain detector: T(f) = 1 from 0 Hz up to [`FLAT_RESPONSE_CUTOFF_HZ`].
pub fn flat_transfer(epoch_ns: i64) -> TransferFunction {
    let unity = Complex64::new(1.0, 0.0);
    TransferFunction {
        series: FrequencySeries {
            epoch_ns,
            f0: 0.0,
            delta_f: FLAT_RESPONSE_CUTOFF_HZ,
            data: vec![unity, unity],
        },
        units: transfer_units(),
    }
}

/// Builds the transfer function from an optional response table.
pub fn transfer_from(response: Option<ResponseTable>, default_epoch_ns: i64) -> SimulationResult<TransferFunction> {
    match response {
        Some(table) => response_to_transfer(table),
        None => Ok(flat_transfer(default_epoch_ns)),
    }
}
