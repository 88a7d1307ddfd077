use crate::detector::DetectorResponse;
use crate::math::interp::{lerp, locate};
use crate::model::time::seconds_between;
use crate::model::{SampleUnit, TimeSeries};
use crate::prelude::{SimulationError, SimulationResult};
use crate::synthesis::{DenseWaveform, SignalSynthesizer, SynthesisReport};
use num_complex::Complex64;
use std::f64::consts::TAU;

/// Detector output for a stationary detector at the solar-system barycenter.
///
/// The detector frame is aligned with the wave's + polarization at psi = 0,
/// so the polarization weights reduce to `cos 2psi` and `sin 2psi`. The
/// transfer function is applied at the instantaneous frequency of each
/// sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarycentricSynthesizer;

impl BarycentricSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

impl SignalSynthesizer for BarycentricSynthesizer {
    fn synthesize(
        &self,
        waveform: &DenseWaveform,
        detector: &DetectorResponse,
        signal: &mut TimeSeries,
    ) -> SimulationResult<SynthesisReport> {
        if let Some(site) = detector.site {
            return Err(SimulationError::Subroutine(format!(
                "barycentric synthesizer cannot model the antenna response of site {site}"
            )));
        }
        let units = detector.transfer.units;
        if !units.converts(SampleUnit::Strain, signal.sample_unit) {
            return Err(SimulationError::Subroutine(format!(
                "transfer function in {units} cannot produce {} samples",
                signal.sample_unit
            )));
        }
        if waveform.len() < 2 || waveform.frequency.len() != waveform.len() || waveform.amplitude.len() != waveform.len() {
            return Err(SimulationError::Subroutine(
                "waveform sequences are too short or of unequal length".into(),
            ));
        }

        let f_plus = (2.0 * waveform.psi).cos();
        let f_cross = (2.0 * waveform.psi).sin();
        let start_offset = seconds_between(waveform.epoch_ns, signal.epoch_ns);
        let heterodyne = signal.f0;
        let heterodyne_offset = seconds_between(detector.heterodyne_epoch_ns, signal.epoch_ns);
        let delta_t = signal.delta_t;
        let transfer = &detector.transfer.series;
        let mut report = SynthesisReport::default();

        for (k, sample) in signal.samples_mut().iter_mut().enumerate() {
            let elapsed = k as f64 * delta_t;
            let Some((i, frac)) = locate((start_offset + elapsed) / waveform.delta_t, waveform.len()) else {
                report.outside_span += 1;
                continue;
            };

            let frequency = lerp(f64::from(waveform.frequency[i]), f64::from(waveform.frequency[i + 1]), frac);
            let mut phase = lerp(waveform.phase[i], waveform.phase[i + 1], frac);
            let a_plus = lerp(f64::from(waveform.amplitude[i][0]), f64::from(waveform.amplitude[i + 1][0]), frac);
            let a_cross = lerp(f64::from(waveform.amplitude[i][1]), f64::from(waveform.amplitude[i + 1][1]), frac);

            let mut observed = frequency;
            if heterodyne != 0.0 {
                phase -= TAU * heterodyne * (heterodyne_offset + elapsed);
                observed -= heterodyne;
            }
            report.max_frequency = report.max_frequency.max(observed.abs());

            let Some(gain) = transfer.value_at(frequency) else {
                report.outside_band += 1;
                continue;
            };
            let strain = Complex64::new(f_plus * a_plus, -f_cross * a_cross);
            *sample = (gain * strain * Complex64::from_polar(1.0, phase)).re as f32;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::DetectorSite;
    use crate::model::{FrequencySeries, UnitRatio};
    use crate::processing::transfer::{flat_transfer, response_to_transfer};

    fn waveform(psi: f64, f0: f64, duration: f64) -> DenseWaveform {
        DenseWaveform {
            epoch_ns: 0,
            delta_t: duration,
            psi,
            amplitude: vec![[1000.0, 500.0]; 2],
            frequency: vec![f0 as f32; 2],
            phase: vec![0.0, TAU * f0 * duration],
            dfdt: 0.0,
        }
    }

    fn output(length: usize, delta_t: f64) -> TimeSeries {
        let mut series = TimeSeries::zeroed("out", 0, delta_t, length).unwrap();
        series.sample_unit = SampleUnit::AdcCount;
        series
    }

    #[test]
    fn aligned_detector_sees_plus_polarization() {
        let detector = DetectorResponse::barycentric(flat_transfer(0));
        let mut signal = output(64, 1.0 / 64.0);
        let report = BarycentricSynthesizer::new()
            .synthesize(&waveform(0.0, 4.0, 2.0), &detector, &mut signal)
            .unwrap();

        for (k, &value) in signal.samples().iter().enumerate() {
            let expected = 1000.0 * (TAU * 4.0 * k as f64 / 64.0).cos();
            assert!((f64::from(value) - expected).abs() < 1e-3, "sample {k}");
        }
        assert_eq!(report.outside_span, 0);
        assert_eq!(report.max_frequency, 4.0);
    }

    #[test]
    fn rotated_polarization_picks_up_cross_amplitude() {
        let detector = DetectorResponse::barycentric(flat_transfer(0));
        let mut signal = output(32, 1.0 / 32.0);
        BarycentricSynthesizer::new()
            .synthesize(&waveform(std::f64::consts::FRAC_PI_4, 2.0, 1.0), &detector, &mut signal)
            .unwrap();

        for (k, &value) in signal.samples().iter().enumerate() {
            let expected = 500.0 * (TAU * 2.0 * k as f64 / 32.0).sin();
            assert!((f64::from(value) - expected).abs() < 1e-3, "sample {k}");
        }
    }

    #[test]
    fn transfer_gain_scales_output() {
        let response = FrequencySeries::new(0, 0.0, 100.0, vec![Complex64::new(2.0, 0.0); 2]).unwrap();
        let detector = DetectorResponse::barycentric(response_to_transfer(response).unwrap());
        let mut signal = output(16, 1.0 / 16.0);
        BarycentricSynthesizer::new()
            .synthesize(&waveform(0.0, 1.0, 1.0), &detector, &mut signal)
            .unwrap();
        assert!((signal.samples()[0] - 500.0).abs() < 1e-3);
    }

    #[test]
    fn samples_past_waveform_end_stay_zero() {
        let detector = DetectorResponse::barycentric(flat_transfer(0));
        let mut signal = output(8, 1.0);
        let report = BarycentricSynthesizer::new()
            .synthesize(&waveform(0.0, 0.25, 4.0), &detector, &mut signal)
            .unwrap();
        assert_eq!(report.outside_span, 3);
        assert!(signal.samples()[5..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn frequency_outside_transfer_band_is_counted() {
        let response = FrequencySeries::new(0, 10.0, 1.0, vec![Complex64::new(1.0, 0.0); 3]).unwrap();
        let detector = DetectorResponse::barycentric(response_to_transfer(response).unwrap());
        let mut signal = output(4, 0.25);
        let report = BarycentricSynthesizer::new()
            .synthesize(&waveform(0.0, 100.0, 1.0), &detector, &mut signal)
            .unwrap();
        assert_eq!(report.outside_band, 4);
        assert!(signal.samples().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn heterodyning_removes_carrier_phase() {
        let detector = DetectorResponse::barycentric(flat_transfer(0));
        let mut signal = output(16, 1.0 / 16.0);
        signal.f0 = 4.0;
        let report = BarycentricSynthesizer::new()
            .synthesize(&waveform(0.0, 4.0, 1.0), &detector, &mut signal)
            .unwrap();
        assert!(signal.samples().iter().all(|&v| (v - 1000.0).abs() < 1e-2));
        assert!(report.max_frequency < 1e-9);
    }

    #[test]
    fn located_detector_is_a_subroutine_error() {
        let mut detector = DetectorResponse::barycentric(flat_transfer(0));
        detector.site = Some(DetectorSite::Llo);
        let mut signal = output(4, 0.25);
        let err = BarycentricSynthesizer::new()
            .synthesize(&waveform(0.0, 1.0, 1.0), &detector, &mut signal)
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn mismatched_units_are_rejected() {
        let mut transfer = flat_transfer(0);
        transfer.units = UnitRatio::new(SampleUnit::Strain, SampleUnit::AdcCount);
        let detector = DetectorResponse::barycentric(transfer);
        let mut signal = output(4, 0.25);
        assert!(BarycentricSynthesizer::new()
            .synthesize(&waveform(0.0, 1.0, 1.0), &detector, &mut signal)
            .is_err());
    }
}
