use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};

/// Helper that wraps the `rustfft` planner for reuse.
pub struct FftHelper {
    fft: std::sync::Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch }
    }

    pub fn len(&self) -> usize {
        self.fft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fft.len() == 0
    }

    pub fn forward(&mut self, input: &[f32]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .map(|&value| Complex64::new(f64::from(value), 0.0))
            .collect();
        buffer.resize(self.fft.len(), Complex64::zero());

        self.fft.process_with_scratch(&mut buffer, &mut self.scratch);
        buffer
    }

    /// Frequency of the strongest non-DC bin of a real series sampled every
    /// `delta_t` seconds, or `None` when the series carries no power.
    pub fn dominant_frequency(&mut self, input: &[f32], delta_t: f64) -> Option<f64> {
        let size = self.fft.len();
        if size < 2 || delta_t <= 0.0 {
            return None;
        }
        let spectrum = self.forward(input);
        let (bin, power) = spectrum[1..=size / 2]
            .iter()
            .map(|c| c.norm_sqr())
            .enumerate()
            .fold((0, 0.0), |best, (idx, power)| {
                if power > best.1 {
                    (idx + 1, power)
                } else {
                    best
                }
            });
        if power > 0.0 {
            Some(bin as f64 / (size as f64 * delta_t))
        } else {
            None
        }
    }
}
