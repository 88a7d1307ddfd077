pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f32]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| f64::from(v) * f64::from(v)).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    pub fn peak_abs(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0, |peak: f32, &v| peak.max(v.abs()))
    }

    pub fn all_finite(samples: &[f32]) -> bool {
        samples.iter().all(|v| v.is_finite())
    }
}
