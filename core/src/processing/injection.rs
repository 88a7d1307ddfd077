use crate::model::TimeSeries;
use crate::prelude::{SimulationError, SimulationResult};
use crate::processing::buffer_pool::BufferPool;
use std::sync::Mutex;

/// Adds `signal` into `output` sample by sample.
///
/// Both series share length and sampling interval by construction; the
/// shape is only asserted in debug builds.
pub fn inject(output: &mut [f32], signal: &[f32]) {
    debug_assert_eq!(output.len(), signal.len());
    for (out, sig) in output.iter_mut().zip(signal) {
        *out += *sig;
    }
}

/// Owns the run-wide output series and sums per-line signals into it.
pub struct InjectionAccumulator {
    output: TimeSeries,
    injected: usize,
}

impl InjectionAccumulator {
    pub fn new(output: TimeSeries) -> Self {
        Self {
            output,
            injected: 0,
        }
    }

    /// Allocates a zeroed per-line signal with the output's exact shape.
    pub fn blank_signal(&self, pool: &mut BufferPool) -> SimulationResult<TimeSeries> {
        let buffer = pool.checkout(self.output.len())?;
        Ok(self.output.blank_like(buffer))
    }

    pub fn inject(&mut self, signal: &TimeSeries) {
        debug_assert!(self.output.same_shape(signal));
        inject(self.output.samples_mut(), signal.samples());
        self.injected += 1;
    }

    pub fn injected(&self) -> usize {
        self.injected
    }

    pub fn output(&self) -> &TimeSeries {
        &self.output
    }

    pub fn into_output(self) -> TimeSeries {
        self.output
    }
}

/// Accumulator whose merge step may be called from several threads.
///
/// Each merge holds the lock for the whole per-sample read-modify-write, so
/// concurrent merges never interleave within a signal.
pub struct SharedAccumulator {
    inner: Mutex<InjectionAccumulator>,
}

impl SharedAccumulator {
    pub fn new(output: TimeSeries) -> Self {
        Self {
            inner: Mutex::new(InjectionAccumulator::new(output)),
        }
    }

    pub fn merge(&self, signal: &TimeSeries) -> SimulationResult<()> {
        if let Ok(mut accumulator) = self.inner.lock() {
            if !accumulator.output.same_shape(signal) {
                return Err(SimulationError::Subroutine(format!(
                    "signal of {} samples does not match output of {} samples",
                    signal.len(),
                    accumulator.output.len()
                )));
            }
            accumulator.inject(signal);
            Ok(())
        } else {
            Err(SimulationError::Subroutine("accumulator lock poisoned".into()))
        }
    }

    pub fn into_inner(self) -> SimulationResult<InjectionAccumulator> {
        self.inner
            .into_inner()
            .map_err(|_| SimulationError::Subroutine("accumulator lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn series(samples: Vec<f32>) -> TimeSeries {
        TimeSeries::with_samples("test", 0, 0.5, samples)
    }

    #[test]
    fn injection_order_does_not_matter() {
        let s1 = series(vec![1.0, -2.5, 3.25, 0.0]);
        let s2 = series(vec![0.5, 4.0, -1.0, 7.0]);

        let mut forward = InjectionAccumulator::new(series(vec![0.0; 4]));
        forward.inject(&s1);
        forward.inject(&s2);

        let mut backward = InjectionAccumulator::new(series(vec![0.0; 4]));
        backward.inject(&s2);
        backward.inject(&s1);

        assert_eq!(forward.output().samples(), backward.output().samples());
        assert_eq!(forward.injected(), 2);
    }

    #[test]
    fn zero_signal_is_a_no_op() {
        let mut accumulator = InjectionAccumulator::new(series(vec![1.0, 2.0, 3.0]));
        accumulator.inject(&series(vec![0.0; 3]));
        assert_eq!(accumulator.output().samples(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn blank_signal_matches_output_shape() {
        let mut pool = BufferPool::with_capacity(1);
        let accumulator = InjectionAccumulator::new(series(vec![0.0; 6]));
        let signal = accumulator.blank_signal(&mut pool).unwrap();
        assert!(signal.same_shape(accumulator.output()));
    }

    #[test]
    fn random_signals_commute() {
        let mut rng = StdRng::seed_from_u64(42);
        let signals: Vec<TimeSeries> = (0..5)
            .map(|_| series((0..32).map(|_| rng.gen_range(-100i32..100) as f32).collect()))
            .collect();

        let mut forward = InjectionAccumulator::new(series(vec![0.0; 32]));
        signals.iter().for_each(|s| forward.inject(s));
        let mut reverse = InjectionAccumulator::new(series(vec![0.0; 32]));
        signals.iter().rev().for_each(|s| reverse.inject(s));

        assert_eq!(forward.output().samples(), reverse.output().samples());
    }

    #[test]
    fn shared_merges_from_threads_match_serial_sum() {
        let signals: Vec<TimeSeries> = (0..4)
            .map(|k| series(vec![k as f32; 16]))
            .collect();
        let shared = SharedAccumulator::new(series(vec![0.0; 16]));
        std::thread::scope(|scope| {
            for signal in &signals {
                let shared = &shared;
                scope.spawn(move || shared.merge(signal).unwrap());
            }
        });
        let accumulator = shared.into_inner().unwrap();
        assert_eq!(accumulator.injected(), 4);
        assert!(accumulator.output().samples().iter().all(|&v| v == 6.0));
    }

    #[test]
    fn shared_merge_rejects_mismatched_shape() {
        let shared = SharedAccumulator::new(series(vec![0.0; 4]));
        assert!(shared.merge(&series(vec![1.0; 3])).is_err());
    }
}
