use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<RunMetrics>,
}

/// Counters collected over one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    pub lines_injected: usize,
    pub lines_rejected: usize,
    pub warnings: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RunMetrics::default()),
        }
    }

    pub fn record_injected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.lines_injected += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.lines_rejected += 1;
        }
    }

    pub fn record_warning(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.warnings += 1;
        }
    }

    pub fn snapshot(&self) -> RunMetrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            RunMetrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let recorder = MetricsRecorder::new();
        recorder.record_injected();
        recorder.record_injected();
        recorder.record_rejected();
        recorder.record_warning();
        assert_eq!(
            recorder.snapshot(),
            RunMetrics {
                lines_injected: 2,
                lines_rejected: 1,
                warnings: 1,
            }
        );
    }
}
