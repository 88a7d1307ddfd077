use crate::workflow::runner::WorkflowResult;
use anyhow::Context;
use cwcore::math::{FftHelper, StatsHelper};
use cwcore::prelude::SimulationError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub lines_injected: usize,
    pub lines_rejected: usize,
    pub warnings: usize,
    pub samples: usize,
    pub epoch_ns: i64,
    pub delta_t: f64,
    pub rms: f64,
    pub peak_abs: f32,
    pub dominant_frequency_hz: Option<f64>,
    pub stopped_at_line: Option<usize>,
    pub stopped_reason: Option<String>,
}

impl RunSummary {
    pub fn from_result(result: &WorkflowResult) -> Self {
        let output = &result.output;
        let samples = output.samples();
        // Heterodyned output reports the tone relative to the reference frequency.
        let dominant_frequency_hz = if samples.is_empty() {
            None
        } else {
            FftHelper::new(samples.len()).dominant_frequency(samples, output.delta_t)
        };

        Self {
            lines_injected: result.metrics.lines_injected,
            lines_rejected: result.metrics.lines_rejected,
            warnings: result.metrics.warnings,
            samples: samples.len(),
            epoch_ns: output.epoch_ns,
            delta_t: output.delta_t,
            rms: StatsHelper::rms(samples),
            peak_abs: StatsHelper::peak_abs(samples),
            dominant_frequency_hz,
            stopped_at_line: result.stopped_at.as_ref().map(|stop| stop.line),
            stopped_reason: result.stopped_at.as_ref().map(|stop| stop.reason.clone()),
        }
    }
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    let file = File::create(path)
        .map_err(|err| SimulationError::file(path, err))
        .with_context(|| format!("creating summary {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("writing summary {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::runner::StoppedAt;
    use cwcore::model::TimeSeries;
    use cwcore::telemetry::RunMetrics;
    use std::f64::consts::TAU;
    use tempfile::NamedTempFile;

    fn result(samples: Vec<f32>) -> WorkflowResult {
        WorkflowResult {
            output: TimeSeries::with_samples("out", 0, 1.0 / 128.0, samples),
            metrics: RunMetrics {
                lines_injected: 1,
                lines_rejected: 1,
                warnings: 0,
            },
            stopped_at: Some(StoppedAt {
                line: 2,
                reason: "bad value".into(),
            }),
        }
    }

    #[test]
    fn summary_describes_tone() {
        let samples = (0..128)
            .map(|k| (2.0 * (TAU * 16.0 * k as f64 / 128.0).cos()) as f32)
            .collect();
        let summary = RunSummary::from_result(&result(samples));

        assert_eq!(summary.samples, 128);
        assert_eq!(summary.stopped_at_line, Some(2));
        assert_eq!(summary.stopped_reason.as_deref(), Some("bad value"));
        assert!((summary.rms - 2.0_f64.sqrt()).abs() < 1e-4);
        assert!((summary.peak_abs - 2.0).abs() < 1e-6);
        assert!((summary.dominant_frequency_hz.unwrap() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn empty_output_has_no_dominant_frequency() {
        let summary = RunSummary::from_result(&result(Vec::new()));
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.rms, 0.0);
        assert_eq!(summary.dominant_frequency_hz, None);
    }

    #[test]
    fn summary_file_is_json() {
        let summary = RunSummary::from_result(&result(vec![1.0, -1.0, 1.0, -1.0]));
        let file = NamedTempFile::new().unwrap();
        write_summary(file.path(), &summary).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let parsed: RunSummary = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, summary);
        assert!(text.contains("\"lines_injected\": 1"));
    }
}
