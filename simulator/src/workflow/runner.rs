use crate::generator::source::{SourceEntry, SourceStream};
use crate::io::{read_ephemerides, read_response};
use crate::workflow::config::RunConfig;
use anyhow::Context;
use cwcore::detector::DetectorResponse;
use cwcore::model::{GpsTime, SampleUnit, TimeSeries};
use cwcore::prelude::bounded_message;
use cwcore::processing::resolution::resolution_too_coarse;
use cwcore::processing::{reepoch, transfer_from, BufferPool, InjectionAccumulator, ModelResolution};
use cwcore::synthesis::{
    BarycentricSynthesizer, GenerationRequest, SignalSynthesizer, TaylorGenerator, WaveformGenerator,
};
use cwcore::telemetry::{LogManager, MetricsRecorder, RunMetrics};

pub const OUTPUT_NAME: &str = "Taylor CW waveform";

/// Where reading stopped on a line that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct StoppedAt {
    pub line: usize,
    pub reason: String,
}

pub struct WorkflowResult {
    pub output: TimeSeries,
    pub metrics: RunMetrics,
    pub stopped_at: Option<StoppedAt>,
}

/// Drives one run: reads every source, generates and synthesizes its signal,
/// and injects it into the shared output series.
pub struct Runner<G = TaylorGenerator, S = BarycentricSynthesizer> {
    config: RunConfig,
    generator: G,
    synthesizer: S,
    logger: LogManager,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self::with_collaborators(config, TaylorGenerator::new(), BarycentricSynthesizer::new())
    }
}

impl<G: WaveformGenerator, S: SignalSynthesizer> Runner<G, S> {
    pub fn with_collaborators(config: RunConfig, generator: G, synthesizer: S) -> Self {
        Self {
            config,
            generator,
            synthesizer,
            logger: LogManager::scoped("simulate-taylor-cw"),
        }
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        self.config.validate().context("validating run parameters")?;

        let mut output = TimeSeries::zeroed(
            OUTPUT_NAME,
            self.config.output_epoch_ns()?,
            self.config.timing.dt,
            self.config.sample_count(),
        )
        .context("allocating output series")?;
        output.f0 = self.config.heterodyne_frequency();
        output.sample_unit = SampleUnit::AdcCount;

        let detector = self.build_detector()?;
        let span = self.config.waveform_span()?;
        let duration = span.duration();
        let nyquist = 0.5 / self.config.timing.dt;
        let metrics = MetricsRecorder::new();

        let mut sources = SourceStream::open(self.config.source_file.as_deref()).context("opening source file")?;
        let mut accumulator = InjectionAccumulator::new(output);
        let mut pool = BufferPool::with_capacity(1);
        let mut stopped_at = None;

        for entry in &mut sources {
            let mut model = match entry.context("reading source file")? {
                SourceEntry::Model(model) => model,
                SourceEntry::Malformed { line, reason } => {
                    self.logger
                        .warning(&format!("source line {line} is malformed ({reason}); stopping"));
                    metrics.record_rejected();
                    stopped_at = Some(StoppedAt { line, reason });
                    break;
                }
            };

            reepoch(&mut model, span.start_ns);
            let resolution = ModelResolution::estimate(model.f0, &model.spindown, duration)
                .context("estimating model resolution")?;
            self.logger.detail(&format!(
                "source f0={:.6} Hz with {} spindown terms: model dt={:.6e}s, {} samples",
                model.f0,
                model.spindown.len(),
                resolution.delta_t,
                resolution.length
            ));

            let request = GenerationRequest {
                start_epoch_ns: span.start_ns,
                delta_t: resolution.delta_t,
                length: resolution.length,
            };
            let waveform = self
                .generator
                .generate(&model, &request)
                .context("generating Taylor waveform")?;
            if resolution_too_coarse(waveform.dfdt) {
                let message = bounded_message(format!(
                    "waveform sampling interval is too large: maximum df*dt = {:.6}",
                    waveform.dfdt
                ))?;
                self.logger.warning(&message);
                metrics.record_warning();
            }

            let mut signal = accumulator.blank_signal(&mut pool)?;
            let report = self
                .synthesizer
                .synthesize(&waveform, &detector, &mut signal)
                .context("simulating detector output")?;
            if report.max_frequency > nyquist {
                self.logger.warning(&format!(
                    "wave frequency {:.3} Hz exceeds the output Nyquist frequency {:.3} Hz",
                    report.max_frequency, nyquist
                ));
                metrics.record_warning();
            }
            if report.outside_span > 0 || report.outside_band > 0 {
                self.logger.warning(&format!(
                    "{} samples outside the waveform span, {} outside the transfer band were left at zero",
                    report.outside_span, report.outside_band
                ));
                metrics.record_warning();
            }

            accumulator.inject(&signal);
            pool.release(signal.into_samples());
            metrics.record_injected();
        }

        self.logger.record(&format!(
            "injected {} source(s) into {} samples starting at GPS {}",
            accumulator.injected(),
            accumulator.output().len(),
            GpsTime::from_nanos(accumulator.output().epoch_ns)
        ));

        Ok(WorkflowResult {
            output: accumulator.into_output(),
            metrics: metrics.snapshot(),
            stopped_at,
        })
    }

    fn build_detector(&self) -> anyhow::Result<DetectorResponse> {
        let response = self
            .config
            .response_file
            .as_deref()
            .map(read_response)
            .transpose()
            .context("reading response file")?;
        let transfer = transfer_from(response, 0).context("converting response to transfer function")?;
        self.logger.detail(&format!(
            "transfer function: {} samples from {} Hz, units {}",
            transfer.series.len(),
            transfer.series.f0,
            transfer.units
        ));

        let mut detector = DetectorResponse::barycentric(transfer);
        detector.heterodyne_epoch_ns = self.config.heterodyne_epoch_ns()?;
        if let Some(location) = &self.config.location {
            detector.site = self.config.site()?;
            if let Some(site) = detector.site {
                let geometry = site.geometry();
                self.logger.detail(&format!(
                    "site {site}: latitude {:.4} deg, longitude {:.4} deg, elevation {:.1} m",
                    geometry.latitude_deg, geometry.longitude_deg, geometry.elevation_m
                ));
            }
            detector.ephemerides = Some(
                read_ephemerides(&location.earth_file, &location.sun_file).context("reading ephemerides")?,
            );
        }
        Ok(detector)
    }
}

/// Runs the driver with the bundled collaborators.
pub fn run(config: RunConfig) -> anyhow::Result<WorkflowResult> {
    Runner::new(config).execute()
}
