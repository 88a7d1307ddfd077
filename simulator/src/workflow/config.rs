use anyhow::Context;
use cwcore::detector::{barycentric_padding_ns, DetectorSite};
use cwcore::model::time::{seconds_between, NANOS_PER_SECOND};
use cwcore::prelude::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_NPT: i64 = 65536;
pub const DEFAULT_DT: f64 = 9.765625e-4;
const MAX_NPT: i64 = i32::MAX as i64;

fn parse_field<T: FromStr>(flag: &str, name: &str, value: &str) -> SimulationResult<T> {
    value
        .parse()
        .map_err(|_| SimulationError::Argument(format!("{flag}: cannot parse {name} from {value:?}")))
}

fn epoch_ns(what: &str, sec: i64, nsec: i64) -> SimulationResult<i64> {
    NANOS_PER_SECOND
        .checked_mul(sec)
        .and_then(|ns| ns.checked_add(nsec))
        .ok_or_else(|| SimulationError::Range(format!("{what} {sec} s + {nsec} ns overflows a nanosecond epoch")))
}

fn expect_fields<'a>(flag: &str, values: &'a [String], count: usize) -> SimulationResult<&'a [String]> {
    if values.len() != count {
        return Err(SimulationError::Argument(format!(
            "{flag} takes {count} values, got {}",
            values.len()
        )));
    }
    Ok(values)
}

/// Output timing: start epoch, sample count and sampling interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub sec: i64,
    pub nsec: i64,
    pub npt: i64,
    pub dt: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sec: 0,
            nsec: 0,
            npt: DEFAULT_NPT,
            dt: DEFAULT_DT,
        }
    }
}

impl TimingConfig {
    /// Parses `sec nsec npt dt`.
    pub fn from_args(values: &[String]) -> SimulationResult<Self> {
        let values = expect_fields("-t", values, 4)?;
        Ok(Self {
            sec: parse_field("-t", "sec", &values[0])?,
            nsec: parse_field("-t", "nsec", &values[1])?,
            npt: parse_field("-t", "npt", &values[2])?,
            dt: parse_field("-t", "dt", &values[3])?,
        })
    }
}

/// Ideal heterodyning: phase subtraction at `frequency` from the given epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeterodyneConfig {
    pub sec: i64,
    pub nsec: i64,
    pub frequency: f64,
}

impl HeterodyneConfig {
    /// Parses `hsec hnsec fh`.
    pub fn from_args(values: &[String]) -> SimulationResult<Self> {
        let values = expect_fields("-h", values, 3)?;
        Ok(Self {
            sec: parse_field("-h", "hsec", &values[0])?,
            nsec: parse_field("-h", "hnsec", &values[1])?,
            frequency: parse_field("-h", "fh", &values[2])?,
        })
    }
}

/// Detector site plus the Earth and Sun ephemeris files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub site: String,
    pub earth_file: PathBuf,
    pub sun_file: PathBuf,
}

impl LocationConfig {
    /// Parses `site earthfile sunfile`.
    pub fn from_args(values: &[String]) -> SimulationResult<Self> {
        let values = expect_fields("-l", values, 3)?;
        Ok(Self {
            site: values[0].clone(),
            earth_file: PathBuf::from(&values[1]),
            sun_file: PathBuf::from(&values[2]),
        })
    }
}

/// Time range covered by every generated waveform, in GPS nanoseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveformSpan {
    pub start_ns: i64,
    pub stop_ns: i64,
}

impl WaveformSpan {
    pub fn duration(&self) -> f64 {
        seconds_between(self.start_ns, self.stop_ns)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub source_file: Option<PathBuf>,
    pub response_file: Option<PathBuf>,
    pub location: Option<LocationConfig>,
    pub output_file: Option<PathBuf>,
    pub timing: TimingConfig,
    pub heterodyne: Option<HeterodyneConfig>,
    pub debug_level: u8,
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .map_err(|err| SimulationError::file(path_ref, err))
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .map_err(|err| SimulationError::input_format(path_ref.display().to_string(), err.to_string()))
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Rejects timing values that cannot describe an output series, epochs
    /// outside the nanosecond range, and unknown detector sites.
    pub fn validate(&self) -> SimulationResult<()> {
        let dt = self.timing.dt;
        if !(dt >= f64::MIN_POSITIVE) || !dt.is_finite() {
            return Err(SimulationError::Range(format!("dt = {dt} must be positive and finite")));
        }
        if !(0..=MAX_NPT).contains(&self.timing.npt) {
            return Err(SimulationError::Range(format!(
                "npt = {} outside [0, {MAX_NPT}]",
                self.timing.npt
            )));
        }
        let frequency = self.heterodyne_frequency();
        if !frequency.is_finite() {
            return Err(SimulationError::Range(format!("fh = {frequency} must be finite")));
        }
        self.site()?;
        self.heterodyne_epoch_ns()?;
        self.waveform_span()?;
        Ok(())
    }

    pub fn site(&self) -> SimulationResult<Option<DetectorSite>> {
        self.location
            .as_ref()
            .map(|location| location.site.parse())
            .transpose()
    }

    pub fn output_epoch_ns(&self) -> SimulationResult<i64> {
        epoch_ns("output epoch", self.timing.sec, self.timing.nsec)
    }

    /// Sample count; only meaningful after [`RunConfig::validate`].
    pub fn sample_count(&self) -> usize {
        self.timing.npt.max(0) as usize
    }

    pub fn heterodyne_frequency(&self) -> f64 {
        self.heterodyne.as_ref().map_or(0.0, |h| h.frequency)
    }

    pub fn heterodyne_epoch_ns(&self) -> SimulationResult<i64> {
        self.heterodyne
            .as_ref()
            .map_or(Ok(0), |h| epoch_ns("heterodyne epoch", h.sec, h.nsec))
    }

    /// Waveforms start one second before the output and end at least one
    /// second after it. A located detector widens both ends by the largest
    /// possible barycentric delay.
    pub fn waveform_span(&self) -> SimulationResult<WaveformSpan> {
        let epoch = self.output_epoch_ns()?;
        let covered = (self.timing.dt * self.timing.npt as f64 + 1.0).floor();
        let padding = if self.location.is_some() {
            barycentric_padding_ns()
        } else {
            0
        };
        let overflow = || {
            SimulationError::Range(format!(
                "waveform span of {covered} s from epoch {epoch} ns overflows a nanosecond epoch"
            ))
        };

        // `as` saturates, so an out-of-range span fails the checked multiply.
        let start_ns = epoch
            .checked_sub(NANOS_PER_SECOND)
            .and_then(|start| start.checked_sub(padding))
            .ok_or_else(overflow)?;
        let stop_ns = NANOS_PER_SECOND
            .checked_mul(covered as i64)
            .and_then(|length| epoch.checked_add(length))
            .and_then(|stop| stop.checked_add(padding))
            .ok_or_else(overflow)?;
        Ok(WaveformSpan { start_ns, stop_ns })
    }
}
