use serde::{Deserialize, Serialize};
use std::fmt;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// GPS epoch split into whole seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpsTime {
    pub seconds: i64,
    pub nanoseconds: i64,
}

impl GpsTime {
    /// Splits an integer nanosecond epoch. Division truncates toward zero, so
    /// negative epochs carry a non-positive nanosecond field.
    pub fn from_nanos(nanos: i64) -> Self {
        let seconds = nanos / NANOS_PER_SECOND;
        Self {
            seconds,
            nanoseconds: nanos - NANOS_PER_SECOND * seconds,
        }
    }

    pub fn to_nanos(self) -> i64 {
        self.seconds * NANOS_PER_SECOND + self.nanoseconds
    }
}

impl fmt::Display for GpsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s+{}ns", self.seconds, self.nanoseconds)
    }
}

/// Signed difference `later - earlier` in seconds.
pub fn seconds_between(earlier_ns: i64, later_ns: i64) -> f64 {
    (later_ns - earlier_ns) as f64 / NANOS_PER_SECOND as f64
}
