use serde::{Deserialize, Serialize};

/// One tabulated body state: GPS time (s), then position (light-seconds),
/// velocity (c) and acceleration (c/s) in barycentric coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisEntry {
    pub gps_seconds: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub acceleration: [f64; 3],
}

impl EphemerisEntry {
    pub const FIELDS: usize = 10;

    pub fn from_fields(fields: &[f64]) -> Option<Self> {
        if fields.len() != Self::FIELDS {
            return None;
        }
        Some(Self {
            gps_seconds: fields[0],
            position: [fields[1], fields[2], fields[3]],
            velocity: [fields[4], fields[5], fields[6]],
            acceleration: [fields[7], fields[8], fields[9]],
        })
    }
}

/// Ephemeris of a single body, sampled every `spacing_s` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisTable {
    pub gps_year: i32,
    pub spacing_s: f64,
    pub entries: Vec<EphemerisEntry>,
}

impl EphemerisTable {
    /// GPS span covered by the table, if it has any entries.
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((self.entries.first()?.gps_seconds, self.entries.last()?.gps_seconds))
    }
}

/// Earth and Sun ephemerides used by a located detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ephemerides {
    pub earth: EphemerisTable,
    pub sun: EphemerisTable,
}
