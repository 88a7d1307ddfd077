use crate::prelude::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interferometer sites known to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorSite {
    Lho,
    Llo,
    Virgo,
    Geo600,
    Tama300,
    Cit40,
}

/// Vertex location and arm orientation of a site.
///
/// Angles are in degrees; arm azimuths are measured from North towards East.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteGeometry {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: f64,
    pub x_arm_azimuth_deg: f64,
    pub y_arm_azimuth_deg: f64,
}

impl DetectorSite {
    pub const ALL: [DetectorSite; 6] = [
        Self::Lho,
        Self::Llo,
        Self::Virgo,
        Self::Geo600,
        Self::Tama300,
        Self::Cit40,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lho => "LHO",
            Self::Llo => "LLO",
            Self::Virgo => "VIRGO",
            Self::Geo600 => "GEO600",
            Self::Tama300 => "TAMA300",
            Self::Cit40 => "CIT40",
        }
    }

    pub fn geometry(&self) -> SiteGeometry {
        let (latitude_deg, longitude_deg, elevation_m, x_arm_azimuth_deg, y_arm_azimuth_deg) = match self {
            Self::Lho => (46.4551, -119.4077, 142.554, 324.0, 234.0),
            Self::Llo => (30.5629, -90.7742, -6.574, 252.3, 162.3),
            Self::Virgo => (43.6315, 10.5045, 51.884, 19.4, 289.4),
            Self::Geo600 => (52.2469, 9.8081, 114.425, 68.8, 334.9),
            Self::Tama300 => (35.6763, 139.5361, 90.0, 270.0, 180.0),
            Self::Cit40 => (34.1367, -118.1273, 0.0, 180.0, 90.0),
        };
        SiteGeometry {
            latitude_deg,
            longitude_deg,
            elevation_m,
            x_arm_azimuth_deg,
            y_arm_azimuth_deg,
        }
    }
}

impl fmt::Display for DetectorSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DetectorSite {
    type Err = SimulationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|site| site.name() == name)
            .ok_or_else(|| SimulationError::Range(format!("unrecognized site: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_site_round_trips_through_its_name() {
        for site in DetectorSite::ALL {
            assert_eq!(site.name().parse::<DetectorSite>().unwrap(), site);
        }
    }

    #[test]
    fn unknown_site_is_a_range_error() {
        let err = "KAGRA".parse::<DetectorSite>().unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!("lho".parse::<DetectorSite>().is_err());
    }

    #[test]
    fn geometry_is_on_the_globe() {
        for site in DetectorSite::ALL {
            let geometry = site.geometry();
            assert!(geometry.latitude_deg.abs() <= 90.0);
            assert!(geometry.longitude_deg.abs() <= 180.0);
        }
    }
}
