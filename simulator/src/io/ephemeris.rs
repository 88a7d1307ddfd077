use cwcore::detector::{Ephemerides, EphemerisEntry, EphemerisTable};
use cwcore::prelude::{SimulationError, SimulationResult};
use std::fs;
use std::path::Path;

pub fn read_ephemerides(earth: &Path, sun: &Path) -> SimulationResult<Ephemerides> {
    Ok(Ephemerides {
        earth: read_ephemeris(earth)?,
        sun: read_ephemeris(sun)?,
    })
}

pub fn read_ephemeris(path: &Path) -> SimulationResult<EphemerisTable> {
    let text = fs::read_to_string(path).map_err(|err| SimulationError::file(path, err))?;
    parse_ephemeris(&text, &path.display().to_string())
}

/// Parses `gpsYear spacing count` followed by `count` entries of ten numbers.
/// Line breaks inside the body carry no meaning.
pub fn parse_ephemeris(text: &str, origin: &str) -> SimulationResult<EphemerisTable> {
    let mut tokens = text.split_whitespace();
    let mut header = |name: &str| {
        tokens
            .next()
            .ok_or_else(|| SimulationError::input_format(origin, format!("missing {name} in header")))
            .map(str::to_owned)
    };
    let gps_year = header("GPS year")?;
    let spacing = header("table spacing")?;
    let count = header("entry count")?;

    let bad = |name: &str, text: &str| SimulationError::input_format(origin, format!("bad {name} {text:?}"));
    let gps_year: i32 = gps_year.parse().map_err(|_| bad("GPS year", &gps_year))?;
    let spacing_s: f64 = spacing.parse().map_err(|_| bad("table spacing", &spacing))?;
    let count: usize = count.parse().map_err(|_| bad("entry count", &count))?;

    let values = tokens
        .map(|token| token.parse::<f64>().map_err(|_| bad("value", token)))
        .collect::<SimulationResult<Vec<f64>>>()?;
    if values.len() < count * EphemerisEntry::FIELDS {
        return Err(SimulationError::input_format(
            origin,
            format!(
                "expected {count} entries of {} values, found {} values",
                EphemerisEntry::FIELDS,
                values.len()
            ),
        ));
    }
    let entries = values
        .chunks_exact(EphemerisEntry::FIELDS)
        .take(count)
        .filter_map(EphemerisEntry::from_fields)
        .collect();

    Ok(EphemerisTable {
        gps_year,
        spacing_s,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_across_lines() {
        let text = "2000 14400.0 2\n0 1 2 3\n4 5 6 7 8 9\n14400 1 2 3 4 5 6 7 8 9\n";
        let table = parse_ephemeris(text, "earth").unwrap();
        assert_eq!(table.gps_year, 2000);
        assert_eq!(table.spacing_s, 14400.0);
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].velocity, [4.0, 5.0, 6.0]);
        assert_eq!(table.span(), Some((0.0, 14400.0)));
    }

    #[test]
    fn short_body_is_input_error() {
        let err = parse_ephemeris("2000 14400.0 2\n0 1 2 3 4 5 6 7 8 9\n", "sun").unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn bad_header_is_input_error() {
        assert_eq!(parse_ephemeris("", "sun").unwrap_err().exit_code(), 5);
        assert_eq!(parse_ephemeris("year 1 1", "sun").unwrap_err().exit_code(), 5);
    }

    #[test]
    fn missing_file_is_file_error() {
        let err = read_ephemerides(Path::new("/nonexistent/earth.dat"), Path::new("/nonexistent/sun.dat")).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
