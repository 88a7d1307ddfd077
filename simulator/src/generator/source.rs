use cwcore::model::{PolynomialFrequencyModel, SkyPosition};
use cwcore::prelude::{SimulationError, SimulationResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Minimum number of real fields after the epoch on a source line.
pub const MIN_SOURCE_FIELDS: usize = 7;

/// One non-blank line of a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEntry {
    Model(PolynomialFrequencyModel),
    /// A line that cannot be parsed; reading stops here.
    Malformed { line: usize, reason: String },
}

/// Parses `<epoch_ns> <aPlus> <aCross> <psi> <ra> <dec> <phi0> <f0> [f1 ...]`,
/// angles in degrees.
pub fn parse_source_line(text: &str, line: usize) -> SourceEntry {
    let malformed = |reason: String| SourceEntry::Malformed { line, reason };
    let mut fields = text.split_whitespace();

    let Some(epoch_text) = fields.next() else {
        return malformed("empty line".into());
    };
    let Ok(epoch_ns) = epoch_text.parse::<i64>() else {
        return malformed(format!("bad epoch {epoch_text:?}"));
    };

    let mut values = Vec::new();
    for field in fields {
        match field.parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            Ok(_) => return malformed(format!("non-finite value {field:?}")),
            Err(_) => return malformed(format!("bad value {field:?}")),
        }
    }
    if values.len() < MIN_SOURCE_FIELDS {
        return malformed(format!(
            "expected at least {MIN_SOURCE_FIELDS} values after the epoch, found {}",
            values.len()
        ));
    }

    SourceEntry::Model(PolynomialFrequencyModel {
        epoch_ns,
        a_plus: values[0],
        a_cross: values[1],
        psi: values[2].to_radians(),
        position: SkyPosition::equatorial(values[3].to_radians(), values[4].to_radians()),
        phi0: values[5].to_radians(),
        f0: values[6],
        spindown: values[MIN_SOURCE_FIELDS..].to_vec(),
    })
}

/// Streams source entries from a line-oriented reader, skipping blank lines.
pub struct SourceReader<R> {
    lines: Lines<R>,
    line_number: usize,
    origin: String,
}

impl SourceReader<BufReader<File>> {
    pub fn open(path: &Path) -> SimulationResult<Self> {
        let file = File::open(path).map_err(|err| SimulationError::file(path, err))?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> SourceReader<R> {
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            origin: origin.into(),
        }
    }
}

impl<R: BufRead> Iterator for SourceReader<R> {
    type Item = SimulationResult<SourceEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;
            match line {
                Err(err) => {
                    return Some(Err(SimulationError::input_format(
                        self.origin.clone(),
                        format!("line {}: {err}", self.line_number),
                    )))
                }
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => return Some(Ok(parse_source_line(&text, self.line_number))),
            }
        }
    }
}

/// Sources for one run: every line of a source file, or the single default source.
pub enum SourceStream {
    File(SourceReader<BufReader<File>>),
    Default(Option<PolynomialFrequencyModel>),
}

impl SourceStream {
    pub fn open(path: Option<&Path>) -> SimulationResult<Self> {
        match path {
            Some(path) => Ok(Self::File(SourceReader::open(path)?)),
            None => Ok(Self::Default(Some(super::defaults::default_source()))),
        }
    }
}

impl Iterator for SourceStream {
    type Item = SimulationResult<SourceEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::File(reader) => reader.next(),
            Self::Default(model) => model.take().map(|model| Ok(SourceEntry::Model(model))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_full_line_with_spindown() {
        let entry = parse_source_line("1000000000 1e-21 2e-21 90 180 -45 0 120.5 1e-9 -2e-18", 1);
        let SourceEntry::Model(model) = entry else {
            panic!("expected a model");
        };
        assert_eq!(model.epoch_ns, 1_000_000_000);
        assert_eq!(model.a_plus, 1e-21);
        assert!((model.psi - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!((model.position.latitude + std::f64::consts::FRAC_PI_4).abs() < 1e-15);
        assert_eq!(model.f0, 120.5);
        assert_eq!(model.spindown, vec![1e-9, -2e-18]);
    }

    #[test]
    fn short_line_is_malformed() {
        let entry = parse_source_line("0 1 1 0 0 0 0", 2);
        assert!(matches!(entry, SourceEntry::Malformed { line: 2, .. }));
    }

    #[test]
    fn non_numeric_fields_are_malformed() {
        assert!(matches!(parse_source_line("x 1 1 0 0 0 0 100", 1), SourceEntry::Malformed { .. }));
        assert!(matches!(parse_source_line("0 1 1 0 0 0 0 abc", 1), SourceEntry::Malformed { .. }));
    }

    #[test]
    fn non_finite_fields_are_malformed() {
        for line in ["0 1 1 0 0 0 0 nan", "0 1 1 0 0 0 0 100 inf", "0 -inf 1 0 0 0 0 100", "0 1 1 NaN 0 0 0 100"] {
            let entry = parse_source_line(line, 4);
            assert!(matches!(entry, SourceEntry::Malformed { line: 4, .. }), "{line}");
        }
    }

    #[test]
    fn reader_skips_blank_lines_and_numbers_lines() {
        let text = "0 1 1 0 0 0 0 100\n\n0 1 1 0\n";
        let entries: Vec<SourceEntry> = SourceReader::new(Cursor::new(text), "src")
            .collect::<SimulationResult<_>>()
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0], SourceEntry::Model(_)));
        assert!(matches!(entries[1], SourceEntry::Malformed { line: 3, .. }));
    }

    #[test]
    fn default_stream_yields_one_source() {
        let mut stream = SourceStream::open(None).unwrap();
        assert!(matches!(stream.next(), Some(Ok(SourceEntry::Model(_)))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn missing_source_file_is_file_error() {
        let err = SourceStream::open(Some(Path::new("/nonexistent/sources.txt"))).err().unwrap();
        assert_eq!(err.exit_code(), 4);
    }
}
