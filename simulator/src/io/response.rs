use cwcore::model::{Complex64, FrequencySeries, ResponseTable};
use cwcore::prelude::{SimulationError, SimulationResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

pub fn read_response(path: &Path) -> SimulationResult<ResponseTable> {
    let file = File::open(path).map_err(|err| SimulationError::file(path, err))?;
    parse_response(BufReader::new(file), &path.display().to_string())
}

/// Parses a response file: a `# epoch`, `# f0`, `# deltaF` header followed by
/// rows of real and imaginary response components.
pub fn parse_response<R: BufRead>(reader: R, origin: &str) -> SimulationResult<ResponseTable> {
    let mut lines = reader.lines();
    let epoch_ns: i64 = header_value(lines.next(), "epoch", origin)?;
    let f0: f64 = header_value(lines.next(), "f0", origin)?;
    let delta_f: f64 = header_value(lines.next(), "deltaF", origin)?;

    let mut data = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line.map_err(|err| SimulationError::input_format(origin, err.to_string()))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let line_number = index + 4;
        if fields.len() != 2 {
            return Err(SimulationError::input_format(
                origin,
                format!("line {line_number}: expected 2 columns, found {}", fields.len()),
            ));
        }
        let parse = |text: &str| {
            text.parse::<f64>().map_err(|_| {
                SimulationError::input_format(origin, format!("line {line_number}: bad number {text:?}"))
            })
        };
        data.push(Complex64::new(parse(fields[0])?, parse(fields[1])?));
    }

    if data.is_empty() {
        return Err(SimulationError::input_format(origin, "no response samples after header"));
    }
    FrequencySeries::new(epoch_ns, f0, delta_f, data)
}

fn header_value<T: FromStr>(line: Option<std::io::Result<String>>, key: &str, origin: &str) -> SimulationResult<T> {
    let missing = || SimulationError::input_format(origin, format!("missing or malformed '# {key} = ' header"));
    let line = line.ok_or_else(missing)?.map_err(|err| SimulationError::input_format(origin, err.to_string()))?;
    let (name, value) = line
        .trim()
        .strip_prefix('#')
        .and_then(|rest| rest.split_once('='))
        .ok_or_else(missing)?;
    if name.trim() != key {
        return Err(missing());
    }
    value.trim().parse().map_err(|_| missing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> SimulationResult<ResponseTable> {
        parse_response(Cursor::new(text), "resp")
    }

    #[test]
    fn parses_header_and_complex_rows() {
        let table = parse("# epoch = 700000000\n# f0 = 40.0\n# deltaF = 0.5\n1.0 0.0\n\n2.0 -1.5\n").unwrap();
        assert_eq!(table.epoch_ns, 700_000_000);
        assert_eq!(table.f0, 40.0);
        assert_eq!(table.delta_f, 0.5);
        assert_eq!(table.data, vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, -1.5)]);
    }

    #[test]
    fn parsed_table_serializes_with_complex_samples() {
        let table = parse("# epoch = 0\n# f0 = 10.0\n# deltaF = 2.0\n1.5 -0.25\n4.0 0.5\n").unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let restored: ResponseTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);

        let transfer = cwcore::processing::response_to_transfer(restored).unwrap();
        let json = serde_json::to_string(&transfer).unwrap();
        assert!(json.contains("\"numerator\":\"AdcCount\""));
    }

    #[test]
    fn malformed_header_is_input_error() {
        let err = parse("# epoch = 0\n# fzero = 40.0\n# deltaF = 0.5\n1 0\n").unwrap_err();
        assert_eq!(err.exit_code(), 5);
        let err = parse("# epoch = 0\n").unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn wrong_column_count_is_input_error() {
        let err = parse("# epoch = 0\n# f0 = 0\n# deltaF = 1\n1 0 3\n").unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn empty_body_is_input_error() {
        let err = parse("# epoch = 0\n# f0 = 0\n# deltaF = 1\n").unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn non_positive_step_is_range_error() {
        let err = parse("# epoch = 0\n# f0 = 0\n# deltaF = 0\n1 0\n").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_file_is_file_error() {
        let err = read_response(Path::new("/nonexistent/response.txt")).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
