use crate::io::format::c_exponential;
use cwcore::model::TimeSeries;
use cwcore::prelude::{SimulationError, SimulationResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn write_output(path: &Path, series: &TimeSeries) -> SimulationResult<()> {
    let file = File::create(path).map_err(|err| SimulationError::file(path, err))?;
    let mut writer = BufWriter::new(file);
    render_output(&mut writer, series)
        .and_then(|_| writer.flush())
        .map_err(|err| SimulationError::file(path, err))
}

/// Writes the `# epoch` / `# deltaT` header and one sample per line.
pub fn render_output<W: Write>(writer: &mut W, series: &TimeSeries) -> io::Result<()> {
    writeln!(writer, "# epoch = {}", series.epoch_ns)?;
    writeln!(writer, "# deltaT = {}", c_exponential(series.delta_t, 23, 16))?;
    for &sample in series.samples() {
        writeln!(writer, "{}", c_exponential(f64::from(sample), 16, 9))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_samples() {
        let series = TimeSeries::with_samples("out", 1_000_000_000, 0.5, vec![1.5, -2.0]);
        let mut buffer = Vec::new();
        render_output(&mut buffer, &series).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "# epoch = 1000000000\n# deltaT =  5.0000000000000000e-01\n 1.500000000e+00\n-2.000000000e+00\n"
        );
    }

    #[test]
    fn unwritable_path_is_file_error() {
        let series = TimeSeries::with_samples("out", 0, 1.0, vec![0.0]);
        let err = write_output(Path::new("/nonexistent/dir/out.txt"), &series).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
