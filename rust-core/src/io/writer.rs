//! Output files: AWG waveform, spectrum and cleaned trace

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, WorkbenchError};
use crate::signal::SampleBuffer;
use crate::spectrum::Spectrum;
use crate::synth::SynthesizedWaveform;

/// `%.18e` the way numpy writes it: at least two exponent digits, explicit sign
pub fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{:.18e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

/// Shortest round-trip form, switching to `1e-05` style notation outside
/// `1e-4 <= |x| < 1e16` like Python's `str(float)`
pub fn format_shortest(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let fixed = value.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            fixed + ".0"
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

fn write_lines<F>(path: &Path, rows: usize, mut row: F) -> Result<()>
where
    F: FnMut(&mut BufWriter<File>, usize) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(|e| WorkbenchError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for i in 0..rows {
        row(&mut writer, i).map_err(|e| WorkbenchError::io(path, e))?;
    }
    writer.flush().map_err(|e| WorkbenchError::io(path, e))?;

    log::debug!("Wrote {} rows to {}", rows, path.display());
    Ok(())
}

/// AWG import file: `amplitude\tmarker\tmarker` per sample
pub fn write_waveform(path: impl AsRef<Path>, waveform: &SynthesizedWaveform) -> Result<()> {
    let amplitude = waveform.waveform.samples();
    let marker = waveform.marker.samples();
    if amplitude.len() != marker.len() {
        return Err(WorkbenchError::length_mismatch(
            "waveform and marker channels differ in length",
            amplitude.len(),
            marker.len(),
        ));
    }

    write_lines(path.as_ref(), amplitude.len(), |w, i| {
        writeln!(w, "{:.15}\t{}\t{}", amplitude[i], marker[i], marker[i])
    })
}

/// `frequency, magnitude` rows in scientific notation
pub fn write_spectrum(path: impl AsRef<Path>, spectrum: &Spectrum) -> Result<()> {
    if spectrum.frequencies.len() != spectrum.magnitudes.len() {
        return Err(WorkbenchError::length_mismatch(
            "spectrum frequency and magnitude columns differ in length",
            spectrum.frequencies.len(),
            spectrum.magnitudes.len(),
        ));
    }

    write_lines(path.as_ref(), spectrum.len(), |w, i| {
        writeln!(
            w,
            "{}, {}",
            format_scientific(spectrum.frequencies[i]),
            format_scientific(spectrum.magnitudes[i])
        )
    })
}

/// One value per line in [`format_shortest`] form
pub fn write_trace(path: impl AsRef<Path>, trace: &SampleBuffer) -> Result<()> {
    let samples = trace.samples();
    write_lines(path.as_ref(), samples.len(), |w, i| {
        writeln!(w, "{}", format_shortest(samples[i]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_scientific_matches_numpy() {
        assert_eq!(format_scientific(2.4e10), "2.400000000000000000e+10");
        assert_eq!(format_scientific(-1.5e-3), "-1.500000000000000000e-03");
        assert_eq!(format_scientific(0.0), "0.000000000000000000e+00");
        assert_eq!(format_scientific(1e-300), "1.000000000000000000e-300");
        assert_eq!(format_scientific(f64::NAN), "nan");
    }

    #[test]
    fn test_write_waveform_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveform.txt");
        let waveform = SynthesizedWaveform {
            waveform: SampleBuffer::new(vec![0.5, -0.25], 10e9).unwrap(),
            marker: SampleBuffer::new(vec![1.0, 0.0], 10e9).unwrap(),
        };

        write_waveform(&path, &waveform).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "0.500000000000000\t1\t1\n-0.250000000000000\t0\t0\n"
        );
    }

    #[test]
    fn test_write_spectrum_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectrum.txt");
        let spectrum = Spectrum {
            frequencies: vec![1.8e10],
            magnitudes: vec![0.125],
        };

        write_spectrum(&path, &spectrum).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "1.800000000000000000e+10, 1.250000000000000000e-01\n"
        );
    }

    #[test]
    fn test_format_shortest_matches_python_str() {
        assert_eq!(format_shortest(1e-5), "1e-05");
        assert_eq!(format_shortest(-2.5e-7), "-2.5e-07");
        assert_eq!(format_shortest(1e16), "1e+16");
        assert_eq!(format_shortest(1.2345678901234568e17), "1.2345678901234568e+17");
        assert_eq!(format_shortest(1e-300), "1e-300");
        assert_eq!(format_shortest(0.0001), "0.0001");
        assert_eq!(format_shortest(1e15), "1000000000000000.0");
        assert_eq!(format_shortest(3.0), "3.0");
        assert_eq!(format_shortest(0.0), "0.0");
        assert_eq!(format_shortest(-0.0), "-0.0");
        assert_eq!(format_shortest(0.1), "0.1");
        assert_eq!(format_shortest(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_shortest(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_write_trace_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.txt");
        let trace = SampleBuffer::new(vec![0.00001, -0.5, 2.0], 40e9).unwrap();

        write_trace(&path, &trace).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "1e-05\n-0.5\n2.0\n");
    }

    #[test]
    fn test_write_trace_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let trace = SampleBuffer::new(vec![1.0], 40e9).unwrap();
        let err = write_trace(dir.path().join("no/such/dir.txt"), &trace).unwrap_err();
        assert!(matches!(err, WorkbenchError::IoFailure { .. }));
    }
}
