//! Candidate spur frequencies

use crate::error::{Result, WorkbenchError};

/// Ascending list of spur frequencies (Hz) to project out of a trace
#[derive(Debug, Clone, PartialEq)]
pub struct SpurList {
    frequencies: Vec<f64>,
}

impl SpurList {
    /// Explicit list; must be finite, positive and strictly ascending
    pub fn new(frequencies: Vec<f64>) -> Result<Self> {
        if let Some(bad) = frequencies.iter().find(|f| !(f.is_finite() && **f > 0.0)) {
            return Err(WorkbenchError::InvalidParameter(format!(
                "spur frequency {} Hz must be positive and finite",
                bad
            )));
        }
        if frequencies.windows(2).any(|w| w[0] >= w[1]) {
            return Err(WorkbenchError::InvalidParameter(
                "spur frequencies must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { frequencies })
    }

    /// Harmonics of `spacing` up to and including `max_frequency`
    ///
    /// `floor(max / spacing)` candidates at `k·spacing`, k = 1, 2, ...
    pub fn from_spacing(spacing: f64, max_frequency: f64) -> Result<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(WorkbenchError::InvalidParameter(format!(
                "spur spacing must be positive (got {} Hz)",
                spacing
            )));
        }
        if !(max_frequency.is_finite() && max_frequency >= 0.0) {
            return Err(WorkbenchError::InvalidParameter(format!(
                "maximum spur frequency must be non-negative (got {} Hz)",
                max_frequency
            )));
        }

        let count = (max_frequency / spacing).floor() as usize;
        let frequencies = (1..=count).map(|k| k as f64 * spacing).collect();
        Ok(Self { frequencies })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spacing_lab_defaults() {
        let list = SpurList::from_spacing(50e6, 10e9).unwrap();

        assert_eq!(list.len(), 200);
        assert_eq!(list.frequencies()[0], 50e6);
        assert_eq!(list.frequencies()[199], 10e9);
        assert!(list.frequencies().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_spacing_partial() {
        let list = SpurList::from_spacing(3.0, 10.0).unwrap();
        assert_eq!(list.frequencies(), &[3.0, 6.0, 9.0]);

        assert!(SpurList::from_spacing(5.0, 4.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_lists() {
        assert!(SpurList::from_spacing(0.0, 10e9).is_err());
        assert!(SpurList::from_spacing(50e6, f64::NAN).is_err());
        assert!(SpurList::new(vec![100e6, 50e6]).is_err());
        assert!(SpurList::new(vec![-1.0]).is_err());
        assert!(SpurList::new(vec![50e6, 100e6]).is_ok());
    }
}
