//! Instrument bands and run configuration
//!
//! The three spectrometer bands carry fixed local-oscillator tables. They are
//! plain data on an enum, not a trait hierarchy.

use crate::error::{Result, WorkbenchError};
use crate::signal::GateWindow;
use crate::spectrum::WindowType;

/// 1 MHz in Hz
pub const MHZ: f64 = 1.0e6;

/// 1 GHz in Hz
pub const GHZ: f64 = 1.0e9;

/// 1 µs in seconds
pub const MICROSECOND: f64 = 1.0e-6;

/// Spectrometer band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// 8.7 - 13.5 GHz
    Low,

    /// 13.5 - 18.3 GHz
    Medium,

    /// 18.0 - 26.5 GHz
    High,
}

/// How a DR target frequency is mixed down to the AWG output frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrMixing {
    /// Lowest accepted DR frequency (Hz)
    pub min_frequency: f64,

    /// Highest accepted DR frequency (Hz)
    pub max_frequency: f64,

    /// Phase-locked oscillator frequency (Hz)
    pub lo_frequency: f64,

    /// The band's multiplier chain doubles the AWG output, so the target is halved first
    pub halve_target: bool,
}

impl DrMixing {
    pub fn contains(&self, frequency: f64) -> bool {
        frequency >= self.min_frequency && frequency <= self.max_frequency
    }

    /// LO − target (or LO − target/2 for halving bands), no range check
    pub fn baseband(&self, target: f64) -> f64 {
        if self.halve_target {
            self.lo_frequency - target / 2.0
        } else {
            self.lo_frequency - target
        }
    }
}

/// Frequency-axis reference and pruning range for FT output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumBand {
    /// LO frequency the axis is referenced to (Hz)
    pub lo_frequency: f64,

    /// Lower pruning bound (Hz)
    pub lower_bound: f64,

    /// Upper pruning bound (Hz, exclusive)
    pub upper_bound: f64,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Medium, Band::High];

    /// Label used by the host's band selector
    pub fn label(&self) -> &'static str {
        match self {
            Band::Low => "Low (8.7-13.5 GHz)",
            Band::Medium => "Medium (13.5-18.3 GHz)",
            Band::High => "High (18.0-26.5 GHz)",
        }
    }

    /// Short name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Medium => "mid",
            Band::High => "high",
        }
    }

    /// Parse either the selector label or a short name ("low", "medium", "high")
    pub fn from_label(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        for band in Band::ALL {
            if trimmed == band.label() {
                return Ok(band);
            }
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "low" => Ok(Band::Low),
            "mid" | "medium" => Ok(Band::Medium),
            "high" => Ok(Band::High),
            _ => Err(WorkbenchError::InvalidParameter(format!(
                "unknown band {:?}",
                trimmed
            ))),
        }
    }

    /// DR mixing table
    pub fn dr_mixing(&self) -> DrMixing {
        match self {
            Band::Low => DrMixing {
                min_frequency: 8700.0 * MHZ,
                max_frequency: 13500.0 * MHZ,
                lo_frequency: 13600.0 * MHZ,
                halve_target: false,
            },
            Band::Medium => DrMixing {
                min_frequency: 13500.0 * MHZ,
                max_frequency: 18300.0 * MHZ,
                lo_frequency: 18400.0 * MHZ,
                halve_target: false,
            },
            Band::High => DrMixing {
                min_frequency: 18000.0 * MHZ,
                max_frequency: 26500.0 * MHZ,
                lo_frequency: 13600.0 * MHZ,
                halve_target: true,
            },
        }
    }

    /// Translate a DR target frequency into the AWG baseband frequency
    ///
    /// Fails with `BandMismatch` when the target is outside the band's DR range.
    pub fn dr_baseband_frequency(&self, target: f64) -> Result<f64> {
        let mixing = self.dr_mixing();
        if !mixing.contains(target) {
            return Err(WorkbenchError::BandMismatch {
                band: self.name(),
                frequency_mhz: target / MHZ,
                low_mhz: mixing.min_frequency / MHZ,
                high_mhz: mixing.max_frequency / MHZ,
            });
        }
        Ok(mixing.baseband(target))
    }

    /// Default DR target frequency (a well-known methanol line per band)
    pub fn default_dr_frequency(&self) -> f64 {
        match self {
            Band::Low => 12178.593 * MHZ,
            Band::Medium => 16395.740 * MHZ,
            Band::High => 25124.872 * MHZ,
        }
    }

    /// FT axis table
    pub fn spectrum_band(&self) -> SpectrumBand {
        match self {
            Band::Low => SpectrumBand {
                lo_frequency: 13600.0 * MHZ,
                lower_bound: 8000.0 * MHZ,
                upper_bound: 13500.0 * MHZ,
            },
            Band::Medium => SpectrumBand {
                lo_frequency: 18400.0 * MHZ,
                lower_bound: 13500.0 * MHZ,
                upper_bound: 18000.0 * MHZ,
            },
            Band::High => SpectrumBand {
                lo_frequency: 27200.0 * MHZ,
                lower_bound: 18000.0 * MHZ,
                upper_bound: 26500.0 * MHZ,
            },
        }
    }

    /// Default chirp start/stop frequencies (Hz, before mixing)
    pub fn default_chirp_range(&self) -> (f64, f64) {
        match self {
            Band::High => (350.0 * MHZ, 4600.0 * MHZ),
            Band::Low | Band::Medium => (100.0 * MHZ, 4900.0 * MHZ),
        }
    }
}

impl Default for Band {
    fn default() -> Self {
        Band::High
    }
}

/// Spectral processing configuration
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    /// Band selecting LO and pruning range
    pub band: Band,

    /// Digitizer sample rate in Hz
    pub sample_rate: f64,

    /// Time gate; `None` uses the full FID
    pub gate: Option<GateWindow>,

    /// Taper window applied before zero-filling
    pub window_type: WindowType,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            band: Band::High,
            sample_rate: 40.0 * GHZ,
            gate: Some(GateWindow::DEFAULT),
            window_type: WindowType::default(),
        }
    }
}

/// Spur extraction configuration
#[derive(Debug, Clone)]
pub struct SpurConfig {
    /// Digitizer sample rate in Hz
    pub sample_rate: f64,

    /// Time gate; `None` uses the full FID
    pub gate: Option<GateWindow>,

    /// Spacing between candidate spurs in Hz
    pub spur_spacing: f64,

    /// Highest candidate spur in Hz
    pub max_spur_frequency: f64,
}

impl Default for SpurConfig {
    fn default() -> Self {
        Self {
            sample_rate: 40.0 * GHZ,
            gate: Some(GateWindow::DEFAULT),
            spur_spacing: 50.0 * MHZ,
            max_spur_frequency: 10.0 * GHZ,
        }
    }
}
