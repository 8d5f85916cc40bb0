//! # Tuner Configuration
//!
//! Parameters shared by the acquisition layer and the analysis loop.
//! The defaults reproduce the reference tuner: 44.1 kHz mono input,
//! 1200-sample windows and a 10 ms pause between cycles.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::TunerError;

/// Tuner configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    /// Sample rate of the incoming PCM stream in Hz (default: 44100)
    pub sample_rate: u32,

    /// Number of 16-bit samples per analysis window (default: 1200)
    /// Only periods shorter than half the window can be detected.
    pub window_size: usize,

    /// Pause between cycles in milliseconds (default: 10)
    pub cycle_delay_ms: u64,

    /// Half-range `R` of the interpolation indicator (default: 128)
    pub interpolation_range: i32,

    /// A trough qualifies when it drops below this fraction of the
    /// largest difference seen so far (default: 0.1)
    pub trough_ratio: f64,

    /// Consecutive empty reads after which the stream counts as closed (default: 50)
    pub max_consecutive_empty_reads: u32,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            window_size: 1200,
            cycle_delay_ms: 10,
            interpolation_range: 128,
            trough_ratio: 0.1,
            max_consecutive_empty_reads: 50,
        }
    }
}

impl TunerConfig {
    /// Size in bytes of one raw window (two bytes per sample).
    pub fn window_bytes(&self) -> usize {
        self.window_size * 2
    }

    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }

    /// Checks the configuration before the loop starts.
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is usable
    /// * `Err(TunerError::Configuration)` - Describes the first invalid field
    pub fn validate(&self) -> Result<(), TunerError> {
        if self.sample_rate == 0 {
            return Err(TunerError::Configuration("sample_rate must be positive".into()));
        }
        if self.window_size < 4 {
            return Err(TunerError::Configuration(format!(
                "window_size must be at least 4, got {}",
                self.window_size
            )));
        }
        if self.interpolation_range <= 0 {
            return Err(TunerError::Configuration(format!(
                "interpolation_range must be positive, got {}",
                self.interpolation_range
            )));
        }
        if !(self.trough_ratio > 0.0 && self.trough_ratio <= 1.0) {
            return Err(TunerError::Configuration(format!(
                "trough_ratio must be in (0, 1], got {}",
                self.trough_ratio
            )));
        }
        Ok(())
    }
}
