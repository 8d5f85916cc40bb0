// tuner-core/src/lib.rs

//! The core logic for the octave tuner.
//! This crate is responsible for audio acquisition, period estimation,
//! octave normalization and note matching. It is completely headless
//! and contains no GUI code.

pub mod audio;
pub mod buffer;
pub mod config;
pub mod error;
pub mod frequency;
pub mod pitch;
pub mod tuner;
pub mod tuning;

pub use config::TunerConfig;
pub use error::TunerError;

/// Label shown before any note has been detected.
pub const PLACEHOLDER_LABEL: &str = "--";

/// Represents the result of a single successful analysis cycle.
// Copy so the audio thread can hand snapshots to the GUI without sharing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionResult {
    /// The name of the nearest note.
    pub note_label: &'static str,
    /// The preceding (higher) entry of the note table.
    pub previous_label: &'static str,
    /// The following (lower) entry of the note table.
    pub next_label: &'static str,
    /// The detected frequency in Hz, before octave normalization.
    pub frequency_hz: Option<f64>,
    /// Offset toward a neighbor on the display scale, within `[-R, R]`.
    pub interpolation: i32,
}

impl DetectionResult {
    /// The neutral result published before the first detection.
    pub const fn placeholder() -> Self {
        Self {
            note_label: PLACEHOLDER_LABEL,
            previous_label: PLACEHOLDER_LABEL,
            next_label: PLACEHOLDER_LABEL,
            frequency_hz: None,
            interpolation: 0,
        }
    }

    /// Free-text frequency readout, e.g. `"110.25hz"`.
    pub fn frequency_label(&self) -> String {
        match self.frequency_hz {
            Some(hz) => format!("{:.2}hz", hz),
            None => PLACEHOLDER_LABEL.to_string(),
        }
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        Self::placeholder()
    }
}
