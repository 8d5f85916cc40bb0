//! Error types for the tuner.
//!
//! Only conditions that stop the tuner are errors. Empty reads and windows
//! without a usable period are ordinary cycle outcomes, see [`crate::tuner`].

use std::fmt;

/// Errors that can occur while setting up or running the tuner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TunerError {
    /// No usable input device could be opened.
    DeviceUnavailable(String),
    /// Invalid tuner configuration or unsupported stream format.
    Configuration(String),
    /// The audio stream failed after it was started.
    Stream(String),
    /// The presentation side stopped accepting results.
    SinkClosed,
}

impl fmt::Display for TunerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TunerError::DeviceUnavailable(msg) => write!(f, "device unavailable: {}", msg),
            TunerError::Configuration(msg) => write!(f, "invalid configuration: {}", msg),
            TunerError::Stream(msg) => write!(f, "stream error: {}", msg),
            TunerError::SinkClosed => write!(f, "presentation sink closed"),
        }
    }
}

impl std::error::Error for TunerError {}
