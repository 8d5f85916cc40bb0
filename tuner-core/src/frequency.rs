//! # Frequency Normalization Module
//!
//! Converts periods to hertz and folds any frequency into the reference
//! octave covered by the note table.

/// Lower bound of the reference band (E, 82.41 Hz).
pub const BAND_LOWER_HZ: f64 = 82.41;

/// Upper bound of the reference band (E, 164.81 Hz), exclusive.
pub const BAND_UPPER_HZ: f64 = 164.81;

/// Converts a period in samples to a frequency in Hz.
///
/// # Returns
/// * `Some(frequency)` - For a positive period
/// * `None` - If `period_samples` is zero
pub fn period_to_frequency(sample_rate: u32, period_samples: usize) -> Option<f64> {
    if period_samples == 0 {
        return None;
    }
    Some(f64::from(sample_rate) / period_samples as f64)
}

/// Folds `hz` into the reference band by whole octaves.
///
/// Doubles while below [`BAND_LOWER_HZ`], then halves while at or above
/// [`BAND_UPPER_HZ`]. The band bounds are the table's E notes, which sit
/// 0.01 Hz short of an exact octave, so inputs falling in that gap come out
/// just under the lower bound. Every result lies within one octave below
/// the upper bound.
///
/// # Returns
/// * `Some(normalized)` - For finite positive input
/// * `None` - For zero, negative or non-finite input, which cannot be folded
pub fn normalize_frequency(hz: f64) -> Option<f64> {
    if !hz.is_finite() || hz <= 0.0 {
        return None;
    }

    let mut hz = hz;
    while hz < BAND_LOWER_HZ {
        hz *= 2.0;
    }
    while hz >= BAND_UPPER_HZ {
        hz *= 0.5;
    }
    Some(hz)
}
