//! # Period Estimation Module
//!
//! Estimates the period of a monophonic signal with a sum-of-absolute-differences
//! function and a single forward scan.
//!
//! ## Features
//! - Difference function over lags `[0, n/2)`
//! - Peak-then-trough detection: the first trough that falls below a fraction
//!   of the largest difference seen so far wins
//! - Silence, constant input and noise produce no estimate instead of a bogus period

/// Default fraction of the running peak a trough must fall below.
pub const DEFAULT_TROUGH_RATIO: f64 = 0.1;

/// Sum of absolute differences between the first half of the window and
/// the same span shifted by `lag` samples.
///
/// # Panics
/// * If `lag` is not below `signal.len() / 2`
pub fn difference(signal: &[i32], lag: usize) -> f64 {
    let half = signal.len() / 2;
    assert!(lag < half, "lag {} outside [0, {})", lag, half);
    signal[..half]
        .iter()
        .zip(&signal[lag..lag + half])
        .map(|(&a, &b)| u64::from((a - b).unsigned_abs()))
        .sum::<u64>() as f64
}

/// Estimates the period of `signal` in samples.
///
/// The scan walks lags upward, tracking the discrete derivative of the
/// difference function. A lag qualifies when the function has just turned
/// from falling to rising and the value is below `trough_ratio` times the
/// largest difference seen before it. The trough itself sits one lag back,
/// so the first qualifying lag minus one is returned and the scan stops.
///
/// Periods are accurate to about one sample for low and mid frequencies
/// (up to a few hundred Hz at 44.1 kHz). Above roughly 1 kHz a 1200-sample
/// window can report a multiple of the period or nothing at all.
///
/// # Arguments
/// * `signal` - Decoded sample window
/// * `trough_ratio` - Fraction of the running peak a trough must fall below
///
/// # Returns
/// * `Some(period)` - Period in samples, always positive
/// * `None` - No qualifying trough (silence, noise, or a period longer than half the window)
pub fn estimate_period(signal: &[i32], trough_ratio: f64) -> Option<usize> {
    let half = signal.len() / 2;

    let mut prev_diff = 0.0;
    let mut prev_dx = 0.0;
    let mut max_diff: f64 = 0.0;

    for lag in 0..half {
        let diff = difference(signal, lag);
        let dx = prev_diff - diff;

        // Falling then rising: lag - 1 was a local minimum.
        if dx < 0.0 && prev_dx > 0.0 && diff < trough_ratio * max_diff {
            return Some(lag - 1);
        }

        prev_dx = dx;
        prev_diff = diff;
        max_diff = max_diff.max(diff);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: f64, len: usize, amplitude: f64) -> Vec<i32> {
        (0..len)
            .map(|i| (amplitude * (2.0 * PI * freq * i as f64 / sample_rate).sin()).round() as i32)
            .collect()
    }

    #[test]
    fn difference_is_zero_at_lag_zero() {
        let signal = sine(110.0, 44_100.0, 1200, 8000.0);
        assert_eq!(difference(&signal, 0), 0.0);
        assert!(difference(&signal, 200) > 0.0);
    }

    #[test]
    fn silence_has_no_period() {
        assert_eq!(estimate_period(&[0; 1200], DEFAULT_TROUGH_RATIO), None);
    }

    #[test]
    fn constant_signal_has_no_period() {
        assert_eq!(estimate_period(&[1234; 1200], DEFAULT_TROUGH_RATIO), None);
    }

    #[test]
    fn alternating_lsb_noise_has_no_period() {
        let signal: Vec<i32> = (0..1200).map(|i| if i % 2 == 0 { 1 } else { -1 }).collect();
        assert_eq!(estimate_period(&signal, DEFAULT_TROUGH_RATIO), None);
    }

    #[test]
    fn empty_and_tiny_windows_have_no_period() {
        assert_eq!(estimate_period(&[], DEFAULT_TROUGH_RATIO), None);
        assert_eq!(estimate_period(&[5, -5, 5], DEFAULT_TROUGH_RATIO), None);
    }

    #[test]
    fn sine_periods_match_sample_rate_over_frequency() {
        let sample_rate = 44_100.0;
        for freq in [82.41, 110.0, 146.83, 220.0, 440.0] {
            let signal = sine(freq, sample_rate, 1200, 8000.0);
            let period = estimate_period(&signal, DEFAULT_TROUGH_RATIO)
                .unwrap_or_else(|| panic!("no period for {} Hz", freq));
            let expected = (sample_rate / freq).round() as i64;
            assert!(
                (period as i64 - expected).abs() <= 1,
                "{} Hz: period {} expected {}",
                freq,
                period,
                expected
            );
        }
    }

    #[test]
    fn period_longer_than_half_window_is_not_found() {
        // 55 Hz needs ~802 lags, a 1200-sample window only scans 600.
        let signal = sine(55.0, 44_100.0, 1200, 8000.0);
        assert_eq!(estimate_period(&signal, DEFAULT_TROUGH_RATIO), None);
    }
}
