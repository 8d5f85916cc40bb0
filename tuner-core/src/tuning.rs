//! # Musical Tuning Module
//!
//! This module maps a normalized frequency onto the fixed reference note table
//! and expresses how far the frequency sits toward a neighboring note.
//!
//! ## Features
//! - 15-entry note table, one octave of E to E plus a sentinel on each end
//! - Nearest-note lookup by absolute distance in Hz
//! - Linear interpolation toward the lower or higher neighbor on a `[-R, R]` scale
//!
//! The outermost entries (F 174.61 Hz and D# 77.78 Hz) only serve as
//! neighbors. Any frequency folded into the reference band is always
//! closer to an inner entry, so a match on a sentinel can only come from
//! un-normalized input and is reported as no match.

use crate::DetectionResult;

/// Represents a single musical note with its label and frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Note label without octave (e.g. "A", "C#")
    pub label: &'static str,
    /// Frequency in Hz
    pub frequency: f64,
}

const fn note(frequency: f64, label: &'static str) -> Note {
    Note { label, frequency }
}

/// The reference note table, strictly descending in frequency.
pub static NOTES: [Note; 15] = [
    note(174.61, "F"),
    note(164.81, "E"),
    note(155.56, "D#"),
    note(146.83, "D"),
    note(138.59, "C#"),
    note(130.81, "C"),
    note(123.47, "B"),
    note(116.54, "A#"),
    note(110.00, "A"),
    note(103.83, "G#"),
    note(98.00, "G"),
    note(92.50, "F#"),
    note(87.31, "F"),
    note(82.41, "E"),
    note(77.78, "D#"),
];

/// A note table match with its neighbors and interpolation value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteMatch {
    /// Index of the matched entry in [`NOTES`]
    pub index: usize,
    /// The closest note
    pub note: Note,
    /// Preceding table entry (higher pitch)
    pub previous: Note,
    /// Following table entry (lower pitch)
    pub next: Note,
    /// Offset toward a neighbor in `[-R, R]`, negative toward the lower pitch
    pub interpolation: f64,
}

impl NoteMatch {
    /// Interpolation truncated toward zero for integer display scales.
    pub fn display_value(&self) -> i32 {
        self.interpolation as i32
    }

    /// Builds the published result for this match.
    ///
    /// # Arguments
    /// * `raw_frequency` - Detected frequency before octave normalization
    pub fn to_result(&self, raw_frequency: f64) -> DetectionResult {
        DetectionResult {
            note_label: self.note.label,
            previous_label: self.previous.label,
            next_label: self.next.label,
            frequency_hz: Some(raw_frequency),
            interpolation: self.display_value(),
        }
    }
}

/// Finds the index of the table entry closest to `freq`.
///
/// Scans the table in order and keeps the first minimal distance, so a
/// tie resolves to the higher-frequency entry.
pub fn closest_note_index(freq: f64) -> usize {
    let mut min_dist = f64::MAX;
    let mut closest = 0;
    for (i, note) in NOTES.iter().enumerate() {
        let distance = (note.frequency - freq).abs();
        if distance < min_dist {
            min_dist = distance;
            closest = i;
        }
    }
    closest
}

/// Signed position of `freq` between its matched note and a neighbor.
///
/// Below the matched note the value moves toward `-range` as `freq`
/// approaches `lower`; otherwise it moves toward `+range` as `freq`
/// approaches `higher`.
///
/// # Arguments
/// * `freq` - Normalized frequency in Hz
/// * `matched` - Frequency of the matched note
/// * `lower` - Frequency of the lower neighbor
/// * `higher` - Frequency of the higher neighbor
/// * `range` - Half-range `R` of the display scale
pub fn interpolation(freq: f64, matched: f64, lower: f64, higher: f64, range: f64) -> f64 {
    if freq < matched {
        -range * (freq - matched) / (lower - matched)
    } else {
        range * (freq - matched) / (higher - matched)
    }
}

/// Matches a normalized frequency against the note table.
///
/// # Arguments
/// * `freq` - Frequency already folded into the reference band
/// * `range` - Half-range `R` of the interpolation scale
///
/// # Returns
/// * `Some(NoteMatch)` - Closest inner note with both neighbors
/// * `None` - The closest entry is a sentinel, which normalized input never produces
pub fn match_note(freq: f64, range: i32) -> Option<NoteMatch> {
    let index = closest_note_index(freq);
    if index == 0 || index + 1 >= NOTES.len() {
        return None;
    }

    let note = NOTES[index];
    let previous = NOTES[index - 1];
    let next = NOTES[index + 1];
    let interpolation = interpolation(
        freq,
        note.frequency,
        next.frequency,
        previous.frequency,
        f64::from(range),
    );

    Some(NoteMatch {
        index,
        note,
        previous,
        next,
        interpolation,
    })
}
