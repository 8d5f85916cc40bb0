//! # Tuner Loop Module
//!
//! Orchestrates acquisition, period estimation, normalization and note
//! matching. Each cycle ends in one of four [`CycleOutcome`]s:
//!
//! - `Skipped`: the source had no new data (awaiting data, nothing published)
//! - `Retained`: no usable period, the last good result is republished
//! - `Published`: a new result replaced the retained one
//! - `Closed`: the source is exhausted and the loop ends
//!
//! The retained result lives in an explicit [`TunerState`] owned by the
//! loop, so cycles can be driven and inspected without any global state.

use tracing::{debug, info};

use crate::DetectionResult;
use crate::audio::AudioSource;
use crate::buffer::SampleBuffer;
use crate::config::TunerConfig;
use crate::error::TunerError;
use crate::frequency::{normalize_frequency, period_to_frequency};
use crate::pitch::estimate_period;
use crate::tuning::match_note;

/// What a single cycle produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// A new result was detected and retained.
    Published(DetectionResult),
    /// No usable period; carries the unchanged retained result.
    Retained(DetectionResult),
    /// No new data this cycle.
    Skipped,
    /// The source is closed.
    Closed,
}

/// Receives every result the loop publishes.
pub trait PresentationSink {
    fn publish(&mut self, result: &DetectionResult) -> Result<(), TunerError>;
}

impl PresentationSink for crossbeam_channel::Sender<DetectionResult> {
    fn publish(&mut self, result: &DetectionResult) -> Result<(), TunerError> {
        self.send(*result).map_err(|_| TunerError::SinkClosed)
    }
}

impl PresentationSink for Vec<DetectionResult> {
    fn publish(&mut self, result: &DetectionResult) -> Result<(), TunerError> {
        self.push(*result);
        Ok(())
    }
}

/// The last-known-good detection carried across cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TunerState {
    last_good: DetectionResult,
}

impl TunerState {
    /// Starts from the neutral placeholder result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_result(&self) -> DetectionResult {
        self.last_good
    }

    /// Runs the analysis stages on one decoded window.
    ///
    /// The retained result is overwritten only when every stage succeeds.
    ///
    /// # Arguments
    /// * `samples` - Decoded sample window
    /// * `config` - Sample rate, trough ratio and interpolation range
    ///
    /// # Returns
    /// * `CycleOutcome::Published` - With the new result
    /// * `CycleOutcome::Retained` - With the previous result, unchanged
    pub fn analyze(&mut self, samples: &[i32], config: &TunerConfig) -> CycleOutcome {
        let detection = estimate_period(samples, config.trough_ratio).and_then(|period| {
            let raw = period_to_frequency(config.sample_rate, period)?;
            let normalized = normalize_frequency(raw)?;
            let matched = match_note(normalized, config.interpolation_range)?;
            debug!(
                "[TUNER] period {} -> {:.2} Hz (normalized {:.2} Hz) -> {} {:+}",
                period,
                raw,
                normalized,
                matched.note.label,
                matched.display_value()
            );
            Some(matched.to_result(raw))
        });

        match detection {
            Some(result) => {
                self.last_good = result;
                CycleOutcome::Published(result)
            }
            None => CycleOutcome::Retained(self.last_good),
        }
    }
}

/// Counters reported when [`TunerLoop::run`] finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub published: u64,
    pub retained: u64,
    pub skipped: u64,
}

/// Repeatedly pulls windows from a source and publishes detections.
pub struct TunerLoop<S> {
    source: S,
    buffer: SampleBuffer,
    state: TunerState,
    config: TunerConfig,
    empty_reads: u32,
}

impl<S: AudioSource> TunerLoop<S> {
    /// Creates a loop starting from the placeholder result.
    ///
    /// # Returns
    /// * `Err(TunerError::Configuration)` - If `config` fails validation
    pub fn new(source: S, config: TunerConfig) -> Result<Self, TunerError> {
        Self::with_state(source, config, TunerState::new())
    }

    /// Creates a loop that resumes from an existing retained result.
    pub fn with_state(
        source: S,
        config: TunerConfig,
        state: TunerState,
    ) -> Result<Self, TunerError> {
        config.validate()?;
        Ok(Self {
            source,
            buffer: SampleBuffer::new(config.window_size),
            state,
            config,
            empty_reads: 0,
        })
    }

    pub fn state(&self) -> &TunerState {
        &self.state
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    /// Consumes the loop, returning the retained state.
    pub fn into_state(self) -> TunerState {
        self.state
    }

    /// Runs one acquire-and-analyze cycle without publishing or sleeping.
    ///
    /// Blocks until the source delivers data or reports closure. A run of
    /// `max_consecutive_empty_reads` empty reads also closes the loop; a
    /// limit of zero disables that check.
    pub fn step(&mut self) -> CycleOutcome {
        let bytes_read = match self.source.read(self.buffer.bytes_mut()) {
            Some(n) => n,
            None => return CycleOutcome::Closed,
        };

        if bytes_read == 0 {
            self.empty_reads += 1;
            let limit = self.config.max_consecutive_empty_reads;
            if limit > 0 && self.empty_reads >= limit {
                info!(
                    "[TUNER] {} consecutive empty reads, treating stream as closed",
                    self.empty_reads
                );
                return CycleOutcome::Closed;
            }
            return CycleOutcome::Skipped;
        }
        self.empty_reads = 0;

        if self.buffer.decode(bytes_read) == 0 {
            return CycleOutcome::Skipped;
        }
        self.state.analyze(self.buffer.samples(), &self.config)
    }

    /// Cycles until the source closes, publishing every result to `sink`.
    ///
    /// # Returns
    /// * `Ok(summary)` - The source closed
    /// * `Err(TunerError::SinkClosed)` - The sink stopped accepting results
    pub fn run<K: PresentationSink>(&mut self, sink: &mut K) -> Result<RunSummary, TunerError> {
        info!(
            "[TUNER] Starting loop: {} Hz, {} samples per window",
            self.config.sample_rate, self.config.window_size
        );
        let delay = self.config.cycle_delay();
        let mut summary = RunSummary::default();

        loop {
            match self.step() {
                CycleOutcome::Published(result) => {
                    summary.published += 1;
                    sink.publish(&result)?;
                }
                CycleOutcome::Retained(result) => {
                    summary.retained += 1;
                    sink.publish(&result)?;
                }
                CycleOutcome::Skipped => summary.skipped += 1,
                CycleOutcome::Closed => break,
            }

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        info!("[TUNER] Stream closed: {:?}", summary);
        Ok(summary)
    }
}
