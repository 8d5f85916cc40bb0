mod common;

use std::io::Cursor;

use common::{SAMPLE_RATE, gen_silence_bytes, gen_sine_bytes};
use tuner_core::audio::ReaderSource;
use tuner_core::tuner::{CycleOutcome, RunSummary, TunerLoop};
use tuner_core::{DetectionResult, TunerConfig};

fn config(window_size: usize) -> TunerConfig {
    TunerConfig {
        window_size,
        cycle_delay_ms: 0,
        ..TunerConfig::default()
    }
}

fn tuner_over(bytes: Vec<u8>, window_size: usize) -> TunerLoop<ReaderSource<Cursor<Vec<u8>>>> {
    TunerLoop::new(ReaderSource::new(Cursor::new(bytes)), config(window_size)).unwrap()
}

fn expect_published(outcome: CycleOutcome) -> DetectionResult {
    match outcome {
        CycleOutcome::Published(result) => result,
        other => panic!("expected a published result, got {:?}", other),
    }
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= expected * tolerance,
        "{} not within {}% of {}",
        actual,
        tolerance * 100.0,
        expected
    );
}

#[test]
fn a_110_tone_matches_a() {
    let mut tuner = tuner_over(gen_sine_bytes(110.0, SAMPLE_RATE, 1200, 8000.0), 1200);
    let result = expect_published(tuner.step());

    assert_eq!(result.note_label, "A");
    assert_eq!(result.previous_label, "A#");
    assert_eq!(result.next_label, "G#");
    assert_eq!(result.interpolation, 0);
    assert_close(result.frequency_hz.unwrap(), 110.0, 0.01);
}

#[test]
fn silence_on_first_cycle_yields_placeholder() {
    let mut tuner = tuner_over(gen_silence_bytes(1200), 1200);
    assert_eq!(tuner.step(), CycleOutcome::Retained(DetectionResult::placeholder()));
    assert_eq!(tuner.step(), CycleOutcome::Closed);
}

#[test]
fn silence_after_a_tone_repeats_the_tone() {
    let mut bytes = gen_sine_bytes(110.0, SAMPLE_RATE, 1200, 8000.0);
    bytes.extend(gen_silence_bytes(1200));
    bytes.extend(gen_silence_bytes(1200));
    let mut tuner = tuner_over(bytes, 1200);

    let tone = expect_published(tuner.step());
    assert_eq!(tuner.step(), CycleOutcome::Retained(tone));
    assert_eq!(tuner.step(), CycleOutcome::Retained(tone));
}

#[test]
fn a_55_tone_folds_up_to_a() {
    // Two periods of 55 Hz need a longer window than the default.
    let mut low = tuner_over(gen_sine_bytes(55.0, SAMPLE_RATE, 2400, 8000.0), 2400);
    let mut reference = tuner_over(gen_sine_bytes(110.0, SAMPLE_RATE, 2400, 8000.0), 2400);

    let low = expect_published(low.step());
    let reference = expect_published(reference.step());

    assert_eq!(low.note_label, "A");
    assert_eq!(low.note_label, reference.note_label);
    assert_eq!(low.previous_label, reference.previous_label);
    assert_eq!(low.next_label, reference.next_label);
    assert_eq!(low.interpolation, reference.interpolation);
    assert_close(low.frequency_hz.unwrap(), 55.0, 0.01);
}

#[test]
fn higher_octaves_fold_down() {
    let mut tuner = tuner_over(gen_sine_bytes(440.0, SAMPLE_RATE, 1200, 8000.0), 1200);
    let result = expect_published(tuner.step());

    assert_eq!(result.note_label, "A");
    assert!(result.interpolation >= 0 && result.interpolation < 16);
    assert_close(result.frequency_hz.unwrap(), 440.0, 0.01);
}

#[test]
fn sharp_tone_leans_toward_previous_label() {
    let mut tuner = tuner_over(gen_sine_bytes(113.0, SAMPLE_RATE, 1200, 8000.0), 1200);
    let result = expect_published(tuner.step());

    assert_eq!(result.note_label, "A");
    assert!(result.interpolation > 32, "got {}", result.interpolation);
    assert!(result.interpolation <= 128);
}

#[test]
fn flat_tone_leans_toward_next_label() {
    let mut tuner = tuner_over(gen_sine_bytes(107.0, SAMPLE_RATE, 1200, 8000.0), 1200);
    let result = expect_published(tuner.step());

    assert_eq!(result.note_label, "A");
    assert!(result.interpolation < -32, "got {}", result.interpolation);
    assert!(result.interpolation >= -128);
}

#[test]
fn run_streams_until_end_of_input() {
    let mut bytes = gen_silence_bytes(1200);
    bytes.extend(gen_sine_bytes(98.0, SAMPLE_RATE, 1200, 8000.0));
    bytes.extend(gen_silence_bytes(1200));
    bytes.extend(gen_sine_bytes(146.83, SAMPLE_RATE, 1200, 8000.0));
    let mut tuner = tuner_over(bytes, 1200);

    let mut published = Vec::new();
    let summary = tuner.run(&mut published).unwrap();

    assert_eq!(
        summary,
        RunSummary {
            published: 2,
            retained: 2,
            skipped: 0
        }
    );
    let labels: Vec<&str> = published.iter().map(|r| r.note_label).collect();
    assert_eq!(labels, ["--", "G", "G", "D"]);
    assert_eq!(tuner.state().last_result().note_label, "D");
}

#[test]
fn results_cross_threads_through_a_channel() {
    let (mut sender, receiver) = crossbeam_channel::unbounded::<DetectionResult>();
    let handle = std::thread::spawn(move || {
        let mut tuner = tuner_over(gen_sine_bytes(110.0, SAMPLE_RATE, 1200, 8000.0), 1200);
        tuner.run(&mut sender)
    });

    let summary = handle.join().unwrap().unwrap();
    assert_eq!(summary.published, 1);
    let received: Vec<DetectionResult> = receiver.try_iter().collect();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].note_label, "A");
}
