use std::f64::consts::PI;

pub const SAMPLE_RATE: u32 = 44_100;

/// Samples of a sine tone as LE i16 PCM bytes.
pub fn gen_sine_bytes(freq_hz: f64, sr: u32, n: usize, amp: f64) -> Vec<u8> {
    (0..n)
        .map(|i| {
            let phase = 2.0 * PI * freq_hz * i as f64 / sr as f64;
            (amp * phase.sin()).round() as i16
        })
        .flat_map(|s| s.to_le_bytes())
        .collect()
}

pub fn gen_silence_bytes(n: usize) -> Vec<u8> {
    vec![0; n * 2]
}
