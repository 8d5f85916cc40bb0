//! # Sample Buffer Module
//!
//! Holds the raw byte window filled by the audio source and the signed
//! 16-bit samples decoded from it. Both vectors are allocated once and
//! reused every cycle.

/// Reusable window of little-endian 16-bit mono samples.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    bytes: Vec<u8>,
    samples: Vec<i32>,
    decoded: usize,
}

impl SampleBuffer {
    /// Creates a buffer holding `window_size` samples (`2 * window_size` bytes).
    pub fn new(window_size: usize) -> Self {
        Self {
            bytes: vec![0; window_size * 2],
            samples: vec![0; window_size],
            decoded: 0,
        }
    }

    /// Raw byte storage for the audio source to fill.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Decodes the first `bytes_read` bytes into samples.
    ///
    /// A trailing odd byte is ignored. Returns the number of samples now
    /// available through [`SampleBuffer::samples`].
    pub fn decode(&mut self, bytes_read: usize) -> usize {
        let bytes_read = bytes_read.min(self.bytes.len());
        let pairs = self.bytes[..bytes_read].chunks_exact(2);
        for (sample, pair) in self.samples.iter_mut().zip(pairs) {
            *sample = i32::from(i16::from_le_bytes([pair[0], pair[1]]));
        }
        self.decoded = bytes_read / 2;
        self.decoded
    }

    /// The samples decoded by the last call to [`SampleBuffer::decode`].
    pub fn samples(&self) -> &[i32] {
        &self.samples[..self.decoded]
    }

    /// Window length in samples.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_little_endian_signed_pairs() {
        let mut buffer = SampleBuffer::new(4);
        buffer
            .bytes_mut()
            .copy_from_slice(&[0x01, 0x00, 0xff, 0xff, 0x00, 0x80, 0xff, 0x7f]);
        assert_eq!(buffer.decode(8), 4);
        assert_eq!(buffer.samples(), &[1, -1, i16::MIN as i32, i16::MAX as i32]);
    }

    #[test]
    fn ignores_trailing_odd_byte() {
        let mut buffer = SampleBuffer::new(4);
        buffer.bytes_mut()[..5].copy_from_slice(&[0x10, 0x00, 0x20, 0x00, 0x7f]);
        assert_eq!(buffer.decode(5), 2);
        assert_eq!(buffer.samples(), &[16, 32]);
    }

    #[test]
    fn short_read_exposes_only_fresh_samples() {
        let mut buffer = SampleBuffer::new(3);
        buffer.bytes_mut().copy_from_slice(&[1, 0, 2, 0, 3, 0]);
        buffer.decode(6);
        buffer.bytes_mut()[..2].copy_from_slice(&[9, 0]);
        assert_eq!(buffer.decode(2), 1);
        assert_eq!(buffer.samples(), &[9]);
    }

    #[test]
    fn zero_bytes_yield_empty_window() {
        let mut buffer = SampleBuffer::new(8);
        assert_eq!(buffer.decode(0), 0);
        assert!(buffer.samples().is_empty());
        assert_eq!(buffer.capacity(), 8);
    }
}
