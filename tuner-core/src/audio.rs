//! # Audio Capture Module
//!
//! This module defines the pull-based audio source the tuner reads from and
//! provides two implementations:
//! - [`CpalSource`]: real-time capture using CPAL (Cross-Platform Audio Library)
//! - [`ReaderSource`]: raw PCM from any byte reader (files, stdin, memory)
//!
//! Every source delivers mono, signed 16-bit little-endian PCM.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SupportedStreamConfigRange};
use crossbeam_channel::{Receiver, Sender};
use std::io::{ErrorKind, Read};
use tracing::{info, warn};

use crate::error::TunerError;

/// Number of captured chunks the callback may queue before dropping audio.
const CHANNEL_CAPACITY: usize = 64;

/// A blocking source of raw PCM bytes.
pub trait AudioSource {
    /// Fills `buffer` with up to `buffer.len()` bytes of LE i16 mono PCM.
    ///
    /// # Returns
    /// * `Some(n)` - `n` bytes were written; `Some(0)` means no data this cycle
    /// * `None` - The stream is closed and no more data will arrive
    fn read(&mut self, buffer: &mut [u8]) -> Option<usize>;
}

/// Reads raw PCM from any [`Read`] implementation.
///
/// Each call keeps reading until the buffer is full or the reader reaches
/// end of file, so only the final window can be short.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    finished: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            finished: false,
        }
    }
}

impl<R: Read> AudioSource for ReaderSource<R> {
    fn read(&mut self, buffer: &mut [u8]) -> Option<usize> {
        if self.finished {
            return None;
        }

        let mut filled = 0;
        while filled < buffer.len() {
            match self.reader.read(&mut buffer[filled..]) {
                Ok(0) => {
                    self.finished = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("[AUDIO] Read failed, closing source: {}", e);
                    self.finished = true;
                    break;
                }
            }
        }

        if filled == 0 && self.finished {
            None
        } else {
            Some(filled)
        }
    }
}

/// Live capture from the default input device.
///
/// The CPAL callback converts every frame to LE i16 bytes and queues it on a
/// bounded channel; [`AudioSource::read`] blocks on that channel until a full
/// window is available.
pub struct CpalSource {
    // Dropping the stream stops capture, so it lives as long as the source.
    _stream: cpal::Stream,
    receiver: Receiver<Vec<u8>>,
    pending: Vec<u8>,
}

impl CpalSource {
    /// Opens the default input device at `sample_rate` and starts capturing.
    ///
    /// # Returns
    /// * `Ok(source)` - Capture is running
    /// * `Err(TunerError::DeviceUnavailable)` - No input device, or it refused to open
    /// * `Err(TunerError::Configuration)` - The device offers no i16/f32 format at `sample_rate`
    pub fn open_default(sample_rate: u32) -> Result<Self, TunerError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| TunerError::DeviceUnavailable("no input device available".into()))?;

        let device_name = device
            .name()
            .unwrap_or_else(|_| String::from("<unnamed device>"));
        info!("[AUDIO] Using audio input device: {}", device_name);

        let configs = device
            .supported_input_configs()
            .map_err(|e| TunerError::DeviceUnavailable(e.to_string()))?
            .collect::<Vec<_>>();
        let supported_config = find_supported_config(configs, sample_rate).ok_or_else(|| {
            TunerError::Configuration(format!(
                "no i16 or f32 input format at {} Hz on {}",
                sample_rate, device_name
            ))
        })?;

        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config
            .with_sample_rate(cpal::SampleRate(sample_rate))
            .into();
        let channels = usize::from(config.channels);
        info!(
            "[AUDIO] Selected {} Hz, {} channel(s), {:?}",
            sample_rate, channels, sample_format
        );

        let (sender, receiver) = crossbeam_channel::bounded(CHANNEL_CAPACITY);
        let err_fn = |err| warn!("[AUDIO] An error occurred on the audio stream: {}", err);

        let stream = match sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    forward_frames(&sender, data, channels, |s| s);
                },
                err_fn,
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    forward_frames(&sender, data, channels, f32_to_i16);
                },
                err_fn,
                None,
            ),
            other => {
                return Err(TunerError::Configuration(format!(
                    "unsupported sample format {:?}",
                    other
                )));
            }
        }
        .map_err(|e| TunerError::DeviceUnavailable(e.to_string()))?;

        stream.play().map_err(|e| TunerError::Stream(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            receiver,
            pending: Vec::new(),
        })
    }
}

impl AudioSource for CpalSource {
    fn read(&mut self, buffer: &mut [u8]) -> Option<usize> {
        while self.pending.len() < buffer.len() {
            match self.receiver.recv() {
                Ok(chunk) => self.pending.extend_from_slice(&chunk),
                // The stream callback is gone; hand out what is left.
                Err(_) => break,
            }
        }

        if self.pending.is_empty() {
            return None;
        }

        let n = buffer.len().min(self.pending.len());
        buffer[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Some(n)
    }
}

/// Takes the first channel of each interleaved frame and queues it as LE bytes.
fn forward_frames<T: Copy>(
    sender: &Sender<Vec<u8>>,
    data: &[T],
    channels: usize,
    to_i16: impl Fn(T) -> i16,
) {
    let bytes: Vec<u8> = data
        .iter()
        .step_by(channels.max(1))
        .flat_map(|&s| to_i16(s).to_le_bytes())
        .collect();

    // Drop the chunk if the analysis side has fallen behind.
    let _ = sender.try_send(bytes);
}

fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Finds the best supported audio configuration for the target sample rate.
///
/// Keeps only i16 and f32 formats whose range contains `target_rate`,
/// preferring mono, then i16 over f32.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| matches!(c.sample_format(), SampleFormat::I16 | SampleFormat::F32))
        .filter(|c| c.min_sample_rate().0 <= target_rate && target_rate <= c.max_sample_rate().0)
        .min_by_key(|c| (c.channels() != 1, c.sample_format() != SampleFormat::I16))
}
