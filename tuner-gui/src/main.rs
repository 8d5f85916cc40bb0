//! # Octave Tuner - GUI
//!
//! This module contains the main GUI application for the octave tuner.
//! It shows the closest note, its two neighbors, an interpolation meter
//! and the detected frequency.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme
//! - **Audio Thread**: Dedicated thread running the tuner loop on live capture
//! - **Communication**: Crossbeam channel carrying result snapshots to the GUI
//! - **Updates**: 60 FPS polling via subscription system

mod ui;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use iced::{Element, Subscription, Theme};
use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tuner_core::{
    DetectionResult, TunerConfig, TunerError,
    audio::CpalSource,
    tuner::{RunSummary, TunerLoop},
};
use ui::main_display::create_main_view;

/// Optional configuration file read at startup.
const CONFIG_PATH: &str = "tuner_config.json";

/// Main entry point for the tuner application.
pub fn main() -> iced::Result {
    init_logging();
    info!("[MAIN] Starting Octave Tuner...");
    let result = iced::application("Octave Tuner", TunerApp::update, TunerApp::view)
        .subscription(TunerApp::subscription)
        .theme(TunerApp::theme)
        .run();
    info!("[MAIN] Application finished with result: {:?}", result);
    result
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    /// Timer tick for polling the audio thread
    Tick,
}

/// UI-specific data needed for rendering the interface.
#[derive(Debug, Clone)]
pub struct AppDisplayData {
    /// Most recent result published by the audio thread
    pub last_result: DetectionResult,
    /// Half-range of the interpolation meter
    pub interpolation_range: i32,
    /// Set once the audio thread has stopped, explaining why
    pub status: Option<String>,
}

type AudioThread = JoinHandle<Result<RunSummary, TunerError>>;

/// Main application state.
#[derive(Debug)]
struct TunerApp {
    analysis_receiver: Receiver<DetectionResult>,
    audio_thread: Option<AudioThread>,
    display_data: AppDisplayData,
}

impl Default for TunerApp {
    /// Loads the configuration, starts the audio thread and shows the
    /// placeholder result until the first detection arrives.
    fn default() -> Self {
        let config = load_config(CONFIG_PATH).unwrap_or_else(|e| {
            warn!("[MAIN] Ignoring {}: {:#}", CONFIG_PATH, e);
            TunerConfig::default()
        });

        let (analysis_tx, analysis_rx) = crossbeam_channel::unbounded();
        let display_data = AppDisplayData {
            last_result: DetectionResult::placeholder(),
            interpolation_range: config.interpolation_range,
            status: None,
        };

        info!("[MAIN] Starting audio processing...");
        Self {
            analysis_receiver: analysis_rx,
            audio_thread: Some(start_audio_processing(config, analysis_tx)),
            display_data,
        }
    }
}

impl TunerApp {
    fn update(&mut self, message: Message) {
        match message {
            Message::Tick => {
                // Only the newest snapshot matters for display.
                if let Some(result) = self.analysis_receiver.try_iter().last() {
                    self.display_data.last_result = result;
                }
                self.check_audio_thread();
            }
        }
    }

    /// Collects the audio thread's exit status once it has stopped.
    fn check_audio_thread(&mut self) {
        let finished = self
            .audio_thread
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if !finished {
            return;
        }

        let status = match self.audio_thread.take().map(JoinHandle::join) {
            Some(Ok(Ok(summary))) => {
                info!("[MAIN] Audio stream ended: {:?}", summary);
                String::from("Audio stream ended")
            }
            Some(Ok(Err(e))) => {
                error!("[MAIN] Audio thread failed: {}", e);
                format!("Audio unavailable: {}", e)
            }
            Some(Err(_)) => {
                error!("[MAIN] Audio thread panicked");
                String::from("Audio thread stopped unexpectedly")
            }
            None => return,
        };
        self.display_data.status = Some(status);
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.display_data)
    }

    /// Returns a timer subscription that fires every 16ms (60 FPS).
    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_millis(16)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Spawns the audio thread: opens the input device and runs the tuner loop
/// until the stream closes or the GUI drops its receiver.
fn start_audio_processing(
    config: TunerConfig,
    analysis_tx: Sender<DetectionResult>,
) -> AudioThread {
    thread::spawn(move || {
        info!("[AUDIO-THREAD] Attempting to start audio capture...");
        let source = CpalSource::open_default(config.sample_rate)?;
        let mut tuner = TunerLoop::new(source, config)?;

        let mut sink = analysis_tx;
        let summary = tuner.run(&mut sink)?;
        info!("[AUDIO-THREAD] Audio thread finished");
        Ok(summary)
    })
}

/// Loads the tuner configuration from a JSON file.
///
/// A missing file is not an error and yields the defaults.
///
/// # Returns
/// * `Ok(TunerConfig)` - Defaults, or the validated file contents
/// * `Err(_)` - File I/O, JSON or validation error
fn load_config(path: &str) -> Result<TunerConfig> {
    if !Path::new(path).exists() {
        return Ok(TunerConfig::default());
    }

    let data = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let config: TunerConfig =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path))?;
    config.validate()?;
    info!("[MAIN] Loaded configuration from {}", path);
    Ok(config)
}
