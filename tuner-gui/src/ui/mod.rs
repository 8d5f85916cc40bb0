//! # UI Module
//!
//! This module contains all UI components for the octave tuner.

pub mod interpolation_meter;
pub mod main_display;
