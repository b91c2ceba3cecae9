//! DryWet - pre-gain waveshaper with a dry/wet mix
//!
//! A minimal audio effect: each block is pre-gained, soft-clipped with
//! `x / (|x| + 1)`, and crossfaded linearly against the untouched input.
//!
//! # Architecture
//!
//! - `dsp`: the three stages and the `SignalChain` that runs them per block
//! - `plugin`: the host contract (parameters, bus layouts, lifecycle, editor bindings)
//! - `engine`: audio buffers and WAV I/O
//! - `cli`: an offline host that renders WAV files through a plugin instance

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod plugin;

pub use error::{DryWetError, Result};
