//! DSP Stages
//!
//! The three stages of the dry/wet signal chain. Gain and waveshaper
//! implement the `Effect` trait; the mixer wraps them from outside.

mod chain;
mod effect;
mod gain;
mod mixer;
mod waveshaper;

pub use chain::{ChainState, SignalChain};
pub use effect::Effect;
pub use gain::{Gain, MAX_GAIN_DB, MIN_GAIN_DB};
pub use mixer::{DryWetMixer, MixingRule, DEFAULT_WET_LATENCY};
pub use waveshaper::{soft_clip, TransferFunction, Waveshaper};
