//! Signal chain
//!
//! Fixed-order processing for one block:
//! 1. Capture the dry signal
//! 2. Pre-gain
//! 3. Waveshaper
//! 4. Linear dry/wet crossfade back into the buffer
//!
//! Every stage is per-sample, so a block longer than the prepared size is
//! processed in prepared-size runs without changing the result.

use super::{DryWetMixer, Effect, Gain, MixingRule, Waveshaper};
use crate::dsp::gain::{MAX_GAIN_DB, MIN_GAIN_DB};
use crate::dsp::mixer::DEFAULT_WET_LATENCY;
use crate::engine::AudioBuffer;

/// Lifecycle state of the chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChainState {
    /// No snapshot storage yet; processing passes audio through untouched
    Unprepared,
    /// Ready to process blocks of up to `max_block_size` samples
    Prepared {
        sample_rate: f64,
        max_block_size: usize,
    },
}

/// Pre-gain → waveshaper → dry/wet mix
#[derive(Debug, Clone)]
pub struct SignalChain {
    pre_gain: Gain,
    waveshaper: Waveshaper,
    mixer: DryWetMixer,
    state: ChainState,
}

impl SignalChain {
    /// Create an unprepared chain
    pub fn new() -> Self {
        Self {
            pre_gain: Gain::default(),
            waveshaper: Waveshaper::default(),
            mixer: DryWetMixer::new(),
            state: ChainState::Unprepared,
        }
    }

    /// Prepare for processing
    ///
    /// Sizes the dry snapshot to `max_block_size` and resets the mixer to the
    /// linear rule with the fixed one-sample wet latency. This is the only
    /// place the chain allocates.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) {
        self.pre_gain.prepare(sample_rate, max_block_size);
        self.waveshaper.prepare(sample_rate, max_block_size);

        self.mixer.prepare(max_block_size);
        self.mixer.set_mixing_rule(MixingRule::Linear);
        self.mixer.set_wet_latency(DEFAULT_WET_LATENCY);

        self.state = ChainState::Prepared {
            sample_rate,
            max_block_size,
        };
        log::debug!(
            "Signal chain prepared: {} Hz, max block {}",
            sample_rate,
            max_block_size
        );
    }

    /// Reset stage state without reallocating
    pub fn reset(&mut self) {
        self.pre_gain.reset();
        self.waveshaper.reset();
        self.mixer.reset();
    }

    /// Host release callback
    ///
    /// Drops any captured dry samples. The snapshot storage and the prepared
    /// state are kept, so blocks arriving after a release are still
    /// processed; storage is freed when the chain is dropped.
    pub fn release(&mut self) {
        self.reset();
        log::debug!("Signal chain released");
    }

    /// Process one block in place
    ///
    /// `pre_gain_db` and `mix_ratio` are held fixed for the whole block and
    /// clamped to their parameter ranges. On an unprepared chain the buffer
    /// is left untouched.
    pub fn process(&mut self, buffer: &mut AudioBuffer, pre_gain_db: f32, mix_ratio: f32) {
        let max_block_size = match self.state {
            ChainState::Prepared { max_block_size, .. } if max_block_size > 0 => max_block_size,
            _ => return,
        };

        self.pre_gain
            .set_gain_db(pre_gain_db.clamp(MIN_GAIN_DB, MAX_GAIN_DB));
        self.mixer.set_wet_mix_proportion(mix_ratio);

        for channel in buffer.samples.iter_mut() {
            for run in channel.chunks_mut(max_block_size) {
                self.mixer.push_dry_samples(run);
                self.pre_gain.process_samples(run);
                self.waveshaper.process_samples(run);
                self.mixer.mix_wet_samples(run);
            }
        }
    }

    /// Latency reported to the host, in samples
    pub fn latency_samples(&self) -> usize {
        self.pre_gain.latency_samples()
            + self.waveshaper.latency_samples()
            + self.mixer.latency_samples()
    }

    /// Current lifecycle state
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Whether `prepare` has been called since construction
    pub fn is_prepared(&self) -> bool {
        matches!(self.state, ChainState::Prepared { .. })
    }

    /// Linear gain applied by the most recent block
    pub fn gain_linear(&self) -> f32 {
        self.pre_gain.gain_linear()
    }

    /// Wet proportion applied by the most recent block
    pub fn wet_mix_proportion(&self) -> f32 {
        self.mixer.wet_mix_proportion()
    }
}

impl Default for SignalChain {
    fn default() -> Self {
        Self::new()
    }
}
