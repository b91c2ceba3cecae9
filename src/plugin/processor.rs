//! Host contract
//!
//! `AudioProcessor` is the set of lifecycle callbacks a host drives:
//! construct via [`create_plugin`], negotiate buses, `prepare_to_play`,
//! repeated `process_block` calls on the audio thread, `release_resources`.

use std::sync::Arc;

use crate::dsp::SignalChain;
use crate::engine::AudioBuffer;
use crate::error::{DryWetError, Result};
use crate::plugin::bus::BusesLayout;
use crate::plugin::editor::Editor;
use crate::plugin::params::ParameterStore;

/// Name the plugin reports to hosts
pub const PLUGIN_NAME: &str = "DryWetTest";

/// Callbacks a plugin host invokes on an effect instance
///
/// `process_block` runs on the real-time audio thread and must not block or
/// allocate. Every other method runs on the host's message thread.
pub trait AudioProcessor: Send {
    /// Plugin display name
    fn name(&self) -> &str;

    /// Called before playback starts and whenever sample rate or block size change
    fn prepare_to_play(&mut self, sample_rate: f64, samples_per_block: usize);

    /// Called when playback stops
    fn release_resources(&mut self);

    /// Process one block of audio in place
    fn process_block(&mut self, buffer: &mut AudioBuffer);

    /// Whether the plugin can run with the proposed layout
    fn is_buses_layout_supported(&self, layout: &BusesLayout) -> bool;

    /// Apply a layout the host has settled on
    ///
    /// # Errors
    /// `UnsupportedLayout` if `is_buses_layout_supported` rejects it.
    fn set_buses_layout(&mut self, layout: BusesLayout) -> Result<()>;

    fn accepts_midi(&self) -> bool;
    fn produces_midi(&self) -> bool;
    fn is_midi_effect(&self) -> bool;

    /// Length of the tail after input stops, in seconds
    fn tail_length_seconds(&self) -> f64;

    /// Latency the host should compensate, in samples
    fn latency_samples(&self) -> usize;

    fn num_programs(&self) -> usize;
    fn current_program(&self) -> usize;
    fn set_current_program(&mut self, index: usize);
    fn program_name(&self, index: usize) -> String;
    fn change_program_name(&mut self, index: usize, name: &str);

    fn has_editor(&self) -> bool;

    /// Create an editor bound to this instance's parameters
    fn create_editor(&self) -> Editor;

    /// Shared parameter store
    fn parameters(&self) -> Arc<ParameterStore>;

    /// Serialize plugin state for the host session
    fn get_state_information(&self) -> Vec<u8>;

    /// Restore plugin state from a host session
    fn set_state_information(&mut self, data: &[u8]);
}

/// The dry/wet waveshaper effect
pub struct DryWetProcessor {
    params: Arc<ParameterStore>,
    chain: SignalChain,
    layout: BusesLayout,
}

impl DryWetProcessor {
    /// Create an instance with default parameters and a stereo layout
    pub fn new() -> Self {
        Self {
            params: Arc::new(ParameterStore::new()),
            chain: SignalChain::new(),
            layout: BusesLayout::default(),
        }
    }

    /// Current bus layout
    pub fn buses_layout(&self) -> BusesLayout {
        self.layout
    }

    /// Signal chain owned by the audio thread
    pub fn chain(&self) -> &SignalChain {
        &self.chain
    }
}

impl Default for DryWetProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioProcessor for DryWetProcessor {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn prepare_to_play(&mut self, sample_rate: f64, samples_per_block: usize) {
        log::debug!(
            "{}: prepare_to_play({} Hz, {} samples)",
            PLUGIN_NAME,
            sample_rate,
            samples_per_block
        );
        self.chain.prepare(sample_rate, samples_per_block);
    }

    fn release_resources(&mut self) {
        log::debug!("{}: release_resources", PLUGIN_NAME);
        self.chain.release();
    }

    fn process_block(&mut self, buffer: &mut AudioBuffer) {
        // Output channels without a matching input may hold garbage
        let inputs = self.layout.main_input_channels;
        let outputs = self.layout.main_output_channels.min(buffer.num_channels());
        for channel in inputs..outputs {
            buffer.clear_channel(channel);
        }

        let params = self.params.snapshot();
        self.chain.process(buffer, params.pre_gain_db, params.mix);
    }

    fn is_buses_layout_supported(&self, layout: &BusesLayout) -> bool {
        layout.is_supported()
    }

    fn set_buses_layout(&mut self, layout: BusesLayout) -> Result<()> {
        if !self.is_buses_layout_supported(&layout) {
            log::warn!(
                "{}: declined layout {} in / {} out",
                PLUGIN_NAME,
                layout.main_input_channels,
                layout.main_output_channels
            );
            return Err(DryWetError::UnsupportedLayout {
                inputs: layout.main_input_channels,
                outputs: layout.main_output_channels,
            });
        }
        self.layout = layout;
        Ok(())
    }

    fn accepts_midi(&self) -> bool {
        false
    }

    fn produces_midi(&self) -> bool {
        false
    }

    fn is_midi_effect(&self) -> bool {
        false
    }

    fn tail_length_seconds(&self) -> f64 {
        0.0
    }

    fn latency_samples(&self) -> usize {
        self.chain.latency_samples()
    }

    // Some hosts misbehave with zero programs, so a single unnamed slot is reported.
    fn num_programs(&self) -> usize {
        1
    }

    fn current_program(&self) -> usize {
        0
    }

    fn set_current_program(&mut self, _index: usize) {}

    fn program_name(&self, _index: usize) -> String {
        String::new()
    }

    fn change_program_name(&mut self, _index: usize, _name: &str) {}

    fn has_editor(&self) -> bool {
        true
    }

    fn create_editor(&self) -> Editor {
        Editor::new(Arc::clone(&self.params))
    }

    fn parameters(&self) -> Arc<ParameterStore> {
        Arc::clone(&self.params)
    }

    // Session persistence is not implemented: parameters are not saved.
    fn get_state_information(&self) -> Vec<u8> {
        Vec::new()
    }

    fn set_state_information(&mut self, data: &[u8]) {
        if !data.is_empty() {
            log::warn!(
                "{}: ignoring {} bytes of session state",
                PLUGIN_NAME,
                data.len()
            );
        }
    }
}

/// Create a new, independent plugin instance
pub fn create_plugin() -> Box<dyn AudioProcessor> {
    Box::new(DryWetProcessor::new())
}
