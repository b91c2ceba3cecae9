//! Effect trait definition
//!
//! Base trait for the stages of the signal chain.

use crate::engine::AudioBuffer;

/// Base trait for DSP stages
///
/// Stages transform samples in place. `process_samples` is the primitive;
/// `process` runs it over every channel of a buffer.
pub trait Effect: Send {
    /// Prepare the stage for processing
    ///
    /// Called when sample rate or block size changes.
    fn prepare(&mut self, sample_rate: f64, max_block_size: usize);

    /// Process one channel's run of samples in place
    fn process_samples(&mut self, samples: &mut [f32]);

    /// Process every channel of a buffer in place
    fn process(&mut self, buffer: &mut AudioBuffer) {
        for channel in buffer.samples.iter_mut() {
            self.process_samples(channel);
        }
    }

    /// Reset stage state
    fn reset(&mut self);

    /// Latency this stage reports to the host, in samples
    fn latency_samples(&self) -> usize {
        0
    }

    /// Get the effect type identifier
    fn effect_type(&self) -> &'static str;

    /// Get human-readable display name
    fn display_name(&self) -> &str;
}

/// Helper macro to implement the naming methods of the Effect trait
#[macro_export]
macro_rules! impl_effect_common {
    ($effect_type:expr, $display_name:expr) => {
        fn effect_type(&self) -> &'static str {
            $effect_type
        }

        fn display_name(&self) -> &str {
            $display_name
        }
    };
}
