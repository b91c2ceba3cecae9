//! Gain Stage
//!
//! Pre-gain applied ahead of the waveshaper, set in decibels.

use crate::dsp::effect::Effect;
use crate::engine::db_to_linear;
use crate::impl_effect_common;

// ============================================================================
// Constants
// ============================================================================

/// Minimum gain in dB (-96 dB = effectively silent)
pub const MIN_GAIN_DB: f32 = -96.0;

/// Maximum gain in dB (+48 dB)
pub const MAX_GAIN_DB: f32 = 48.0;

// ============================================================================
// Gain Stage
// ============================================================================

/// Linear gain multiply with a dB-based interface
///
/// # Parameters
/// - `gain_db`: Gain in decibels (-96 to +48 dB)
///
/// # Example
/// ```
/// use drywet::dsp::{Effect, Gain};
///
/// let mut gain = Gain::new(-6.0);
/// let mut samples = [1.0_f32; 4];
/// gain.process_samples(&mut samples);
/// assert!((samples[0] - 0.501187).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct Gain {
    gain_db: f32,
    gain_linear: f32,
}

impl Gain {
    /// Create a new gain stage
    ///
    /// `gain_db` is clamped to the valid range.
    pub fn new(gain_db: f32) -> Self {
        let mut gain = Self {
            gain_db: 0.0,
            gain_linear: 1.0,
        };
        gain.set_gain_db(gain_db);
        gain
    }

    /// Set the gain in decibels
    ///
    /// Clamped to the valid range; non-finite values are ignored.
    pub fn set_gain_db(&mut self, db: f32) {
        if !db.is_finite() {
            return;
        }
        self.gain_db = db.clamp(MIN_GAIN_DB, MAX_GAIN_DB);
        self.gain_linear = db_to_linear(self.gain_db);
    }

    /// Get the current gain in decibels
    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    /// Get the current linear gain multiplier
    pub fn gain_linear(&self) -> f32 {
        self.gain_linear
    }
}

impl Default for Gain {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Effect for Gain {
    impl_effect_common!("gain", "Pre-Gain");

    fn prepare(&mut self, _sample_rate: f64, _max_block_size: usize) {
        self.gain_linear = db_to_linear(self.gain_db);
    }

    fn process_samples(&mut self, samples: &mut [f32]) {
        // Unity gain optimization
        if self.gain_linear == 1.0 {
            return;
        }

        for sample in samples.iter_mut() {
            *sample *= self.gain_linear;
        }
    }

    fn reset(&mut self) {
        // Gain has no internal state to reset
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AudioBuffer, ChannelLayout};
    use approx::assert_relative_eq;

    fn create_test_buffer(value: f32, num_samples: usize) -> AudioBuffer {
        let mut buffer = AudioBuffer::new(num_samples, ChannelLayout::Stereo);
        for channel in buffer.samples.iter_mut() {
            channel.fill(value);
        }
        buffer
    }

    #[test]
    fn test_gain_new() {
        let gain = Gain::new(-6.0);
        assert_eq!(gain.gain_db(), -6.0);
        assert_relative_eq!(gain.gain_linear(), 0.501187, epsilon = 1e-5);
    }

    #[test]
    fn test_gain_default_is_unity() {
        let gain = Gain::default();
        assert_eq!(gain.gain_db(), 0.0);
        assert_eq!(gain.gain_linear(), 1.0);
    }

    #[test]
    fn test_gain_clamping() {
        assert_eq!(Gain::new(-200.0).gain_db(), MIN_GAIN_DB);
        assert_eq!(Gain::new(100.0).gain_db(), MAX_GAIN_DB);
    }

    #[test]
    fn test_gain_ignores_non_finite() {
        let mut gain = Gain::new(-12.0);
        gain.set_gain_db(f32::NAN);
        gain.set_gain_db(f32::INFINITY);
        assert_eq!(gain.gain_db(), -12.0);
    }

    #[test]
    fn test_gain_range_ends() {
        assert_relative_eq!(Gain::new(-96.0).gain_linear(), 1.585e-5, max_relative = 1e-3);
        assert_relative_eq!(Gain::new(48.0).gain_linear(), 251.189, max_relative = 1e-4);
    }

    #[test]
    fn test_gain_process() {
        let mut gain = Gain::new(-6.0);
        let mut buffer = create_test_buffer(1.0, 100);

        gain.process(&mut buffer);

        for channel in &buffer.samples {
            for &sample in channel {
                assert_relative_eq!(sample, 0.501187, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_gain_process_unity() {
        let mut gain = Gain::new(0.0);
        let mut buffer = create_test_buffer(0.5, 100);
        let original = buffer.clone();

        gain.process(&mut buffer);

        assert_eq!(buffer, original);
    }

    #[test]
    fn test_gain_prepare_keeps_linear_in_sync() {
        let mut gain = Gain::new(-6.0);
        gain.gain_linear = 0.0;

        gain.prepare(48000.0, 512);

        assert_relative_eq!(gain.gain_linear(), 0.501187, epsilon = 1e-5);
    }

    #[test]
    fn test_gain_effect_type() {
        let gain = Gain::default();
        assert_eq!(gain.effect_type(), "gain");
        assert_eq!(gain.display_name(), "Pre-Gain");
        assert_eq!(gain.latency_samples(), 0);
    }
}
