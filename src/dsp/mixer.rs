//! Dry/Wet Mixer
//!
//! Captures the dry signal before the wet stages run, then crossfades it back
//! against the processed signal.
//!
//! The mixer keeps a single scratch snapshot sized at `prepare` time. Callers
//! push one run of dry samples, run the wet stages over the same run, and mix
//! it back before pushing the next run; a snapshot is never reused across
//! pushes.

use std::f32::consts::FRAC_PI_2;

/// Curve used to derive dry and wet weights from the wet proportion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixingRule {
    /// Weights `1 - w` and `w`
    #[default]
    Linear,
    /// Both paths at full level at w = 0.5, each fading out over the other half
    Balanced,
    /// Sine crossfade, -3 dB at the midpoint
    Sin3dB,
    /// Square-root crossfade, -3 dB at the midpoint
    SquareRoot3dB,
}

impl MixingRule {
    /// Dry and wet weights for a wet proportion in [0, 1]
    pub fn weights(&self, wet: f32) -> (f32, f32) {
        match self {
            MixingRule::Linear => (1.0 - wet, wet),
            MixingRule::Balanced => (2.0 * (1.0 - wet).min(0.5), 2.0 * wet.min(0.5)),
            MixingRule::Sin3dB => ((FRAC_PI_2 * (1.0 - wet)).sin(), (FRAC_PI_2 * wet).sin()),
            MixingRule::SquareRoot3dB => ((1.0 - wet).sqrt(), wet.sqrt()),
        }
    }
}

/// Reported wet-path latency in samples
pub const DEFAULT_WET_LATENCY: usize = 1;

/// Dry/wet crossfader with a pre-sized dry snapshot
#[derive(Debug, Clone)]
pub struct DryWetMixer {
    dry: Vec<f32>,
    dry_len: usize,
    wet_proportion: f32,
    rule: MixingRule,
    wet_latency: usize,
}

impl DryWetMixer {
    /// Create an unprepared mixer (no snapshot capacity)
    pub fn new() -> Self {
        Self {
            dry: Vec::new(),
            dry_len: 0,
            wet_proportion: 0.0,
            rule: MixingRule::Linear,
            wet_latency: DEFAULT_WET_LATENCY,
        }
    }

    /// Size the dry snapshot for blocks of up to `max_block_size` samples
    pub fn prepare(&mut self, max_block_size: usize) {
        self.dry.clear();
        self.dry.resize(max_block_size, 0.0);
        self.reset();
    }

    /// Drop any captured dry samples
    pub fn reset(&mut self) {
        self.dry.fill(0.0);
        self.dry_len = 0;
    }

    /// Number of samples a single push can hold
    pub fn capacity(&self) -> usize {
        self.dry.len()
    }

    /// Capture a run of dry samples
    ///
    /// Returns the number of samples captured, which is less than
    /// `samples.len()` when the run exceeds the prepared capacity.
    pub fn push_dry_samples(&mut self, samples: &[f32]) -> usize {
        let len = samples.len().min(self.dry.len());
        self.dry[..len].copy_from_slice(&samples[..len]);
        self.dry_len = len;
        len
    }

    /// Crossfade the wet run against the captured dry run, in place
    ///
    /// Only the first `min(wet.len(), captured)` samples are mixed. The
    /// snapshot is consumed.
    pub fn mix_wet_samples(&mut self, wet: &mut [f32]) {
        let (dry_gain, wet_gain) = self.rule.weights(self.wet_proportion);
        let len = wet.len().min(self.dry_len);

        for (out, &dry) in wet[..len].iter_mut().zip(&self.dry[..len]) {
            *out = dry * dry_gain + *out * wet_gain;
        }

        self.dry_len = 0;
    }

    /// Set the wet proportion, clamped to [0, 1]. Non-finite values are ignored.
    pub fn set_wet_mix_proportion(&mut self, proportion: f32) {
        if proportion.is_finite() {
            self.wet_proportion = proportion.clamp(0.0, 1.0);
        }
    }

    /// Current wet proportion
    pub fn wet_mix_proportion(&self) -> f32 {
        self.wet_proportion
    }

    /// Set the mixing rule
    pub fn set_mixing_rule(&mut self, rule: MixingRule) {
        self.rule = rule;
    }

    /// Current mixing rule
    pub fn mixing_rule(&self) -> MixingRule {
        self.rule
    }

    /// Set the latency of the wet path in samples
    ///
    /// Dry and wet are compensated by the same amount, so the value is only
    /// reported to the host; it never shifts one path against the other.
    pub fn set_wet_latency(&mut self, samples: usize) {
        self.wet_latency = samples;
    }

    /// Latency reported to the host, in samples
    pub fn latency_samples(&self) -> usize {
        self.wet_latency
    }
}

impl Default for DryWetMixer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn prepared(max_block_size: usize, wet: f32) -> DryWetMixer {
        let mut mixer = DryWetMixer::new();
        mixer.prepare(max_block_size);
        mixer.set_wet_mix_proportion(wet);
        mixer
    }

    #[test_case(MixingRule::Linear, 0.25, 0.75, 0.25 ; "linear quarter")]
    #[test_case(MixingRule::Linear, 0.5, 0.5, 0.5 ; "linear half")]
    #[test_case(MixingRule::Balanced, 0.25, 1.0, 0.5 ; "balanced quarter")]
    #[test_case(MixingRule::Balanced, 0.5, 1.0, 1.0 ; "balanced half")]
    #[test_case(MixingRule::SquareRoot3dB, 0.25, 0.8660254, 0.5 ; "sqrt quarter")]
    #[test_case(MixingRule::Sin3dB, 0.5, 0.70710677, 0.70710677 ; "sin half")]
    fn test_mixing_rule_weights(rule: MixingRule, wet: f32, dry_gain: f32, wet_gain: f32) {
        let (d, w) = rule.weights(wet);
        assert_relative_eq!(d, dry_gain, epsilon = 1e-6);
        assert_relative_eq!(w, wet_gain, epsilon = 1e-6);
    }

    #[test]
    fn test_mixing_rules_reach_endpoints() {
        for rule in [
            MixingRule::Linear,
            MixingRule::Balanced,
            MixingRule::Sin3dB,
            MixingRule::SquareRoot3dB,
        ] {
            let (d, w) = rule.weights(0.0);
            assert_relative_eq!(d, 1.0, epsilon = 1e-6);
            assert_relative_eq!(w, 0.0, epsilon = 1e-6);
            let (d, w) = rule.weights(1.0);
            assert_relative_eq!(d, 0.0, epsilon = 1e-6);
            assert_relative_eq!(w, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_linear_crossfade() {
        let mut mixer = prepared(4, 0.25);
        mixer.push_dry_samples(&[1.0, -1.0, 0.0, 0.5]);

        let mut wet = [0.0, 0.0, 1.0, 0.5];
        mixer.mix_wet_samples(&mut wet);

        assert_eq!(wet, [0.75, -0.75, 0.25, 0.5]);
    }

    #[test]
    fn test_fully_dry_restores_dry_exactly() {
        let mut mixer = prepared(3, 0.0);
        let dry = [0.123, -0.456, 0.789];
        mixer.push_dry_samples(&dry);

        let mut wet = [0.9, 0.9, 0.9];
        mixer.mix_wet_samples(&mut wet);

        assert_eq!(wet, dry);
    }

    #[test]
    fn test_fully_wet_keeps_wet_exactly() {
        let mut mixer = prepared(3, 1.0);
        mixer.push_dry_samples(&[0.5, 0.5, 0.5]);

        let mut wet = [0.1, -0.2, 0.3];
        mixer.mix_wet_samples(&mut wet);

        assert_eq!(wet, [0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_push_truncates_to_capacity() {
        let mut mixer = prepared(2, 0.0);
        assert_eq!(mixer.capacity(), 2);
        assert_eq!(mixer.push_dry_samples(&[1.0, 2.0, 3.0]), 2);

        let mut wet = [0.0, 0.0, 7.0];
        mixer.mix_wet_samples(&mut wet);
        assert_eq!(wet, [1.0, 2.0, 7.0]);
    }

    #[test]
    fn test_snapshot_is_consumed_by_mix() {
        let mut mixer = prepared(2, 0.0);
        mixer.push_dry_samples(&[1.0, 1.0]);
        let mut first = [0.0, 0.0];
        mixer.mix_wet_samples(&mut first);
        assert_eq!(first, [1.0, 1.0]);

        // No new push: the previous snapshot must not be reused
        let mut second = [0.3, 0.3];
        mixer.mix_wet_samples(&mut second);
        assert_eq!(second, [0.3, 0.3]);
    }

    #[test]
    fn test_wet_proportion_clamped() {
        let mut mixer = DryWetMixer::new();
        mixer.set_wet_mix_proportion(1.5);
        assert_eq!(mixer.wet_mix_proportion(), 1.0);
        mixer.set_wet_mix_proportion(-0.5);
        assert_eq!(mixer.wet_mix_proportion(), 0.0);
        mixer.set_wet_mix_proportion(f32::NAN);
        assert_eq!(mixer.wet_mix_proportion(), 0.0);
    }

    #[test]
    fn test_latency_and_reset() {
        let mut mixer = prepared(64, 0.5);
        assert_eq!(mixer.latency_samples(), DEFAULT_WET_LATENCY);
        mixer.set_wet_latency(3);
        assert_eq!(mixer.latency_samples(), 3);

        mixer.push_dry_samples(&[1.0]);
        mixer.reset();
        assert_eq!(mixer.capacity(), 64);

        // Reset drops the captured run, so nothing is mixed back
        let mut wet = [0.2];
        mixer.mix_wet_samples(&mut wet);
        assert_eq!(wet, [0.2]);
    }
}
