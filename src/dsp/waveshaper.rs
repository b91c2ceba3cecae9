//! Waveshaper Stage
//!
//! Stateless per-sample nonlinearity. The default transfer function is the
//! soft clipper `x / (|x| + 1)`.

use num_traits::Float;

use crate::dsp::effect::Effect;
use crate::impl_effect_common;

/// Soft-clipping transfer function `x / (|x| + 1)`
///
/// Odd, monotonic and bounded to (-1, 1) for every finite input. The
/// denominator is never below 1.
///
/// Once `|x|` outgrows the mantissa the quotient rounds to exactly ±1
/// (around 1.7e7 for f32), so the result is capped at the largest value
/// below 1. NaN passes through.
#[inline]
pub fn soft_clip<T: Float>(x: T) -> T {
    let limit = T::one() - T::epsilon() / (T::one() + T::one());
    let y = x / (x.abs() + T::one());
    if y > limit {
        limit
    } else if y < -limit {
        -limit
    } else {
        y
    }
}

/// Per-sample transfer function used by [`Waveshaper`]
pub type TransferFunction = fn(f32) -> f32;

/// Applies a transfer function to every sample
#[derive(Debug, Clone, Copy)]
pub struct Waveshaper {
    function: TransferFunction,
}

impl Waveshaper {
    /// Create a waveshaper with a custom transfer function
    pub fn new(function: TransferFunction) -> Self {
        Self { function }
    }

    /// Replace the transfer function
    pub fn set_function(&mut self, function: TransferFunction) {
        self.function = function;
    }

    /// Shape a single sample
    #[inline]
    pub fn shape(&self, x: f32) -> f32 {
        (self.function)(x)
    }
}

impl Default for Waveshaper {
    fn default() -> Self {
        Self::new(soft_clip::<f32>)
    }
}

impl Effect for Waveshaper {
    impl_effect_common!("waveshaper", "Waveshaper");

    fn prepare(&mut self, _sample_rate: f64, _max_block_size: usize) {}

    fn process_samples(&mut self, samples: &mut [f32]) {
        for sample in samples.iter_mut() {
            *sample = (self.function)(*sample);
        }
    }

    fn reset(&mut self) {}
}
