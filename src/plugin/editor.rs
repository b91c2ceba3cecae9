//! Editor parameter bindings
//!
//! Two rotary controls, each bound both ways to a key in the parameter store.
//! The editor only binds values; drawing and layout belong to the host UI.

use std::sync::Arc;

use crate::error::Result;
use crate::plugin::params::{FloatParamInfo, ParameterStore, MIX, MIX_ID, PREGAIN, PREGAIN_ID};

/// Pixels of vertical drag that sweep a control across its full range
pub const DRAG_PIXELS_FOR_FULL_RANGE: f32 = 250.0;

/// A rotary control bound to one parameter
#[derive(Debug, Clone)]
pub struct RotaryControl {
    label: &'static str,
    info: &'static FloatParamInfo,
    params: Arc<ParameterStore>,
}

impl RotaryControl {
    fn new(
        label: &'static str,
        info: &'static FloatParamInfo,
        params: Arc<ParameterStore>,
    ) -> Self {
        Self {
            label,
            info,
            params,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Key of the bound parameter
    pub fn param_id(&self) -> &'static str {
        self.info.id
    }

    /// Range of the bound parameter
    pub fn range(&self) -> (f32, f32) {
        (self.info.min, self.info.max)
    }

    /// Current value, read from the store
    pub fn value(&self) -> Result<f32> {
        self.params.get(self.info.id)
    }

    /// Position of the control in [0, 1]
    pub fn normalized(&self) -> Result<f32> {
        Ok(self.info.normalize(self.value()?))
    }

    /// Write a plain value to the store; returns the stored value
    pub fn set_value(&self, value: f32) -> Result<f32> {
        self.params.set(self.info.id, value)
    }

    /// Write a [0, 1] position to the store; returns the stored value
    pub fn set_normalized(&self, normalized: f32) -> Result<f32> {
        self.set_value(self.info.denormalize(normalized))
    }

    /// Apply a vertical drag; upward drags (negative `dy`) raise the value
    pub fn drag(&self, dy: f32) -> Result<f32> {
        let position = self.normalized()? - dy / DRAG_PIXELS_FOR_FULL_RANGE;
        self.set_normalized(position)
    }

    /// Text shown next to the control
    pub fn display_text(&self) -> Result<String> {
        let value = self.value()?;
        Ok(if self.info.unit.is_empty() {
            format!("{:.2}", value)
        } else {
            format!("{:.1} {}", value, self.info.unit)
        })
    }
}

/// Editor for a plugin instance
#[derive(Debug, Clone)]
pub struct Editor {
    pre_gain: RotaryControl,
    mix: RotaryControl,
}

impl Editor {
    /// Create the editor's controls bound to `params`
    pub fn new(params: Arc<ParameterStore>) -> Self {
        Self {
            pre_gain: RotaryControl::new("PreGain(dB)", &PREGAIN, Arc::clone(&params)),
            mix: RotaryControl::new("Mix", &MIX, params),
        }
    }

    pub fn pre_gain(&self) -> &RotaryControl {
        &self.pre_gain
    }

    pub fn mix(&self) -> &RotaryControl {
        &self.mix
    }

    /// Find the control bound to a parameter key
    pub fn control(&self, key: &str) -> Option<&RotaryControl> {
        match key {
            PREGAIN_ID => Some(&self.pre_gain),
            MIX_ID => Some(&self.mix),
            _ => None,
        }
    }

    /// All controls, in display order
    pub fn controls(&self) -> [&RotaryControl; 2] {
        [&self.pre_gain, &self.mix]
    }
}
