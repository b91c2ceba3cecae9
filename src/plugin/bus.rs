//! Bus configuration
//!
//! The plugin runs mono or stereo, with the input layout matching the output.

use crate::engine::ChannelLayout;

/// Description of one audio bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusInfo {
    /// Display name for the bus
    pub name: &'static str,
    /// Number of channels in this bus
    pub channel_count: usize,
    /// Whether the bus is active by default
    pub is_default_active: bool,
}

impl BusInfo {
    /// Create a stereo bus
    pub const fn stereo(name: &'static str) -> Self {
        Self {
            name,
            channel_count: 2,
            is_default_active: true,
        }
    }
}

/// Main input bus the plugin declares
pub const DEFAULT_INPUT_BUS: BusInfo = BusInfo::stereo("Input");

/// Main output bus the plugin declares
pub const DEFAULT_OUTPUT_BUS: BusInfo = BusInfo::stereo("Output");

/// Channel counts of the main input and output buses proposed by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusesLayout {
    pub main_input_channels: usize,
    pub main_output_channels: usize,
}

impl BusesLayout {
    /// Layout with the same channel count on input and output
    pub fn symmetric(layout: ChannelLayout) -> Self {
        Self {
            main_input_channels: layout.num_channels(),
            main_output_channels: layout.num_channels(),
        }
    }

    /// The plugin's declared default layout (stereo in, stereo out)
    pub fn default_layout() -> Self {
        Self {
            main_input_channels: DEFAULT_INPUT_BUS.channel_count,
            main_output_channels: DEFAULT_OUTPUT_BUS.channel_count,
        }
    }

    /// Whether the plugin can run with this layout
    ///
    /// The output must be mono or stereo, and the input must match it.
    pub fn is_supported(&self) -> bool {
        ChannelLayout::from_count(self.main_output_channels).is_some()
            && self.main_input_channels == self.main_output_channels
    }
}

impl Default for BusesLayout {
    fn default() -> Self {
        Self::default_layout()
    }
}
