//! Plugin host contract
//!
//! Everything a host needs to load and drive the effect: parameters, bus
//! layout negotiation, lifecycle callbacks and editor bindings.

pub mod bus;
pub mod editor;
pub mod params;
pub mod processor;

pub use bus::{BusInfo, BusesLayout};
pub use editor::{Editor, RotaryControl};
pub use params::{ParamSnapshot, ParameterStore, MIX_ID, PARAMETERS, PREGAIN_ID};
pub use processor::{create_plugin, AudioProcessor, DryWetProcessor, PLUGIN_NAME};
