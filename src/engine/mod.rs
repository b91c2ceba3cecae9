//! Audio Engine Module
//!
//! Buffer types shared by the DSP stages and the plugin host contract,
//! plus WAV file I/O for the offline host.

pub mod buffer;
pub mod io;

pub use buffer::{db_to_linear, linear_to_db, AudioBuffer, ChannelLayout};
pub use io::{export_audio, generate_test_tone, import_audio, ExportFormat};
