//! CLI Module
//!
//! Offline host for the DryWet effect: renders WAV files through a plugin
//! instance block by block.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DryWet - pre-gain waveshaper with dry/wet mix
#[derive(Parser, Debug)]
#[command(name = "drywet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a WAV file through the effect
    #[command(name = "render")]
    Render {
        /// Input WAV file (mono or stereo)
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// JSON parameter preset, e.g. {"pre_gain_db": 12.0, "mix": 0.5}
        #[arg(long)]
        params: Option<PathBuf>,

        /// Pre-gain in dB (-96 to 48), overrides the preset
        #[arg(long, allow_hyphen_values = true)]
        pre_gain_db: Option<f32>,

        /// Dry/wet mix (0 to 1), overrides the preset
        #[arg(long)]
        mix: Option<f32>,

        /// Samples per processing block
        #[arg(long, default_value_t = 512)]
        block_size: usize,

        /// Output bit depth (16, 24 or 32)
        #[arg(long, default_value_t = 24)]
        bit_depth: u16,
    },

    /// Print the plugin's parameters as JSON
    #[command(name = "params")]
    Params,
}
