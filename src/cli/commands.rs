//! CLI Command Implementations

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::engine::buffer::{calculate_peak, calculate_rms};
use crate::engine::{export_audio, import_audio, AudioBuffer, ExportFormat};
use crate::error::{DryWetError, Result};
use crate::plugin::{create_plugin, BusesLayout, ParamSnapshot, PARAMETERS};

/// Settings for one offline render
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: ParamSnapshot,
    pub block_size: usize,
    pub format: ExportFormat,
}

/// What a render did, for reporting
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub frames: usize,
    pub channels: usize,
    pub blocks: usize,
    pub latency_samples: usize,
    pub input_peak_db: f32,
    pub output_peak_db: f32,
    pub input_rms_db: f32,
    pub output_rms_db: f32,
}

/// Build the parameter snapshot from an optional preset file and overrides
pub fn resolve_params(
    preset: Option<&Path>,
    pre_gain_db: Option<f32>,
    mix: Option<f32>,
) -> Result<ParamSnapshot> {
    let mut snapshot = match preset {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| DryWetError::FileNotFound {
                path: path.display().to_string(),
                source: Some(e),
            })?;
            serde_json::from_str(&text)?
        }
        None => ParamSnapshot::default(),
    };

    if let Some(db) = pre_gain_db {
        snapshot.pre_gain_db = db;
    }
    if let Some(m) = mix {
        snapshot.mix = m;
    }
    Ok(snapshot)
}

/// Render a WAV file through a fresh plugin instance
///
/// Drives the same lifecycle a host would: layout negotiation, parameter
/// writes, `prepare_to_play`, one `process_block` per block, release.
pub fn render(options: &RenderOptions) -> Result<RenderSummary> {
    if options.block_size == 0 {
        return Err(DryWetError::InvalidConfig {
            reason: "block size must be at least 1".to_string(),
        });
    }

    info!(
        "Rendering {} -> {}",
        options.input.display(),
        options.output.display()
    );

    let mut audio = import_audio(&options.input)?;
    let channels = audio.num_channels();
    let frames = audio.num_samples();
    let layout = audio
        .channel_layout()
        .ok_or_else(|| DryWetError::UnsupportedFormat {
            format: format!("{}-channel audio", channels),
        })?;

    let mut plugin = create_plugin();
    plugin.set_buses_layout(BusesLayout::symmetric(layout))?;
    plugin.parameters().apply(&options.params)?;
    plugin.prepare_to_play(audio.sample_rate as f64, options.block_size);

    let input_peak_db = calculate_peak(&audio);
    let input_rms_db = calculate_rms(&audio);
    let mut block = AudioBuffer::with_channels(channels, options.block_size);
    block.sample_rate = audio.sample_rate;
    let mut blocks = 0;

    let mut start = 0;
    while start < frames {
        let len = options.block_size.min(frames - start);
        for (dst, src) in block.samples.iter_mut().zip(&audio.samples) {
            dst.clear();
            dst.extend_from_slice(&src[start..start + len]);
        }

        plugin.process_block(&mut block);

        for (dst, src) in audio.samples.iter_mut().zip(&block.samples) {
            dst[start..start + len].copy_from_slice(src);
        }
        start += len;
        blocks += 1;
    }

    let latency_samples = plugin.latency_samples();
    plugin.release_resources();
    debug!("Processed {} blocks of up to {} samples", blocks, options.block_size);

    export_audio(&audio, &options.output, options.format)?;

    Ok(RenderSummary {
        frames,
        channels,
        blocks,
        latency_samples,
        input_peak_db,
        output_peak_db: calculate_peak(&audio),
        input_rms_db,
        output_rms_db: calculate_rms(&audio),
    })
}

/// Print a render summary
pub fn print_summary(summary: &RenderSummary) {
    println!(
        "Rendered {} frames ({} ch) in {} blocks",
        summary.frames, summary.channels, summary.blocks
    );
    println!("Reported latency: {} sample(s)", summary.latency_samples);
    println!(
        "Peak: {:.2} dBFS -> {:.2} dBFS",
        summary.input_peak_db, summary.output_peak_db
    );
    println!(
        "RMS:  {:.2} dBFS -> {:.2} dBFS",
        summary.input_rms_db, summary.output_rms_db
    );
}

/// Parameter listing as pretty JSON
pub fn params_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&PARAMETERS)?)
}
