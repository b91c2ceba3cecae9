//! Offline render tests
//!
//! WAV in, WAV out through the CLI render path.

use std::fs;

use tempfile::tempdir;

use drywet::cli::commands::{render, resolve_params, RenderOptions};
use drywet::dsp::soft_clip;
use drywet::engine::{export_audio, generate_test_tone, import_audio, AudioBuffer, ExportFormat};
use drywet::plugin::ParamSnapshot;

fn stereo_tone(sample_rate: u32) -> AudioBuffer {
    let left = generate_test_tone(330.0, 0.25, sample_rate);
    let right = generate_test_tone(550.0, 0.25, sample_rate);
    AudioBuffer::from_channels(
        vec![left.channel(0).to_vec(), right.channel(0).to_vec()],
        sample_rate,
    )
    .unwrap()
}

#[test]
fn test_render_fully_dry_reproduces_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");

    let original = stereo_tone(44100);
    export_audio(&original, &input, ExportFormat::new(32)).unwrap();

    let summary = render(&RenderOptions {
        input,
        output: output.clone(),
        params: ParamSnapshot {
            pre_gain_db: 30.0,
            mix: 0.0,
        },
        block_size: 256,
        format: ExportFormat::new(32),
    })
    .unwrap();
    assert_eq!(summary.output_rms_db, summary.input_rms_db);
    assert_eq!(summary.output_peak_db, summary.input_peak_db);

    let rendered = import_audio(&output).unwrap();
    assert_eq!(rendered, original);
}

#[test]
fn test_render_fully_wet_matches_waveshaper() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");

    let original = generate_test_tone(440.0, 0.25, 48000);
    export_audio(&original, &input, ExportFormat::new(32)).unwrap();

    let summary = render(&RenderOptions {
        input,
        output: output.clone(),
        params: ParamSnapshot {
            pre_gain_db: 0.0,
            mix: 1.0,
        },
        block_size: 100,
        format: ExportFormat::new(32),
    })
    .unwrap();
    assert_eq!(summary.channels, 1);
    assert_eq!(summary.frames, 12000);

    let rendered = import_audio(&output).unwrap();
    for (&x, &y) in original.channel(0).iter().zip(rendered.channel(0)) {
        assert_eq!(y, soft_clip(x));
    }
}

#[test]
fn test_render_with_preset_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let preset = dir.path().join("preset.json");

    export_audio(&stereo_tone(48000), &input, ExportFormat::new(24)).unwrap();
    fs::write(&preset, r#"{"pre_gain_db": 48.0, "mix": 1.0}"#).unwrap();

    let params = resolve_params(Some(&preset), None, None).unwrap();
    let summary = render(&RenderOptions {
        input,
        output,
        params,
        block_size: 512,
        format: ExportFormat::new(24),
    })
    .unwrap();

    // +48 dB drives the soft clipper close to, but never past, full scale
    assert!(summary.output_peak_db < 0.0);
    assert!(summary.output_peak_db > -0.1);
}

#[test]
fn test_render_missing_input() {
    let dir = tempdir().unwrap();
    let result = render(&RenderOptions {
        input: dir.path().join("missing.wav"),
        output: dir.path().join("out.wav"),
        params: ParamSnapshot::default(),
        block_size: 64,
        format: ExportFormat::default(),
    });
    assert_eq!(result.unwrap_err().error_code(), "FILE_NOT_FOUND");
}
