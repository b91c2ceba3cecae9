//! DSP Benchmarks
//!
//! Performance benchmarks for the signal chain and the plugin block path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use drywet::dsp::SignalChain;
use drywet::engine::{generate_test_tone, AudioBuffer};
use drywet::plugin::{create_plugin, MIX_ID, PREGAIN_ID};

fn stereo_tone(seconds: f32) -> AudioBuffer {
    let tone = generate_test_tone(440.0, seconds, 48000);
    AudioBuffer::from_channels(vec![tone.channel(0).to_vec(); 2], 48000).unwrap()
}

fn benchmark_signal_chain(c: &mut Criterion) {
    let mut buffer = stereo_tone(10.0);
    let mut chain = SignalChain::new();
    chain.prepare(48000.0, 512);

    c.bench_function("chain_10s_stereo_half_mix", |b| {
        b.iter(|| {
            chain.process(black_box(&mut buffer), 12.0, 0.5);
        })
    });
}

fn benchmark_process_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_block");

    for block_size in [64usize, 256, 1024] {
        let mut plugin = create_plugin();
        plugin.prepare_to_play(48000.0, block_size);
        plugin.parameters().set(PREGAIN_ID, 6.0).unwrap();
        plugin.parameters().set(MIX_ID, 0.5).unwrap();
        let mut block = AudioBuffer::with_channels(2, block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                b.iter(|| plugin.process_block(black_box(&mut block)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_signal_chain, benchmark_process_block);
criterion_main!(benches);
