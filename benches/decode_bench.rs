//! Performance benchmarks for decoding and shape normalization

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stratum_decode::{decode, fix_shape, DecodeConfig, DecodedAudio};

/// 30 seconds of a 440 Hz tone as a 16-bit mono WAV file
fn wav_fixture() -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
    for i in 0..44100 * 30 {
        let s = (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 44100.0).sin() * 16000.0;
        writer.write_sample(s as i16).unwrap();
    }
    writer.finalize().unwrap();
    cursor.into_inner()
}

fn bench_decode(c: &mut Criterion) {
    let bytes = wav_fixture();
    let config = DecodeConfig::default();

    c.bench_function("decode_wav_30s", |b| {
        b.iter(|| {
            let _ = decode(black_box(&bytes), black_box(&config));
        });
    });
}

fn bench_fix_shape(c: &mut Criterion) {
    let mono = DecodedAudio::from_channels(vec![vec![1i16; 44100 * 30]], 44100).unwrap();
    let shape = DecodeConfig::default().with_channels(2).with_samples(44100 * 20).shape();

    c.bench_function("fix_shape_mono_to_stereo_truncate", |b| {
        b.iter(|| {
            let _ = fix_shape(black_box(mono.clone()), black_box(&shape));
        });
    });
}

criterion_group!(benches, bench_decode, bench_fix_shape);
criterion_main!(benches);
