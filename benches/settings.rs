// benches/settings.rs
//! Settings vault: key schedule expansion and blob decryption

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ridicrypt_rs::aliases::DeviceSecret;
use ridicrypt_rs::crypto::rijndael::Rijndael;
use ridicrypt_rs::encryptor::seal_settings;
use ridicrypt_rs::{open_settings, Conformant, Generalized, KeySchedule};
use std::hint::black_box;

fn bench_schedules(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_schedule");
    let key = [0x5Cu8; 48];

    group.bench_function("conformant/32", |b| {
        b.iter(|| Conformant.expand(black_box(&key[..32])).unwrap())
    });
    for len in [32usize, 36, 48] {
        group.bench_with_input(BenchmarkId::new("generalized", len), &len, |b, &len| {
            b.iter(|| Generalized.expand(black_box(&key[..len])).unwrap())
        });
    }

    group.finish();
}

fn bench_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("rijndael_block");

    for len in [16usize, 32, 48] {
        let cipher = Rijndael::new(&Generalized, &vec![0x11u8; len]).unwrap();
        group.bench_with_input(BenchmarkId::new("decrypt", len), &cipher, |b, cipher| {
            let mut block = [0u8; 16];
            b.iter(|| cipher.decrypt_block(black_box(&mut block)))
        });
    }

    group.finish();
}

fn bench_open(c: &mut Criterion) {
    let secret = DeviceSecret::new("8a41b50d-8f56-472c-818a-fd3b0cb1f400".to_string());
    let mut json = String::from(r#"{"data":{"device":{"deviceId":"0f2c71e4-5b8a-4d3e-9a61-c2b7e5d40a18"}},"history":["#);
    for i in 0..200 {
        json.push_str(&format!("{i},"));
    }
    json.push_str("0]}");
    let blob = seal_settings(json.as_bytes(), &secret, &[0u8; 256]).unwrap();

    c.bench_function("open_settings", |b| {
        b.iter(|| open_settings(black_box(&blob), &secret).unwrap())
    });
}

criterion_group!(benches, bench_schedules, bench_block, bench_open);
criterion_main!(benches);
