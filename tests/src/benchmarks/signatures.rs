//! # Signature Benchmarks
//!
//! Cost of one participant's signature and of verifying a full set.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};

use channel_signatures::{
    build_message, recover_address, verify_participant_signatures, ChannelId, ChannelMetadata,
    InMemoryWallet, Participant, SignatureCollector,
};

const GAME_ID: &str = "bench";
const CHANNEL: ChannelId = ChannelId::new([7; 32]);

/// Canonical message construction over growing payloads
pub fn bench_build_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("signatures-message");

    for size in [32usize, 1_024, 65_536] {
        let data = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("build_message", size), &data, |b, data| {
            b.iter(|| black_box(build_message(GAME_ID, CHANNEL.as_bytes(), b"epoch", "state", data)))
        });
    }

    group.finish();
}

/// Collecting and verifying signatures for N locally held participants
pub fn bench_collect_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("signatures-collect");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for participants in [2usize, 8] {
        let wallet = InMemoryWallet::new();
        let meta = ChannelMetadata {
            participants: (0..participants)
                .map(|i| Participant::new(format!("p{i}"), wallet.new_address()))
                .collect(),
            reinit: b"epoch".to_vec(),
        };
        let collector = SignatureCollector::new(wallet, GAME_ID);

        group.throughput(Throughput::Elements(participants as u64));
        group.bench_function(BenchmarkId::new("create_for_channel", participants), |b| {
            b.to_async(&runtime).iter(|| async {
                black_box(
                    collector
                        .create_for_channel(&CHANNEL, &meta, "state", b"payload")
                        .await,
                )
            })
        });

        let signed = runtime
            .block_on(collector.create_for_channel(&CHANNEL, &meta, "state", b"payload"))
            .unwrap();
        let verifier = InMemoryWallet::new();
        group.bench_function(BenchmarkId::new("verify", participants), |b| {
            b.to_async(&runtime).iter(|| async {
                black_box(
                    verify_participant_signatures(&verifier, GAME_ID, &CHANNEL, &meta, "state", &signed)
                        .await,
                )
            })
        });
    }

    group.finish();
}

/// Raw signer recovery on valid and malformed input
pub fn bench_recover(c: &mut Criterion) {
    let mut group = c.benchmark_group("signatures-recover");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let wallet = InMemoryWallet::new();
    let address = wallet.new_address();
    let meta = ChannelMetadata {
        participants: vec![Participant::new("solo", address)],
        reinit: Vec::new(),
    };
    let signed = runtime
        .block_on(SignatureCollector::new(wallet, GAME_ID).create_for_channel(
            &CHANNEL,
            &meta,
            "state",
            b"x",
        ))
        .unwrap();
    let msg = build_message(GAME_ID, CHANNEL.as_bytes(), b"", "state", b"x").unwrap();
    let sig = signed.signatures[0].clone();

    group.bench_function("recover_valid", |b| {
        b.iter(|| black_box(recover_address(&msg, &sig)))
    });
    group.bench_function("recover_garbage", |b| {
        let garbage = [0xffu8; 65];
        b.iter(|| black_box(recover_address(&msg, &garbage)))
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_build_message(c);
    bench_collect_and_verify(c);
    bench_recover(c);
}
