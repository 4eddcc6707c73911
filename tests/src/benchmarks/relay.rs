//! # Relay Benchmarks
//!
//! - Append throughput on one channel
//! - Catch-up reads of a backlog
//! - Lazy channel lookup under many names

use std::sync::Arc;
use std::time::Duration;

use channel_relay::{ChannelLog, ChannelRegistry};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use serde_json::json;

/// Appending to a single log
pub fn bench_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay-append");

    let log = ChannelLog::new();
    let message = json!({"move": "e2e4", "turn": 1});
    group.throughput(Throughput::Elements(1));
    group.bench_function("append_single", |b| {
        b.iter(|| black_box(log.append(message.clone())))
    });

    group.finish();
}

/// Reading a backlog that is already available, so no waiting happens
pub fn bench_receive_backlog(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay-receive");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for size in [10usize, 100, 1_000] {
        let log = Arc::new(ChannelLog::new());
        for i in 0..size {
            log.append(json!(i));
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("receive_from_zero", size), &log, |b, log| {
            b.to_async(&runtime)
                .iter(|| async { black_box(log.receive_since(0, Duration::from_secs(3)).await) })
        });
    }

    group.finish();
}

/// Registry lookups of existing and new channel names
pub fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("relay-registry");

    let registry = ChannelRegistry::new();
    let names: Vec<String> = (0..1_000).map(|i| format!("channel-{i}")).collect();
    for name in &names {
        registry.get_or_create(name);
    }

    group.bench_function("lookup_existing", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % names.len();
            black_box(registry.get_or_create(&names[i]))
        })
    });

    group.bench_function("create_fresh", |b| {
        b.iter_with_setup(ChannelRegistry::new, |fresh| {
            black_box(fresh.get_or_create("new"));
        })
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_append(c);
    bench_receive_backlog(c);
    bench_registry(c);
}
