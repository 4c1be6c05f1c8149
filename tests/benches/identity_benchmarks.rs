//! # Prime-Resonance Benchmarks
//!
//! | Operation | Path | Target |
//! |-----------|------|--------|
//! | `hash_to_state` | seed → private state | < 50µs at 64 primes |
//! | `coherence` | every received payload | < 10µs at 64 primes |
//! | `evolve` | every publication | < 50µs at 64 primes |
//! | `generate` | identity creation | < 1ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pr_identity::{PendingIdentity, PublicResonanceState, ResonanceParams};
use pr_math::{hash_to_state, Kappa};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

const BASIS_SIZES: [usize; 4] = [16, 64, 256, 1024];

fn bench_hash_to_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("pr-math-hash-to-state");
    for size in BASIS_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(hash_to_state("G1:seed1:agentA", size)))
        });
    }
    group.finish();
}

fn bench_coherence(c: &mut Criterion) {
    let mut group = c.benchmark_group("pr-math-coherence");
    for size in BASIS_SIZES {
        let a = hash_to_state("a", size);
        let b_state = hash_to_state("b", size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(a.coherence(&b_state)))
        });
    }
    group.finish();
}

fn bench_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("pr-math-evolve");
    let kappa = Kappa::default();
    for size in BASIS_SIZES {
        let state = hash_to_state("evolve", size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(state.evolve(1.5, kappa)))
        });
    }
    group.finish();
}

fn bench_payload_decode(c: &mut Criterion) {
    let state = hash_to_state("decode", 64);
    let mut rng = StdRng::seed_from_u64(1);
    let payload = serde_json::to_string(
        &state
            .project_with(&mut rng, &BTreeMap::new())
            .to_amplitude_map(),
    )
    .unwrap_or_default();

    c.bench_function("pr-identity-decode-payload-64", |b| {
        b.iter(|| black_box(PublicResonanceState::from_json(&payload).is_ok()))
    });
}

fn bench_generate(c: &mut Criterion) {
    let params = ResonanceParams::default();
    let mut rng = StdRng::seed_from_u64(2);

    c.bench_function("pr-identity-generate-64", |b| {
        b.iter(|| {
            let triplet = PendingIdentity::new("agentA").generate(
                Some("seed1"),
                "G1",
                &params,
                &mut rng,
                0,
            );
            black_box(triplet.public_key_hex())
        })
    });
}

criterion_group!(
    benches,
    bench_hash_to_state,
    bench_coherence,
    bench_evolve,
    bench_payload_decode,
    bench_generate
);
criterion_main!(benches);
