/// Criterion benchmarks.
///
/// Covers:
///   - Gate kernels on the 18-qubit Shor register
///   - Circuit construction per scheme
///   - Exact simulation of one clean circuit per scheme
///   - Full exhaustive sweeps of the smaller schemes
use bell_qec::core::Simulator;
use bell_qec::runtime::{self, CancelToken, ExperimentConfig};
use bell_qec::{CorrectionScheme, ErrorAssignment, RunMode};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ── Gate kernels ──────────────────────────────────────────────────────────

fn bench_kernels_18qubits(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernels_18qubits");
    group.bench_function("H", |b| {
        let mut sim = Simulator::new(18);
        b.iter(|| sim.h(black_box(9)).num_qubits());
    });
    group.bench_function("CNOT", |b| {
        let mut sim = Simulator::new(18);
        sim.h(0);
        b.iter(|| sim.cnot(black_box(0), black_box(17)).num_qubits());
    });
    group.bench_function("CCX", |b| {
        let mut sim = Simulator::new(18);
        sim.h(0).h(1);
        b.iter(|| sim.toffoli(black_box(0), black_box(1), black_box(17)).num_qubits());
    });
    group.finish();
}

// ── Circuits ──────────────────────────────────────────────────────────────

fn bench_circuit_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_construction");
    let clean = ErrorAssignment::identity();
    for scheme in CorrectionScheme::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(scheme), &scheme, |b, scheme| {
            b.iter(|| scheme.circuit(black_box(&clean)));
        });
    }
    group.finish();
}

fn bench_execute_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute_clean");
    let clean = ErrorAssignment::identity();
    for scheme in CorrectionScheme::ALL {
        let circuit = match scheme.circuit(&clean) {
            Ok(circuit) => circuit,
            Err(e) => panic!("{scheme}: {e}"),
        };
        group.bench_with_input(BenchmarkId::from_parameter(scheme), &circuit, |b, circuit| {
            b.iter(|| Simulator::execute(black_box(circuit)));
        });
    }
    group.finish();
}

// ── Sweeps ────────────────────────────────────────────────────────────────

fn bench_exhaustive_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("exhaustive_sweep");
    group.sample_size(10);
    for scheme in [CorrectionScheme::NoCorrection, CorrectionScheme::SimpleParity, CorrectionScheme::Repetition] {
        let config = ExperimentConfig::new(scheme, RunMode::Exhaustive).with_seed(1);
        group.bench_with_input(BenchmarkId::from_parameter(scheme), &config, |b, config| {
            b.iter(|| runtime::run(black_box(config), &CancelToken::new()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_kernels_18qubits,
    bench_circuit_construction,
    bench_execute_clean,
    bench_exhaustive_sweep,
);
criterion_main!(benches);
