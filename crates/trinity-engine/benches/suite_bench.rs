use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trinity_engine::heresy::Heresy;
use trinity_engine::runner::{emit_smtlib_scripts, run_base, run_heresy};
use trinity_smt::backends::z3_backend::Z3Solver;

fn bench_base_model(c: &mut Criterion) {
    c.bench_function("z3_base_model", |b| {
        b.iter(|| run_base(black_box(Z3Solver::new())).unwrap())
    });
}

fn bench_subordinationism(c: &mut Criterion) {
    c.bench_function("z3_subordinationism", |b| {
        b.iter(|| run_heresy(black_box(Z3Solver::new()), Heresy::Subordinationism).unwrap())
    });
}

fn bench_emit_scripts(c: &mut Criterion) {
    c.bench_function("emit_smtlib_scripts", |b| {
        b.iter(|| emit_smtlib_scripts().unwrap())
    });
}

criterion_group!(
    benches,
    bench_base_model,
    bench_subordinationism,
    bench_emit_scripts
);
criterion_main!(benches);
