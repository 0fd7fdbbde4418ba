//! Benchmarks for linear system extraction.
//!
//! Includes:
//! - Discretized double-integrator dynamics over a receding horizon
//! - Canonicalization of expanded products

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use smallvec::smallvec;

use symlin::prelude::*;

/// Builds `p_{k+1} = p_k + dt*v_k` and `v_{k+1} = v_k + dt*u_k` for
/// `k < horizon`, with every state after the first and every input unknown.
fn double_integrator(
    horizon: usize,
) -> (ExprArena, EqualityConstraintSystem<ExprHandle>, OrderedVariableSet) {
    let mut arena = ExprArena::new();
    let dt = arena.symbol("dt");
    let p: Vec<_> = (0..=horizon).map(|k| arena.symbol(&format!("p{k}"))).collect();
    let v: Vec<_> = (0..=horizon).map(|k| arena.symbol(&format!("v{k}"))).collect();
    let u: Vec<_> = (0..horizon).map(|k| arena.symbol(&format!("u{k}"))).collect();

    let mut system = EqualityConstraintSystem::new();
    for k in 0..horizon {
        let dp = arena.mul(smallvec![dt, v[k]]);
        let p_next = arena.add(smallvec![p[k], dp]);
        system.append_equation(p[k + 1], p_next);

        let dv = arena.mul(smallvec![dt, u[k]]);
        let v_next = arena.add(smallvec![v[k], dv]);
        system.append_equation(v[k + 1], v_next);
    }

    let unknowns = p[1..]
        .iter()
        .chain(&v[1..])
        .chain(&u)
        .filter_map(|&h| arena.as_symbol(h))
        .collect();

    (arena, system, unknowns)
}

fn bench_dynamics(c: &mut Criterion) {
    let mut group = c.benchmark_group("double_integrator");

    for horizon in [5, 20, 50] {
        let (arena, system, unknowns) = double_integrator(horizon);

        group.bench_with_input(BenchmarkId::new("extract", horizon), &horizon, |b, _| {
            b.iter_batched(
                || arena.clone(),
                |mut arena| {
                    let mut algebra = ExprConverter::new(&mut arena);
                    black_box(system.convert_to_linear_system(&mut algebra, &unknowns))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_canonical(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical");

    // (x + y + a)^n
    for n in [2, 4, 8] {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let a = arena.symbol("a");
        let sum = arena.add(smallvec![x, y, a]);
        let power = arena.powi(sum, n);

        group.bench_with_input(BenchmarkId::new("trinomial_power", n), &n, |b, _| {
            b.iter_batched(
                || arena.clone(),
                |mut arena| {
                    let mut conv = ExprConverter::new(&mut arena);
                    black_box(conv.canonical(power))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dynamics, bench_canonical);
criterion_main!(benches);
