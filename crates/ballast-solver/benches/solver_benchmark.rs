// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use ballast_model::instance::{Instance, InstanceBuilder};
use ballast_solver::scale::ScalePolicy;
use ballast_solver::solver::{SolveParams, SubsetSolver};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn build_instance(num_items: usize, max_weight: u64, seed: u64) -> Instance<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<u64> = (0..num_items)
        .map(|_| rng.random_range(1..=max_weight))
        .collect();
    let total: u64 = weights.iter().sum();

    InstanceBuilder::new(total / 2)
        .with_weights(&weights)
        .build()
        .expect("benchmark instance must be valid")
}

fn bench_subset_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("subset_solver");
    group.sample_size(10);

    // Cap the work per solve so the scaled configurations finish quickly;
    // the small configurations stay exact under this budget.
    let policy = ScalePolicy::new().with_default_ops_budget(50_000_000);

    for &(num_items, max_weight) in &[(100usize, 100u64), (1_000, 1_000), (5_000, 10_000)] {
        let instance = build_instance(num_items, max_weight, 42);
        let mut solver = SubsetSolver::new().with_scale_policy(policy);

        group.throughput(Throughput::Elements(num_items as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", num_items, max_weight)),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let outcome = solver
                        .solve(black_box(instance), &SolveParams::unbounded())
                        .expect("unbounded solve cannot fail");
                    black_box(outcome.solution().total_weight())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_subset_solver);
criterion_main!(benches);
