use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linkrank::{sample_ranks, IterativeSolver, LinkGraph, PageRankConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random graph with `size` pages, up to 8 links each and roughly 5% dangling pages
fn random_graph(size: u64) -> LinkGraph<u64> {
    let mut rng = StdRng::seed_from_u64(size);
    let adjacency: Vec<(u64, Vec<u64>)> = (0..size)
        .map(|page| {
            let links = if rng.gen_bool(0.05) {
                Vec::new()
            } else {
                (0..rng.gen_range(1..=8)).map(|_| rng.gen_range(0..size)).collect()
            };
            (page, links)
        })
        .collect();
    LinkGraph::from_adjacency(adjacency).unwrap()
}

/// Benchmark the fixed-point solver, sequential vs parallel updates
fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate_ranks");

    for size in [100u64, 1_000, 10_000].iter() {
        let graph = random_graph(*size);
        for parallel in [false, true] {
            let solver = IterativeSolver::new(PageRankConfig {
                parallel,
                epsilon: 1e-6,
                ..PageRankConfig::default()
            });
            let id = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(id, size), &graph, |b, graph| {
                b.iter(|| black_box(solver.solve(graph).unwrap()));
            });
        }
    }
    group.finish();
}

/// Benchmark the random-surfer chain
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_ranks");
    group.sample_size(10);

    for size in [100u64, 1_000].iter() {
        let graph = random_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| black_box(sample_ranks(graph, 0.85, 10_000, &mut rng).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_iteration, bench_sampling);
criterion_main!(benches);
