//! Benchmarks for tweann-core.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tweann_core::{Genome, InnovationCounter};

/// Grow a genome with some structure for the mutation/evaluation benches.
fn grown_genome(rng: &mut ChaCha8Rng, innovations: &mut InnovationCounter) -> Genome {
    let mut genome = Genome::new(4, 2).expect("valid configuration");
    for _ in 0..40 {
        genome.add_link(rng, 1.0, innovations.allocate());
    }
    for _ in 0..10 {
        let (a, b) = (innovations.allocate(), innovations.allocate());
        genome.split_link(rng, a, b);
    }
    genome
}

fn bench_genome_creation(c: &mut Criterion) {
    c.bench_function("genome_new", |b| {
        b.iter(|| {
            black_box(Genome::new(4, 2).expect("valid configuration"));
        });
    });
}

fn bench_mutation(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut innovations = InnovationCounter::new();
    let genome = grown_genome(&mut rng, &mut innovations);

    c.bench_function("genome_mutation_cycle", |b| {
        let mut g = genome.clone();
        b.iter(|| {
            g.mutate_weight(&mut rng, 0.5);
            g.add_link(&mut rng, 1.0, innovations.allocate());
            g.toggle_link(&mut rng);
            g.remove_link(&mut rng);
            black_box(&g);
        });
    });
}

fn bench_evaluation(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut innovations = InnovationCounter::new();
    let mut genome = grown_genome(&mut rng, &mut innovations);
    genome.set_inputs(&[0.5, -0.5, 0.25, -0.25]);

    c.bench_function("genome_evaluate", |b| {
        b.iter(|| {
            black_box(genome.evaluate().ok());
        });
    });
}

criterion_group!(
    benches,
    bench_genome_creation,
    bench_mutation,
    bench_evaluation
);
criterion_main!(benches);
