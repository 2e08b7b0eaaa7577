//! XOR demo: a minimal external driver for the genome engine.
//!
//! A (1+1)-style hill climber evolves a genome to solve XOR. The driver owns
//! everything the engine does not: the innovation supply, the fitness
//! function, and the policy for genomes whose mutations produced a cycle
//! (here: discard the candidate).
//!
//! Run with: `cargo run --example xor`

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tweann_core::{Genome, InnovationCounter};

const CASES: [([f32; 2], f32); 4] = [
    ([0.0, 0.0], 0.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 0.0], 1.0),
    ([1.0, 1.0], 0.0),
];

/// Sum of squared errors over the XOR truth table, or `None` when the
/// genome's active links form a cycle.
fn xor_error(genome: &mut Genome) -> Option<f32> {
    let mut total = 0.0;
    for (inputs, expected) in &CASES {
        genome.set_inputs(inputs);
        let outputs = genome.evaluate().ok()?;
        // Outputs live in (-1, 1); map onto (0, 1) for the truth table.
        let value = 0.5 * (outputs[0] + 1.0);
        total += (value - expected).powi(2);
    }
    Some(total)
}

fn mutate_once(genome: &mut Genome, rng: &mut ChaCha8Rng, innovations: &mut InnovationCounter) {
    match rng.random_range(0..8) {
        0 => {
            genome.add_link(rng, 1.0, innovations.allocate());
        }
        1 => {
            let (a, b) = (innovations.allocate(), innovations.allocate());
            genome.split_link(rng, a, b);
        }
        2 => genome.toggle_link(rng),
        3 => genome.remove_link(rng),
        // Weight perturbation dominates, as in most TWEANN schedules.
        _ => genome.mutate_weight(rng, 0.5),
    }
}

fn main() {
    println!("TWEANN XOR demo");
    println!("===============\n");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut innovations = InnovationCounter::new();

    let mut champion = Genome::new(2, 1).expect("valid configuration");
    let output = champion.output_ids()[0];
    let inputs = champion.input_ids().to_vec();
    for input in inputs {
        champion.connect(input, output, 0.0, innovations.allocate());
    }
    champion.connect(champion.bias_id(), output, 0.0, innovations.allocate());

    let mut best_error = xor_error(&mut champion).expect("initial genome is acyclic");
    println!("generation 0: error {best_error:.4}");

    for generation in 1..=5_000 {
        let mut candidate = champion.clone();
        mutate_once(&mut candidate, &mut rng, &mut innovations);

        // Cyclic candidates are simply discarded; the engine flags them at
        // evaluation time rather than forbidding them at mutation time.
        if let Some(error) = xor_error(&mut candidate) {
            if error < best_error {
                best_error = error;
                champion = candidate;
                println!(
                    "generation {generation}: error {best_error:.4} ({} nodes, {} links)",
                    champion.node_count(),
                    champion.link_count()
                );
            }
        }

        if best_error < 0.01 {
            println!("\nsolved at generation {generation}");
            break;
        }
    }

    println!("\nfinal error: {best_error:.4}");
    for (inputs, expected) in &CASES {
        champion.set_inputs(inputs);
        let outputs = champion.evaluate().expect("champion is acyclic");
        let value = 0.5 * (outputs[0] + 1.0);
        println!("  {inputs:?} -> {value:.3} (expected {expected})");
    }
}
