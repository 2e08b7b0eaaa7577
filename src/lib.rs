//! # tweann-core
//!
//! The genome engine for a topology-and-weight-evolving neural network
//! (TWEANN/NEAT-family) system: an evolvable graph of nodes and weighted
//! links, the mutation operators that transform it, and a deterministic
//! feed-forward evaluation over the enabled-link subgraph.
//!
//! ## Features
//!
//! - **Arena-Graph Model**: cache-friendly `SlotMap` storage for nodes and
//!   links, with stable monotonic node ids that are never reused
//! - **Six Mutation Operators**: weight perturbation, add link, split link,
//!   toggle enabled, remove hidden node, remove link: all in place, all
//!   no-ops on empty eligible sets
//! - **Kahn-Style Evaluation**: layer peeling over enabled links with lazy
//!   cycle detection ([`EvalError::CyclicTopology`]) instead of cycle
//!   prevention at mutation time
//! - **Opaque Innovations**: structural mutations take caller-supplied
//!   innovation numbers; [`InnovationCounter`] is provided for drivers
//!
//! The population-level loop (selection, speciation, crossover), embodiment,
//! and fitness computation are external collaborators; this crate only
//! defines the genome and its operations.
//!
//! ## Quick Start
//!
//! ```rust
//! use tweann_core::{Genome, InnovationCounter};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut innovations = InnovationCounter::new();
//!
//! // 2 inputs, 1 output, plus an implicit constant-bias node.
//! let mut genome = Genome::new(2, 1).unwrap();
//! genome.add_link(&mut rng, 1.0, innovations.allocate());
//!
//! genome.set_inputs(&[0.5, -0.5]);
//! let outputs = genome.evaluate().unwrap();
//! assert_eq!(outputs.len(), 1);
//! ```
//!
//! ## Contract with the evolutionary driver
//!
//! The driver owns randomness seeds, the innovation supply, and the fitness
//! signal. Each genome instance must be exclusively owned by the task
//! evaluating it: the engine is single-threaded and provides no locking.
//! Evaluation may fail with a cycle error because `add_link` deliberately
//! permits cyclic draws; the driver decides whether to discard, repair, or
//! re-mutate such a genome.

pub mod activation;
pub mod eval;
pub mod gene;
pub mod genome;
pub mod innovation;

// Re-exports for convenience
pub use eval::EvalError;
pub use gene::{Link, LinkId, Node, NodeId, NodeRole};
pub use genome::{Genome, GenomeError};
pub use innovation::InnovationCounter;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_mutate_and_evaluate_smoke() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut innovations = InnovationCounter::new();
        let mut genome = Genome::new(3, 2).unwrap();

        for _ in 0..50 {
            genome.add_link(&mut rng, 1.0, innovations.allocate());
            genome.mutate_weight(&mut rng, 0.5);
            let (a, b) = (innovations.allocate(), innovations.allocate());
            genome.split_link(&mut rng, a, b);
            genome.toggle_link(&mut rng);
        }

        genome.set_inputs(&[0.1, 0.2, 0.3]);
        match genome.evaluate() {
            Ok(outputs) => {
                assert_eq!(outputs.len(), 2);
                for value in outputs {
                    assert!(value.is_finite());
                }
            }
            // add_link permits cycles by design; the error is the contract.
            Err(EvalError::CyclicTopology) => {}
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let mut innovations = InnovationCounter::new();
        let mut genome = Genome::new(2, 1).unwrap();

        genome.add_link(&mut rng, 1.0, innovations.allocate());
        let (a, b) = (innovations.allocate(), innovations.allocate());
        genome.split_link(&mut rng, a, b);

        let json = serde_json::to_string(&genome).expect("serialization failed");
        let restored: Genome = serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(genome.node_count(), restored.node_count());
        assert_eq!(genome.link_count(), restored.link_count());
        assert_eq!(genome.input_count(), restored.input_count());
        assert_eq!(genome.output_count(), restored.output_count());
    }
}
