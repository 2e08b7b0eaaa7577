//! Feed-forward evaluation by Kahn-style layer peeling.
//!
//! Evaluation derives a dependency order over the enabled-link subgraph:
//! nodes with no unresolved incoming enabled link are peeled first, their
//! outgoing contributions propagated, and newly-resolved nodes peeled in
//! following rounds until every enabled link has been consumed. An explicit
//! progress check turns a stuck peel (a cycle among enabled links) into
//! [`EvalError::CyclicTopology`] instead of an unbounded loop.
//!
//! ## Activation ordering
//!
//! The activation function is applied at the *source* side, per link: the
//! signal a node forwards across each outgoing link is `tanh` of its
//! accumulated value, and the same rule governs reading output nodes.
//! Input-tagged nodes (including the bias node) forward their raw value
//! unactivated. This choice is fixed here and tested against; it is not
//! numerically equivalent to summing first and activating once.
//!
//! ## Determinism
//!
//! Nodes are indexed in stable-id order and each node's outgoing links are
//! processed in ascending innovation order, so equivalent genomes produce
//! bit-identical floating-point sums regardless of arena iteration order.
//! This matters because floating-point addition is not associative.

use std::collections::VecDeque;

use crate::activation;
use crate::gene::{Node, NodeId, NodeRole};
use crate::genome::Genome;

/// Error type for evaluation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The enabled-link subgraph contains a cycle.
    ///
    /// Mutation does not prevent cycles (notably `add_link`); they are
    /// detected here instead. The genome remains intact and usable; the
    /// driver may discard, repair, or re-mutate it.
    CyclicTopology,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::CyclicTopology => {
                write!(
                    f,
                    "enabled links form a cycle; feed-forward evaluation requires an acyclic active subgraph"
                )
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// The value a node presents to its consumers: raw for Input-tagged nodes,
/// `tanh` of the accumulated sum otherwise.
#[inline]
fn signal(node: &Node) -> f32 {
    match node.role {
        NodeRole::Input => node.value,
        NodeRole::Output | NodeRole::Hidden => activation::tanh(node.value),
    }
}

impl Genome {
    /// Evaluate the network and return the output values, one per output
    /// node, in output-node creation order.
    ///
    /// Input values must have been written beforehand via
    /// [`set_inputs`](Genome::set_inputs); the bias node is held at 1.0. All
    /// non-input node values are zeroed before propagation begins, so stale
    /// accumulations from a previous pass never leak forward. Links that
    /// target an Input-tagged node (the bias included) participate in the
    /// dependency order but contribute no value; inputs and the bias always
    /// present exactly what the driver set.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::CyclicTopology`] if the enabled-link subgraph
    /// contains a cycle. The genome is left intact.
    pub fn evaluate(&mut self) -> Result<Vec<f32>, EvalError> {
        for (_, node) in &mut self.nodes {
            if node.role != NodeRole::Input {
                node.value = 0.0;
            }
        }
        self.nodes[self.bias_id].value = 1.0;

        // Dense indexing in stable-id order for the scratch vectors.
        let mut node_ids: Vec<NodeId> = self.nodes.keys().collect();
        node_ids.sort_by_key(|&id| self.nodes[id].id);
        let index_of: std::collections::HashMap<NodeId, usize> = node_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        // Adjacency over enabled links only. Endpoints always resolve: node
        // removal drops incident links in the same operation.
        let mut outgoing: Vec<Vec<(usize, f32, u64)>> = vec![Vec::new(); node_ids.len()];
        let mut in_degree = vec![0usize; node_ids.len()];
        let mut remaining_links = 0usize;
        for (_, link) in &self.links {
            if !link.enabled {
                continue;
            }
            let source = index_of[&link.source];
            let target = index_of[&link.target];
            outgoing[source].push((target, link.weight, link.innovation));
            in_degree[target] += 1;
            remaining_links += 1;
        }
        for edges in &mut outgoing {
            edges.sort_by_key(|&(_, _, innovation)| innovation);
        }

        // Kahn peeling. The queue draining while enabled links remain
        // unconsumed is the no-progress condition: a cycle.
        let mut queue: VecDeque<usize> = (0..node_ids.len())
            .filter(|&idx| in_degree[idx] == 0)
            .collect();
        while let Some(current) = queue.pop_front() {
            let forwarded = signal(&self.nodes[node_ids[current]]);
            for &(target, weight, _) in &outgoing[current] {
                // Input-tagged targets keep their driver-set value (and the
                // bias its constant); the edge still counts for ordering.
                let target_node = &mut self.nodes[node_ids[target]];
                if target_node.role != NodeRole::Input {
                    target_node.value += forwarded * weight;
                }
                remaining_links -= 1;
                in_degree[target] -= 1;
                if in_degree[target] == 0 {
                    queue.push_back(target);
                }
            }
        }
        if remaining_links > 0 {
            return Err(EvalError::CyclicTopology);
        }

        Ok(self
            .output_ids
            .iter()
            .map(|&id| signal(&self.nodes[id]))
            .collect())
    }
}
