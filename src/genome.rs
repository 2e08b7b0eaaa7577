//! The evolvable genome: arena-stored nodes and links, plus the mutation
//! operators an external evolutionary driver applies between evaluations.
//!
//! The [`Genome`] uses SlotMap-based arena storage for nodes and links,
//! providing cache-friendly access, trivial serialization, and one-pass link
//! filtering on node removal. Innovation numbers are supplied by the caller
//! per structural mutation and stored as opaque data.

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::gene::{Link, LinkId, Node, NodeId, NodeRole};

/// Resample budget for [`Genome::add_link`]. Bounds the rejection loop so the
/// operator terminates even when the genome has too few eligible node pairs.
const ADD_LINK_ATTEMPTS: usize = 32;

/// Error type for genome construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenomeError {
    /// The genome was configured with zero output nodes.
    ///
    /// A genome with no outputs cannot produce a result; at least one output
    /// node is required.
    InvalidConfiguration,
}

impl std::fmt::Display for GenomeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenomeError::InvalidConfiguration => {
                write!(f, "a genome requires at least one output node")
            }
        }
    }
}

impl std::error::Error for GenomeError {}

/// An evolvable feed-forward decision network.
///
/// Nodes and links live in arena storage and are accessed exclusively through
/// the genome's own operations: the six mutation operators, input writing,
/// evaluation ([`Genome::evaluate`]), and read-only introspection for the
/// driver's crossover/speciation logic.
///
/// A genome is a plain mutable value with no internal locking; concurrent
/// mutation and evaluation of the same instance is not supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome {
    pub(crate) nodes: SlotMap<NodeId, Node>,
    pub(crate) links: SlotMap<LinkId, Link>,
    /// Input node keys in creation order.
    pub(crate) input_ids: Vec<NodeId>,
    /// Output node keys in creation order.
    pub(crate) output_ids: Vec<NodeId>,
    /// The Input-tagged constant-bias node.
    pub(crate) bias_id: NodeId,
    /// Monotonic counter for stable node ids. Never decremented; removed ids
    /// are never reused.
    next_node_id: u64,
    input_count: usize,
    output_count: usize,
}

impl Genome {
    /// Create a genome with `input_count` input nodes, `output_count` output
    /// nodes, one Input-tagged bias node, and no links.
    ///
    /// Stable ids are assigned in creation order: bias first (id 0), then
    /// inputs, then outputs.
    ///
    /// # Errors
    ///
    /// Returns [`GenomeError::InvalidConfiguration`] if `output_count` is zero.
    pub fn new(input_count: usize, output_count: usize) -> Result<Self, GenomeError> {
        if output_count == 0 {
            return Err(GenomeError::InvalidConfiguration);
        }

        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let mut next_node_id = 0u64;
        let mut alloc = |nodes: &mut SlotMap<NodeId, Node>, role: NodeRole| {
            let id = next_node_id;
            next_node_id += 1;
            nodes.insert(Node::new(id, role))
        };

        let bias_id = alloc(&mut nodes, NodeRole::Input);
        nodes[bias_id].value = 1.0;

        let input_ids: Vec<NodeId> = (0..input_count)
            .map(|_| alloc(&mut nodes, NodeRole::Input))
            .collect();
        let output_ids: Vec<NodeId> = (0..output_count)
            .map(|_| alloc(&mut nodes, NodeRole::Output))
            .collect();

        Ok(Self {
            nodes,
            links: SlotMap::with_key(),
            input_ids,
            output_ids,
            bias_id,
            next_node_id,
            input_count,
            output_count,
        })
    }

    /// Write externally supplied input values, in input-node creation order.
    ///
    /// The bias node is not written here; evaluation holds it at its constant.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` doesn't match the genome's input count.
    pub fn set_inputs(&mut self, values: &[f32]) {
        assert_eq!(
            values.len(),
            self.input_count,
            "input length mismatch: expected {}, got {}",
            self.input_count,
            values.len()
        );
        for (&id, &value) in self.input_ids.iter().zip(values) {
            self.nodes[id].value = value;
        }
    }

    /// Insert a link between two specific nodes.
    ///
    /// This is the structural primitive underneath the random
    /// [`add_link`](Self::add_link) operator; drivers can also use it directly
    /// when reassembling genomes during crossover. Duplicate source/target
    /// pairs are permitted; deduplication is the driver's policy. No cycle
    /// prevention is done here: cycles are detected lazily at evaluation time.
    ///
    /// Returns `None` without modifying the genome if either node doesn't
    /// exist, the nodes are identical, or both are Input-tagged or both are
    /// Output-tagged.
    pub fn connect(
        &mut self,
        source: NodeId,
        target: NodeId,
        weight: f32,
        innovation: u64,
    ) -> Option<LinkId> {
        if source == target {
            return None;
        }
        let source_role = self.nodes.get(source)?.role;
        let target_role = self.nodes.get(target)?.role;
        if source_role == NodeRole::Input && target_role == NodeRole::Input {
            return None;
        }
        if source_role == NodeRole::Output && target_role == NodeRole::Output {
            return None;
        }

        let link_id = self.links.insert(Link::new(source, target, weight, innovation));
        trace!(
            "link {} -> {} (weight {weight}, innovation {innovation})",
            self.nodes[source].id,
            self.nodes[target].id
        );
        Some(link_id)
    }

    /// Mutation: perturb one uniformly chosen link's weight by a value drawn
    /// from `[-learning_rate, +learning_rate]`.
    ///
    /// Weights are unbounded; no clamping is applied. No-op when the genome
    /// has no links. A zero draw leaves the stored weight bits untouched, so
    /// a `-0.0` weight is never rewritten to `+0.0`.
    pub fn mutate_weight<R: Rng>(&mut self, rng: &mut R, learning_rate: f32) {
        let Some(link_id) = self.random_link(rng) else {
            return;
        };
        let delta = rng.random_range(-learning_rate..=learning_rate);
        if delta == 0.0 {
            return;
        }
        self.links[link_id].weight += delta;
    }

    /// Mutation: add a link between two uniformly chosen distinct nodes.
    ///
    /// Draws are rejected when both nodes are Input-tagged (the bias node
    /// counts as an input), both are Output-tagged, or the two are identical;
    /// the resample loop is bounded so the operator terminates even when no
    /// eligible pair exists. The new link is enabled, with a weight drawn from
    /// `[-learning_rate, +learning_rate]` and the caller-supplied innovation.
    ///
    /// Returns the new link's key, or `None` when the resample budget was
    /// exhausted without finding a valid pair.
    pub fn add_link<R: Rng>(
        &mut self,
        rng: &mut R,
        learning_rate: f32,
        innovation: u64,
    ) -> Option<LinkId> {
        let ids: Vec<NodeId> = self.nodes.keys().collect();
        if ids.len() < 2 {
            return None;
        }

        for _ in 0..ADD_LINK_ATTEMPTS {
            let source = ids[rng.random_range(0..ids.len())];
            let target = ids[rng.random_range(0..ids.len())];
            let weight = rng.random_range(-learning_rate..=learning_rate);
            if let Some(link_id) = self.connect(source, target, weight, innovation) {
                return Some(link_id);
            }
        }
        None
    }

    /// Mutation: split one uniformly chosen *enabled* link with a new hidden
    /// node.
    ///
    /// The chosen link is removed and replaced by two enabled links through a
    /// fresh hidden node: `source -> hidden` with weight 1.0 and innovation
    /// `innovation_a`, and `hidden -> target` with the original weight and
    /// innovation `innovation_b`. The identity-weighted first edge keeps the
    /// net transfer approximately intact; exact equivalence is not preserved
    /// once the hidden node's non-linearity applies, which is a property of
    /// this mutation rather than a defect.
    ///
    /// Returns the new hidden node's key, or `None` when the genome has no
    /// enabled links.
    pub fn split_link<R: Rng>(
        &mut self,
        rng: &mut R,
        innovation_a: u64,
        innovation_b: u64,
    ) -> Option<NodeId> {
        let enabled: Vec<LinkId> = self
            .links
            .iter()
            .filter(|(_, link)| link.enabled)
            .map(|(id, _)| id)
            .collect();
        if enabled.is_empty() {
            return None;
        }

        let link_id = enabled[rng.random_range(0..enabled.len())];
        let removed = self.links.remove(link_id)?;

        let hidden = self.new_node(NodeRole::Hidden);
        self.links
            .insert(Link::new(removed.source, hidden, 1.0, innovation_a));
        self.links
            .insert(Link::new(hidden, removed.target, removed.weight, innovation_b));

        debug!(
            "split link {} -> {} through hidden node {}",
            self.nodes[removed.source].id,
            self.nodes[removed.target].id,
            self.nodes[hidden].id
        );
        Some(hidden)
    }

    /// Mutation: set one uniformly chosen link's enabled flag from a fair
    /// two-outcome draw. Both states are reachable with equal probability.
    ///
    /// No-op when the genome has no links.
    pub fn toggle_link<R: Rng>(&mut self, rng: &mut R) {
        let Some(link_id) = self.random_link(rng) else {
            return;
        };
        self.links[link_id].enabled = rng.random::<bool>();
    }

    /// Mutation: remove one uniformly chosen hidden node.
    ///
    /// Every link whose source or target is the removed node is dropped in
    /// the same operation, so link endpoints always reference live nodes.
    /// Input, output, and bias nodes are never candidates; the draw is
    /// restricted to hidden nodes. No-op when no hidden nodes exist.
    pub fn remove_hidden_node<R: Rng>(&mut self, rng: &mut R) {
        let hidden = self.hidden_ids();
        if hidden.is_empty() {
            return;
        }

        let node_id = hidden[rng.random_range(0..hidden.len())];
        let stable_id = self.nodes[node_id].id;
        self.nodes.remove(node_id);
        self.links
            .retain(|_, link| link.source != node_id && link.target != node_id);
        debug!("removed hidden node {stable_id}");
    }

    /// Mutation: remove one uniformly chosen link.
    ///
    /// No-op when the genome has no links.
    pub fn remove_link<R: Rng>(&mut self, rng: &mut R) {
        if let Some(link_id) = self.random_link(rng) {
            self.links.remove(link_id);
        }
    }

    /// Number of nodes, including the bias node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links, enabled or not.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Number of enabled links.
    #[must_use]
    pub fn enabled_link_count(&self) -> usize {
        self.links.iter().filter(|(_, link)| link.enabled).count()
    }

    /// Number of input nodes, excluding the bias node.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of output nodes.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Input node keys in creation order.
    #[must_use]
    pub fn input_ids(&self) -> &[NodeId] {
        &self.input_ids
    }

    /// Output node keys in creation order.
    #[must_use]
    pub fn output_ids(&self) -> &[NodeId] {
        &self.output_ids
    }

    /// Key of the constant-bias node.
    #[must_use]
    pub fn bias_id(&self) -> NodeId {
        self.bias_id
    }

    /// All hidden node keys.
    #[must_use]
    pub fn hidden_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.role == NodeRole::Hidden)
            .map(|(id, _)| id)
            .collect()
    }

    /// Look up a node by key.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a link by key.
    #[must_use]
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Iterate over all links, for the driver's crossover/speciation logic.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> {
        self.links.iter()
    }

    /// Insert a node with the next stable id.
    fn new_node(&mut self, role: NodeRole) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;
        self.nodes.insert(Node::new(id, role))
    }

    /// Pick one link uniformly at random, or `None` when there are none.
    fn random_link<R: Rng>(&self, rng: &mut R) -> Option<LinkId> {
        if self.links.is_empty() {
            return None;
        }
        let ids: Vec<LinkId> = self.links.keys().collect();
        Some(ids[rng.random_range(0..ids.len())])
    }
}
