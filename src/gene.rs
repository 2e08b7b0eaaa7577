//! Genome building blocks.
//!
//! This module defines the two structural entities a genome is made of:
//! - [`Node`]: a computational unit with a role and an accumulated value
//! - [`Link`]: a directed, weighted, optionally-disabled edge between nodes
//!
//! Both are pure data; all behavior lives on [`crate::genome::Genome`].

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Arena key for a node within a genome.
    ///
    /// Uses SlotMap's generational indices for safe, cache-friendly storage.
    pub struct NodeId;

    /// Arena key for a link within a genome.
    pub struct LinkId;
}

/// The role of a node in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    /// Receives an externally written value; forwards it unactivated.
    /// The bias node is Input-tagged, with its value held at a constant.
    Input,
    /// Produces one entry of the network's output vector.
    Output,
    /// Internal node created by splitting a link.
    Hidden,
}

/// A node in the evolvable network.
///
/// Besides its arena key, every node carries a stable `id` assigned from the
/// owning genome's monotonic counter. Ids are unique within a genome and never
/// reused after removal, which gives evaluation a deterministic node order
/// independent of arena iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier, monotonically assigned by the owning genome.
    pub id: u64,
    /// The role of this node in the network.
    pub role: NodeRole,
    /// Accumulated value; reset and recomputed by every evaluation pass.
    pub value: f32,
}

impl Node {
    /// Create a node with a zeroed value.
    #[must_use]
    pub fn new(id: u64, role: NodeRole) -> Self {
        Self {
            id,
            role,
            value: 0.0,
        }
    }
}

/// A directed, weighted edge between two nodes.
///
/// A disabled link contributes nothing to evaluation but is retained in the
/// genome for potential re-enabling. The innovation number marks when a
/// structural change of this shape was first introduced; the genome engine
/// stores it as opaque data for the evolutionary driver's crossover alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Source node of this link.
    pub source: NodeId,
    /// Target node of this link. Never equal to `source`.
    pub target: NodeId,
    /// The link weight. Unbounded; no clamping is applied.
    pub weight: f32,
    /// Whether this link participates in evaluation.
    pub enabled: bool,
    /// Opaque historical marker supplied by the evolutionary driver.
    pub innovation: u64,
}

impl Link {
    /// Create a new enabled link.
    #[must_use]
    pub fn new(source: NodeId, target: NodeId, weight: f32, innovation: u64) -> Self {
        Self {
            source,
            target,
            weight,
            enabled: true,
            innovation,
        }
    }
}
