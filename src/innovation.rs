//! Innovation-number supply for evolutionary drivers.
//!
//! The genome engine stores innovation numbers as opaque data: structural
//! mutations take caller-supplied numbers, and the driver uses them to align
//! genomes during crossover. Allocation policy is therefore the driver's
//! concern. [`InnovationCounter`] is the minimal monotonic supply drivers
//! (and this crate's own tests) can hand to the mutation operators.

use serde::{Deserialize, Serialize};

/// A monotonic innovation-number counter.
///
/// One counter is typically shared across an entire population so that
/// structural changes introduced in the same generation are comparable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InnovationCounter {
    next: u64,
}

impl InnovationCounter {
    /// Create a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next innovation number.
    pub fn allocate(&mut self) -> u64 {
        let innovation = self.next;
        self.next += 1;
        innovation
    }

    /// The number the next call to [`allocate`](Self::allocate) will return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next
    }
}
