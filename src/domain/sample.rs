// ============================================================
// Layer 3 — Sample Domain Type
// ============================================================
// Represents one observation from the 2-D discrete distribution:
// an ordered pair (x0, x1) with both components in [0, d).
//
// The ordering matters because the model factorises the joint
// distribution autoregressively:
//
//   p(x0, x1) = p(x0) * p(x1 | x0)
//
// x0 is modelled unconditionally, x1 is modelled given x0.
// Swapping the components would give a different (equally
// valid) factorisation, but not the one this demo fits.
//
// Values outside [0, d) are a caller error — the scoring code
// does not defend against them.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// One ordered pair drawn from the synthetic distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// First component — modelled by the unconditional factor p(x0)
    pub x0: usize,

    /// Second component — modelled by the conditional factor p(x1 | x0)
    pub x1: usize,
}

impl Sample {
    /// Create a new Sample
    pub fn new(x0: usize, x1: usize) -> Self {
        Self { x0, x1 }
    }

    /// Returns true when both components lie in [0, d).
    /// Used by tests and by the data source's own sanity checks.
    pub fn in_range(&self, num_categories: usize) -> bool {
        self.x0 < num_categories && self.x1 < num_categories
    }
}
