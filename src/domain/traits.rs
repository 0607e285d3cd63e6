// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - SyntheticSource implements PairSource
//   - A future FileSource could also implement PairSource
//   - The application layer only sees PairSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// (The model-side abstraction, DensityModel, lives in Layer 5
// because its signature needs Burn tensor types.)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use crate::domain::sample::Sample;

// ─── PairSource ───────────────────────────────────────────────────────────────
/// Any component that can produce a dataset of (x0, x1) pairs.
///
/// Implementations:
///   - SyntheticSource → samples a fixed ground-truth distribution
///   - (future) FileSource → reads recorded pairs from disk
pub trait PairSource {
    /// Produce the full dataset of pairs.
    /// Every returned Sample must have both components in [0, d).
    fn generate(&self) -> Result<Vec<Sample>>;
}
