// ============================================================
// Layer 4 — Synthetic Data Source
// ============================================================
// Draws (x0, x1) pairs from a fixed ground-truth distribution
// over the d × d grid.
//
// How the ground truth is built:
//   1. Place two Gaussian bumps on the grid (different centres
//      and widths, one weighted down so the modes are uneven)
//   2. Evaluate the unnormalised density at every cell
//   3. Sample flat cell indices with rand's WeightedIndex,
//      which normalises the weights internally
//   4. Map each flat index back to its (row, column) pair
//
// Why two bumps?
//   A single bump would make x0 and x1 nearly independent.
//   With two modes at different positions, knowing x0 tells
//   you which mode the sample came from, so p(x1 | x0) is
//   genuinely different from p(x1) — exactly the structure an
//   autoregressive model exists to capture.
//
// Reproducibility:
//   The RNG is a StdRng seeded from the config, so the same
//   seed always yields the same dataset. No thread_rng here.
//
// Reference: rand crate documentation (WeightedIndex)
//            Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::sample::Sample;
use crate::domain::traits::PairSource;

/// Samples a fixed two-mode distribution over the d × d grid.
pub struct SyntheticSource {
    /// Number of categories per component (grid side length)
    num_categories: usize,

    /// Total number of pairs to draw
    n_samples: usize,

    /// Seed for the sampling RNG
    seed: u64,
}

impl SyntheticSource {
    /// Create a new SyntheticSource
    pub fn new(num_categories: usize, n_samples: usize, seed: u64) -> Self {
        Self { num_categories, n_samples, seed }
    }

    /// Unnormalised ground-truth density at every grid cell,
    /// flattened row-major: index = x0 * d + x1.
    ///
    /// Two Gaussian bumps: a tight one in the lower-left region
    /// and a broader, lighter one in the upper-right.
    fn grid_weights(&self) -> Vec<f64> {
        let d = self.num_categories as f64;

        let bump = |i: f64, j: f64, ci: f64, cj: f64, sigma: f64| -> f64 {
            let di = i - ci;
            let dj = j - cj;
            (-(di * di + dj * dj) / (2.0 * sigma * sigma)).exp()
        };

        let mut weights = Vec::with_capacity(self.num_categories * self.num_categories);
        for x0 in 0..self.num_categories {
            for x1 in 0..self.num_categories {
                let i = x0 as f64;
                let j = x1 as f64;
                let w = bump(i, j, 0.25 * d, 0.30 * d, d / 9.0)
                    + 0.6 * bump(i, j, 0.70 * d, 0.65 * d, d / 6.0);
                weights.push(w);
            }
        }
        weights
    }
}

impl PairSource for SyntheticSource {
    fn generate(&self) -> Result<Vec<Sample>> {
        let d       = self.num_categories;
        let weights = self.grid_weights();

        // WeightedIndex normalises internally; it errors only on
        // empty, negative, or all-zero weights.
        let cell = WeightedIndex::new(&weights)?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let samples: Vec<Sample> = (0..self.n_samples)
            .map(|_| {
                let flat = cell.sample(&mut rng);
                Sample::new(flat / d, flat % d)
            })
            .collect();

        tracing::debug!(
            "Sampled {} pairs over a {}x{} grid (seed {})",
            samples.len(), d, d, self.seed,
        );
        Ok(samples)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_in_range() {
        let source  = SyntheticSource::new(25, 1_000, 7);
        let samples = source.generate().unwrap();
        assert_eq!(samples.len(), 1_000);
        assert!(samples.iter().all(|s| s.in_range(25)));
    }

    #[test]
    fn test_same_seed_same_data() {
        let a = SyntheticSource::new(10, 200, 42).generate().unwrap();
        let b = SyntheticSource::new(10, 200, 42).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = SyntheticSource::new(10, 200, 1).generate().unwrap();
        let b = SyntheticSource::new(10, 200, 2).generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_both_modes_represented() {
        // With enough samples, both bumps should contribute:
        // some samples land below the grid midpoint, some above.
        let samples = SyntheticSource::new(20, 2_000, 3).generate().unwrap();
        let low  = samples.iter().filter(|s| s.x0 < 10).count();
        let high = samples.iter().filter(|s| s.x0 >= 10).count();
        assert!(low > 0, "lower mode produced no samples");
        assert!(high > 0, "upper mode produced no samples");
    }
}
