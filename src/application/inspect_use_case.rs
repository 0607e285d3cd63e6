// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// A short workflow for looking at the synthetic data before
// committing to a training run:
//
//   Step 1: Sample n pairs from the ground-truth distribution
//   Step 2: Render the count grid as a heatmap
//
// Useful for checking that the seed produces the expected
// dataset and that the two modes of the ground truth are
// where you think they are.
//
// Reference: Rust Book §7 (Module System)

use anyhow::Result;

use crate::data::synthetic::SyntheticSource;
use crate::domain::traits::PairSource;
use crate::infra::visualize;

/// Samples the synthetic dataset and renders it, nothing more.
pub struct InspectUseCase {
    n_samples:      usize,
    num_categories: usize,
    seed:           u64,
}

impl InspectUseCase {
    /// Create a new InspectUseCase
    pub fn new(n_samples: usize, num_categories: usize, seed: u64) -> Self {
        Self { n_samples, num_categories, seed }
    }

    /// Sample and print the raw-data heatmap
    pub fn execute(&self) -> Result<()> {
        let source  = SyntheticSource::new(self.num_categories, self.n_samples, self.seed);
        let samples = source.generate()?;

        let counts = visualize::count_grid(&samples, self.num_categories);
        println!(
            "Synthetic data: {} samples, d = {}, seed = {}",
            samples.len(),
            self.num_categories,
            self.seed,
        );
        println!("{}", visualize::render_heatmap(&counts, self.num_categories));
        Ok(())
    }
}
