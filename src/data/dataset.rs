use burn::data::dataset::Dataset;

use crate::domain::sample::Sample;

/// In-memory dataset of (x0, x1) pairs.
/// Implements Burn's Dataset trait so the DataLoader can
/// shuffle and batch it.
#[derive(Debug, Clone)]
pub struct PairDataset {
    samples: Vec<Sample>,
}

impl PairDataset {
    pub fn new(samples: Vec<Sample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<Sample> for PairDataset {
    fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).copied()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
